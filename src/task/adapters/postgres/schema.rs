//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Owning user.
        user_id -> Uuid,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Ordering key.
        position -> Int4,
        /// Planned start date.
        start_at -> Nullable<Date>,
        /// Planned end date.
        end_at -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Checklist lines, ordered per task by `sort_order`.
    checkboxes (id) {
        /// Internal checkbox identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Line text.
        #[max_length = 255]
        description -> Varchar,
        /// Whether the line is ticked.
        is_checked -> Bool,
        /// Zero-based position within the checklist.
        sort_order -> Int4,
    }
}

diesel::table! {
    /// Task placements into pipelines and optional stages.
    task_placements (task_id, pipeline_id) {
        /// Placed task.
        task_id -> Uuid,
        /// Target pipeline.
        pipeline_id -> Uuid,
        /// Target stage within the pipeline.
        stage_id -> Nullable<Uuid>,
        /// Zero-based position within the task's placements.
        sort_order -> Int4,
    }
}

diesel::joinable!(checkboxes -> tasks (task_id));
diesel::joinable!(task_placements -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, checkboxes, task_placements);
