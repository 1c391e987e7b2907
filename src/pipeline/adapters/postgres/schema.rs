//! Diesel schema for pipeline and stage persistence.

diesel::table! {
    /// Pipeline records.
    pipelines (id) {
        /// Internal pipeline identifier.
        id -> Uuid,
        /// Pipeline name.
        #[max_length = 255]
        name -> Varchar,
        /// Internal type code; see `PipelineKind::code`.
        #[sql_name = "type"]
        kind -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stage records.
    stages (id) {
        /// Internal stage identifier.
        id -> Uuid,
        /// Owning pipeline.
        pipeline_id -> Uuid,
        /// Stage name.
        #[max_length = 255]
        name -> Varchar,
        /// Hex colour.
        #[max_length = 7]
        color -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(stages -> pipelines (pipeline_id));
diesel::allow_tables_to_appear_in_same_query!(pipelines, stages);
