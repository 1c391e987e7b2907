//! Ordered checklist owned by a task.

use super::{CheckboxDescription, CheckboxId, TaskDomainError};
use std::collections::HashSet;

/// A single checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    id: CheckboxId,
    description: CheckboxDescription,
    is_checked: bool,
}

impl Checkbox {
    /// Creates a new, unchecked checkbox.
    #[must_use]
    pub fn new(description: CheckboxDescription) -> Self {
        Self {
            id: CheckboxId::new(),
            description,
            is_checked: false,
        }
    }

    /// Reconstructs a checkbox from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CheckboxId,
        description: CheckboxDescription,
        is_checked: bool,
    ) -> Self {
        Self {
            id,
            description,
            is_checked,
        }
    }

    /// Returns the checkbox identifier.
    #[must_use]
    pub const fn id(&self) -> CheckboxId {
        self.id
    }

    /// Returns the checkbox text.
    #[must_use]
    pub const fn description(&self) -> &CheckboxDescription {
        &self.description
    }

    /// Returns whether the item is ticked.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.is_checked
    }
}

/// One entry of a wholesale checklist replacement.
///
/// `id: None` asks for a new checkbox; `Some` rewrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxEdit {
    id: Option<CheckboxId>,
    description: CheckboxDescription,
    is_checked: bool,
}

impl CheckboxEdit {
    /// Creates a checklist edit.
    #[must_use]
    pub const fn new(
        id: Option<CheckboxId>,
        description: CheckboxDescription,
        is_checked: bool,
    ) -> Self {
        Self {
            id,
            description,
            is_checked,
        }
    }
}

/// Summary of what a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistDiff {
    inserted: Vec<CheckboxId>,
    updated: Vec<CheckboxId>,
    removed: Vec<CheckboxId>,
}

impl ChecklistDiff {
    /// Checkboxes created by the edit.
    #[must_use]
    pub fn inserted(&self) -> &[CheckboxId] {
        &self.inserted
    }

    /// Existing checkboxes rewritten in place.
    #[must_use]
    pub fn updated(&self) -> &[CheckboxId] {
        &self.updated
    }

    /// Existing checkboxes the edit dropped.
    #[must_use]
    pub fn removed(&self) -> &[CheckboxId] {
        &self.removed
    }
}

/// Ordered list of checkboxes; order is the order the client submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    items: Vec<Checkbox>,
}

impl Checklist {
    /// Builds a fresh checklist of unchecked items.
    #[must_use]
    pub fn from_descriptions(descriptions: Vec<CheckboxDescription>) -> Self {
        Self {
            items: descriptions.into_iter().map(Checkbox::new).collect(),
        }
    }

    /// Reconstructs a checklist from persisted checkboxes already in order.
    #[must_use]
    pub const fn from_persisted(items: Vec<Checkbox>) -> Self {
        Self { items }
    }

    /// Returns the checkboxes in order.
    #[must_use]
    pub fn items(&self) -> &[Checkbox] {
        &self.items
    }

    /// Number of checkboxes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when there are no checkboxes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn contains(&self, id: CheckboxId) -> bool {
        self.items.iter().any(|checkbox| checkbox.id == id)
    }

    /// Replaces the checklist with `edits`.
    ///
    /// Edits with an id rewrite that checkbox in place, edits without one
    /// create a checkbox, and checkboxes not mentioned are dropped. The
    /// result follows the order of `edits`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownCheckbox`] when an id is not part of
    /// this checklist and [`TaskDomainError::DuplicateCheckbox`] when an id is
    /// repeated.
    pub fn reconcile(
        &self,
        edits: Vec<CheckboxEdit>,
    ) -> Result<(Self, ChecklistDiff), TaskDomainError> {
        let mut kept = HashSet::new();
        let mut items = Vec::with_capacity(edits.len());
        let mut diff = ChecklistDiff::default();

        for edit in edits {
            let CheckboxEdit {
                id,
                description,
                is_checked,
            } = edit;
            let checkbox_id = match id {
                Some(existing) => {
                    if !self.contains(existing) {
                        return Err(TaskDomainError::UnknownCheckbox(existing));
                    }
                    if !kept.insert(existing) {
                        return Err(TaskDomainError::DuplicateCheckbox(existing));
                    }
                    diff.updated.push(existing);
                    existing
                }
                None => {
                    let created = CheckboxId::new();
                    diff.inserted.push(created);
                    created
                }
            };
            items.push(Checkbox {
                id: checkbox_id,
                description,
                is_checked,
            });
        }

        diff.removed = self
            .items
            .iter()
            .map(Checkbox::id)
            .filter(|id| !kept.contains(id))
            .collect();
        Ok((Self { items }, diff))
    }
}
