//! Single-slot edit mode tracking.

use opsdesk_core::EntityId;

/// Tracks which entity, if any, is being edited. Activating an entity
/// supersedes any previous one; at most one entity is in edit mode.
#[derive(Debug, Default)]
pub struct EditModeTracker {
    editing: Option<EntityId>,
}

impl EditModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an entity into edit mode, taking the slot from whoever held
    /// it.
    pub fn activate(&mut self, id: impl Into<EntityId>) {
        self.editing = Some(id.into());
    }

    /// Whether this entity currently holds the edit slot.
    pub fn is_active(&self, id: &str) -> bool {
        self.editing.as_deref() == Some(id)
    }

    /// Leave edit mode.
    pub fn deactivate(&mut self) {
        self.editing = None;
    }

    /// The entity in edit mode, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
