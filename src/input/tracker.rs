// Attached and frame-latched action sets

use super::action::ActionSetHandle;
use std::collections::HashSet;

/// Which action sets are attached to the session, and which were declared
/// active by the most recent sync
#[derive(Debug, Default)]
pub struct ActiveSetTracker {
    attached: HashSet<ActionSetHandle>,
    latched: HashSet<ActionSetHandle>,
    attach_done: bool,
}

impl ActiveSetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-shot attach already happened
    pub fn is_attached(&self) -> bool {
        self.attach_done
    }

    /// Record the attached sets; callers check `is_attached` first
    pub(crate) fn attach(&mut self, sets: impl IntoIterator<Item = ActionSetHandle>) {
        self.attached.extend(sets);
        self.attach_done = true;
    }

    pub fn is_set_attached(&self, set: ActionSetHandle) -> bool {
        self.attached.contains(&set)
    }

    /// Replace the latched sets for the new frame
    pub(crate) fn latch(&mut self, sets: impl IntoIterator<Item = ActionSetHandle>) {
        self.latched.clear();
        self.latched.extend(sets);
    }

    pub fn is_set_latched(&self, set: ActionSetHandle) -> bool {
        self.latched.contains(&set)
    }

    /// Forget everything (session ended)
    pub(crate) fn reset(&mut self) {
        self.attached.clear();
        self.latched.clear();
        self.attach_done = false;
    }
}
