// Sync engine - the one place the hardware is polled

use super::hardware::{Hand, InputBackend};
use super::info::{ActionsSyncInfo, Tagged};
use super::manager::{ActionRuntime, SessionHandle};
use super::{XrError, XrResult};
use log::{debug, trace};

impl<B: InputBackend> ActionRuntime<B> {
    /// Latch the declared action sets and one hardware snapshot for this frame
    ///
    /// Controllers whose type changed since the previous sync get their
    /// bindings re-resolved. A failed hardware read leaves every piece of state
    /// as it was.
    pub fn sync_actions(&mut self, session: SessionHandle, info: &ActionsSyncInfo) -> XrResult<()> {
        info.validate()?;
        self.check_session(session)?;
        if let Some(unattached) = info
            .active_action_sets
            .iter()
            .find(|active| !self.tracker.is_set_attached(active.action_set))
        {
            debug!("Sync declared unattached set {:?}", unattached.action_set);
            return Err(XrError::ActionSetNotAttached);
        }

        let snapshot = self.backend.fetch_input_state()?;

        self.tracker
            .latch(info.active_action_sets.iter().map(|active| active.action_set));
        self.snapshot = snapshot;
        if self.config.trace_input_state {
            trace!("Latched input: {:?}", self.snapshot);
        }

        for hand in Hand::ALL {
            let detected = self.backend.detect_controller_type(hand);
            let controller = &mut self.hands[hand.index()];
            if controller.update_controller_type(detected) {
                controller.rebind(
                    &self.bindings,
                    &self.config.fallback_profiles,
                    &mut self.actions,
                    &self.paths,
                );
                self.profile_changed = true;
            }
        }
        Ok(())
    }
}
