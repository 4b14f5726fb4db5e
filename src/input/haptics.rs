// Haptics dispatcher

use super::action::ActionType;
use super::hardware::HapticBackend;
use super::info::{HapticActionInfo, HapticVibration, Tagged};
use super::manager::{ActionRuntime, SessionHandle};
use super::XrResult;
use log::{debug, trace};

/// Suffix the full path of a vibration action must carry
pub const HAPTIC_OUTPUT_SUFFIX: &str = "/output/haptic";

impl<B: HapticBackend> ActionRuntime<B> {
    /// Send one pulse to the controller a vibration action is bound to
    ///
    /// Only the amplitude reaches the hardware. An amplitude of zero or less, an
    /// output that is not a haptic path, or a path outside the two hands is
    /// accepted and does nothing.
    pub fn apply_haptic_feedback(
        &mut self,
        session: SessionHandle,
        info: &HapticActionInfo,
        vibration: &HapticVibration,
    ) -> XrResult<()> {
        info.validate()?;
        vibration.validate()?;
        let query =
            self.begin_query(session, info.action, info.subaction_path, ActionType::Vibration)?;

        let is_haptic =
            query.action.binding().is_bound() && query.path.ends_with(HAPTIC_OUTPUT_SUFFIX);
        let Some(hand) = query.hand.filter(|_| is_haptic) else {
            debug!(
                "{}: not bound to a hand haptic output, ignoring vibration",
                query.action.name
            );
            return Ok(());
        };
        if vibration.amplitude <= 0.0 {
            trace!("{}: zero amplitude, nothing to send", query.action.name);
            return Ok(());
        }

        trace!(
            "{}: pulse {} on {} hand ({} ns, {} Hz dropped)",
            query.action.name,
            vibration.amplitude,
            hand,
            vibration.duration,
            vibration.frequency
        );
        self.backend.trigger_pulse(hand, vibration.amplitude)?;
        Ok(())
    }

    /// Validate a stop request; the hardware cannot cancel a pulse
    pub fn stop_haptic_feedback(
        &mut self,
        session: SessionHandle,
        info: &HapticActionInfo,
    ) -> XrResult<()> {
        info.validate()?;
        self.begin_query(session, info.action, info.subaction_path, ActionType::Vibration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::action::ActionHandle;
    use crate::input::hardware::Hand;
    use crate::input::info::StructureType;
    use crate::input::manager::test_support::Harness;
    use crate::input::profile::InteractionProfile;
    use crate::input::XrError;

    fn rumble_setup(path: &str) -> (Harness, ActionHandle) {
        let mut harness = Harness::new();
        let rumble = harness.action("rumble", ActionType::Vibration);
        harness.suggest(InteractionProfile::KhrSimple, &[(rumble, path)]);
        harness.attach();
        harness.device().connect(Hand::Left, "generic");
        harness.device().connect(Hand::Right, "generic");
        harness.sync();
        (harness, rumble)
    }

    #[test]
    fn test_pulse_forwarded() {
        let (mut harness, rumble) = rumble_setup("/user/hand/right/output/haptic");
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(0.7),
            )
            .unwrap();
        assert_eq!(harness.device().pulses, vec![(Hand::Right, 0.7)]);
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        let (mut harness, rumble) = rumble_setup("/user/hand/left/output/haptic");
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(0.0),
            )
            .unwrap();
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(-1.0),
            )
            .unwrap();
        assert!(harness.device().pulses.is_empty());
    }

    #[test]
    fn test_non_haptic_path_ignored() {
        let (mut harness, rumble) = rumble_setup("/user/hand/left/input/select/click");
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(1.0),
            )
            .unwrap();
        assert!(harness.device().pulses.is_empty());
    }

    #[test]
    fn test_subaction_path_selects_hand() {
        let (mut harness, rumble) = rumble_setup("output/haptic");
        let right = harness.path("/user/hand/right");
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble).with_subaction_path(right),
                &HapticVibration::new(0.5),
            )
            .unwrap();
        assert_eq!(harness.device().pulses, vec![(Hand::Right, 0.5)]);
    }

    #[test]
    fn test_haptics_type_mismatch() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        harness.attach();
        let err = harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(fire),
                &HapticVibration::new(1.0),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            XrError::ActionTypeMismatch {
                expected: ActionType::Vibration,
                actual: ActionType::Boolean
            }
        ));
        assert!(matches!(
            harness
                .runtime
                .stop_haptic_feedback(harness.session, &HapticActionInfo::new(fire)),
            Err(XrError::ActionTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_haptics_unattached_set() {
        let mut harness = Harness::new();
        let rumble = harness.action("rumble", ActionType::Vibration);
        let err = harness
            .runtime
            .stop_haptic_feedback(harness.session, &HapticActionInfo::new(rumble))
            .unwrap_err();
        assert!(matches!(err, XrError::ActionSetNotAttached));
    }

    #[test]
    fn test_stop_succeeds_without_hardware_call() {
        let (mut harness, rumble) = rumble_setup("/user/hand/left/output/haptic");
        harness
            .runtime
            .stop_haptic_feedback(harness.session, &HapticActionInfo::new(rumble))
            .unwrap();
        assert!(harness.device().pulses.is_empty());
    }

    #[test]
    fn test_failed_pulse_is_runtime_failure() {
        let (mut harness, rumble) = rumble_setup("/user/hand/right/output/haptic");
        harness.device().fail_next_pulse = Some("motor stalled".to_string());
        let err = harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(0.4),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::RuntimeFailure(_)));
        assert!(harness.device().pulses.is_empty());

        // One-shot: the next pulse goes through
        harness
            .runtime
            .apply_haptic_feedback(
                harness.session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(0.4),
            )
            .unwrap();
        assert_eq!(harness.device().pulses, vec![(Hand::Right, 0.4)]);
    }

    #[test]
    fn test_malformed_vibration_rejected() {
        let (mut harness, rumble) = rumble_setup("/user/hand/left/output/haptic");
        let mut vibration = HapticVibration::new(1.0);
        vibration.ty = StructureType::HapticActionInfo;
        let err = harness
            .runtime
            .apply_haptic_feedback(harness.session, &HapticActionInfo::new(rumble), &vibration)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
        assert!(harness.device().pulses.is_empty());
    }
}
