// Action runtime - owns every action-subsystem structure for one instance

use super::action::{Action, ActionHandle, ActionSet, ActionSetHandle, ActionType};
use super::config::{BindingStore, RuntimeConfig};
use super::controller::HandController;
use super::hardware::{Hand, InputSnapshot};
use super::info::{
    ActionCreateInfo, ActionSetCreateInfo, BoundSourcesForActionEnumerateInfo,
    InputSourceLocalizedNameGetInfo, InteractionProfileSuggestedBinding, LocalizedNameComponents,
    SessionActionSetsAttachInfo, Tagged,
};
use super::tracker::ActiveSetTracker;
use super::{XrError, XrResult};
use crate::core::buffer::{fill_slice, fill_string};
use crate::core::{Arena, Path, PathInterner, Pose};
use log::{debug, trace};

/// Handle of the runtime instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(u64);

/// Handle of the (single) live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

/// The action subsystem of one runtime instance
///
/// All state lives here; nothing is global. Operations are synchronous and take
/// `&mut self`, so a caller that shares the runtime across threads wraps it in a
/// single lock.
pub struct ActionRuntime<B> {
    pub(crate) backend: B,
    pub(crate) config: RuntimeConfig,

    instance: InstanceHandle,
    session: Option<SessionHandle>,
    last_session_id: u64,

    pub(crate) paths: PathInterner,
    action_sets: Arena<ActionSet>,
    pub(crate) actions: Arena<Action>,
    pub(crate) bindings: BindingStore,
    pub(crate) tracker: ActiveSetTracker,

    /// Per-hand controller state, indexed by `Hand::index`
    pub(crate) hands: [HandController; 2],

    /// Hardware state latched by the last sync
    pub(crate) snapshot: InputSnapshot,

    /// Set whenever a hand's interaction profile is re-resolved
    pub(crate) profile_changed: bool,
}

impl<B> ActionRuntime<B> {
    /// Create a runtime with the default configuration
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RuntimeConfig::default())
    }

    /// Create a runtime with explicit tunables
    pub fn with_config(backend: B, config: RuntimeConfig) -> Self {
        Self {
            backend,
            config,
            instance: InstanceHandle(1),
            session: None,
            last_session_id: 0,
            paths: PathInterner::new(),
            action_sets: Arena::new(),
            actions: Arena::new(),
            bindings: BindingStore::new(),
            tracker: ActiveSetTracker::new(),
            hands: [HandController::new(Hand::Left), HandController::new(Hand::Right)],
            snapshot: InputSnapshot::default(),
            profile_changed: false,
        }
    }

    /// Handle of this runtime's instance
    pub fn instance(&self) -> InstanceHandle {
        self.instance
    }

    /// Tunables the runtime was created with
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Hardware backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub(crate) fn check_instance(&self, instance: InstanceHandle) -> XrResult<()> {
        if instance != self.instance {
            return Err(XrError::HandleInvalid(format!("instance {:?}", instance)));
        }
        Ok(())
    }

    pub(crate) fn check_session(&self, session: SessionHandle) -> XrResult<()> {
        if self.session != Some(session) {
            return Err(XrError::HandleInvalid(format!("session {:?}", session)));
        }
        Ok(())
    }

    /// Begin the session; only one may exist at a time
    pub fn create_session(&mut self, instance: InstanceHandle) -> XrResult<SessionHandle> {
        self.check_instance(instance)?;
        if self.session.is_some() {
            return Err(XrError::ValidationFailure(
                "a session already exists".to_string(),
            ));
        }

        self.last_session_id += 1;
        let session = SessionHandle(self.last_session_id);
        self.session = Some(session);
        debug!("Created session {:?}", session);
        Ok(session)
    }

    /// End the session and forget which action sets were attached to it
    pub fn destroy_session(&mut self, session: SessionHandle) -> XrResult<()> {
        self.check_session(session)?;
        self.tracker.reset();
        self.session = None;
        debug!("Destroyed session {:?}", session);
        Ok(())
    }

    /// Intern a path string
    pub fn string_to_path(&mut self, instance: InstanceHandle, text: &str) -> XrResult<Path> {
        self.check_instance(instance)?;
        let path = self.paths.intern(text);
        trace!("string_to_path {} -> {}", text, path);
        Ok(path)
    }

    /// Resolve a path back to its string, using the two-call buffer protocol
    pub fn path_to_string(
        &self,
        instance: InstanceHandle,
        path: Path,
        capacity: usize,
        out: &mut String,
    ) -> XrResult<usize> {
        self.check_instance(instance)?;
        let text = self
            .paths
            .resolve(path)
            .ok_or_else(|| XrError::PathInvalid(path.to_string()))?;
        fill_string(text, capacity, out)
    }

    /// Register a new action set
    pub fn create_action_set(
        &mut self,
        instance: InstanceHandle,
        info: &ActionSetCreateInfo,
    ) -> XrResult<ActionSetHandle> {
        info.validate()?;
        self.check_instance(instance)?;

        // Names are not checked for duplicates; priority is stored but unused.
        let handle = self.action_sets.insert(ActionSet {
            name: info.name.clone(),
            localized_name: info.localized_name.clone(),
            priority: info.priority,
        });
        debug!("Created action set '{}' as {:?}", info.name, handle);
        Ok(handle)
    }

    /// Destroy an action set; its actions are left alone
    pub fn destroy_action_set(&mut self, action_set: ActionSetHandle) -> XrResult<()> {
        self.action_sets
            .remove(action_set)
            .ok_or_else(|| XrError::HandleInvalid(format!("action set {:?}", action_set)))?;
        debug!("Destroyed action set {:?}", action_set);
        Ok(())
    }

    /// Look up a live action set
    pub fn action_set(&self, action_set: ActionSetHandle) -> Option<&ActionSet> {
        self.action_sets.get(action_set)
    }

    /// Register a new action in `action_set`
    pub fn create_action(
        &mut self,
        action_set: ActionSetHandle,
        info: &ActionCreateInfo,
    ) -> XrResult<ActionHandle> {
        info.validate()?;
        if !self.action_sets.contains(action_set) {
            return Err(XrError::HandleInvalid(format!(
                "action set {:?}",
                action_set
            )));
        }

        let handle = self.actions.insert(Action::new(
            action_set,
            &info.name,
            &info.localized_name,
            info.action_type,
            info.subaction_paths.clone(),
        ));
        debug!(
            "Created {} action '{}' as {:?}",
            info.action_type, info.name, handle
        );
        Ok(handle)
    }

    /// Destroy an action; outstanding handles become invalid
    pub fn destroy_action(&mut self, action: ActionHandle) -> XrResult<()> {
        self.actions
            .remove(action)
            .ok_or_else(|| XrError::HandleInvalid(format!("action {:?}", action)))?;
        debug!("Destroyed action {:?}", action);
        Ok(())
    }

    /// Look up a live action
    pub fn action(&self, action: ActionHandle) -> Option<&Action> {
        self.actions.get(action)
    }

    /// Store the suggested bindings for one interaction profile, replacing any
    /// earlier suggestion for it
    pub fn suggest_interaction_profile_bindings(
        &mut self,
        instance: InstanceHandle,
        info: &InteractionProfileSuggestedBinding,
    ) -> XrResult<()> {
        info.validate()?;
        self.check_instance(instance)?;
        if self.tracker.is_attached() {
            return Err(XrError::ActionSetsAlreadyAttached);
        }

        // Paths are not validated: an unknown handle or unsupported profile is
        // accepted and simply never selected.
        let profile = self.paths.describe(Some(info.interaction_profile));
        for suggestion in &info.suggested_bindings {
            trace!(
                "Suggested {:?} -> {}",
                suggestion.action,
                self.paths.describe(Some(suggestion.binding))
            );
        }

        match self
            .bindings
            .suggest(&profile, info.suggested_bindings.clone())
        {
            Some(stored) => debug!(
                "Storing {} suggested bindings for {}",
                info.suggested_bindings.len(),
                stored
            ),
            None => debug!("Ignoring suggested bindings for unsupported profile {}", profile),
        }
        Ok(())
    }

    /// Attach action sets to the session; allowed exactly once
    pub fn attach_session_action_sets(
        &mut self,
        session: SessionHandle,
        info: &SessionActionSetsAttachInfo,
    ) -> XrResult<()> {
        info.validate()?;
        self.check_session(session)?;
        if self.tracker.is_attached() {
            return Err(XrError::ActionSetsAlreadyAttached);
        }
        if let Some(unknown) = info
            .action_sets
            .iter()
            .find(|set| !self.action_sets.contains(**set))
        {
            return Err(XrError::HandleInvalid(format!("action set {:?}", unknown)));
        }

        self.tracker.attach(info.action_sets.iter().copied());
        debug!("Attached {} action sets", info.action_sets.len());
        Ok(())
    }

    /// Interaction profile currently bound for a top-level user path
    ///
    /// No path means the left hand. Paths other than the two hands (gamepad...)
    /// have no profile.
    pub fn get_current_interaction_profile(
        &mut self,
        session: SessionHandle,
        top_level_user_path: Option<Path>,
    ) -> XrResult<Option<Path>> {
        self.check_session(session)?;

        let hand = match top_level_user_path {
            None => Some(Hand::Left),
            Some(path) => Hand::from_path(&self.paths.describe(Some(path))),
        };
        let profile = hand.and_then(|hand| self.hands[hand.index()].interaction_profile());
        Ok(profile.map(|profile| self.paths.intern(profile.path())))
    }

    /// Return and clear the "interaction profile changed" flag
    pub fn take_interaction_profile_changed(&mut self) -> bool {
        std::mem::take(&mut self.profile_changed)
    }

    /// Controller state for one hand
    pub fn controller(&self, hand: Hand) -> &HandController {
        &self.hands[hand.index()]
    }

    /// Grip-to-aim offset of the controller currently in `hand`
    pub fn controller_aim_pose(&self, hand: Hand) -> Pose {
        self.hands[hand.index()].aim_pose()
    }

    /// Hardware snapshot latched by the last sync
    pub fn latched_input(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// List the input sources an action is bound to (at most one)
    pub fn enumerate_bound_sources_for_action(
        &mut self,
        session: SessionHandle,
        info: &BoundSourcesForActionEnumerateInfo,
        capacity: usize,
        out: &mut Vec<Path>,
    ) -> XrResult<usize> {
        info.validate()?;
        self.check_session(session)?;
        let action = self
            .actions
            .get(info.action)
            .ok_or_else(|| XrError::HandleInvalid(format!("action {:?}", info.action)))?;

        let sources: Vec<Path> = match action.binding().path.clone() {
            Some(path) => vec![self.paths.intern(&path)],
            None => Vec::new(),
        };
        fill_slice(&sources, capacity, out)
    }

    /// Human-readable name for an input source, e.g. "Left Hand Index Controller Trigger"
    pub fn get_input_source_localized_name(
        &self,
        session: SessionHandle,
        info: &InputSourceLocalizedNameGetInfo,
        capacity: usize,
        out: &mut String,
    ) -> XrResult<usize> {
        info.validate()?;
        self.check_session(session)?;

        let path = self.paths.describe(Some(info.source_path));
        let mut name = String::new();
        if let Some(hand) = Hand::from_path(&path) {
            let controller = &self.hands[hand.index()];
            if info.which_components.contains(LocalizedNameComponents::USER_PATH) {
                name.push_str(&format!("{} Hand ", hand));
            }
            if info
                .which_components
                .contains(LocalizedNameComponents::INTERACTION_PROFILE)
                && controller.is_present()
            {
                name.push_str(controller.localized_name());
                name.push(' ');
            }
            if info.which_components.contains(LocalizedNameComponents::COMPONENT) {
                let component = controller
                    .interaction_profile()
                    .and_then(|profile| profile.control_for(&path));
                if let Some(component) = component {
                    name.push_str(component.localized_name());
                }
            }
        }

        trace!("Localized name for {}: '{}'", path, name);
        fill_string(&name, capacity, out)
    }

    /// Validate a state or haptic request and resolve what it targets
    ///
    /// Checks, in order: session, action handle, action type, set attachment.
    pub(crate) fn begin_query(
        &mut self,
        session: SessionHandle,
        action: ActionHandle,
        subaction_path: Option<Path>,
        expected: ActionType,
    ) -> XrResult<ActionQuery<'_>> {
        self.check_session(session)?;
        let subaction = self.paths.describe(subaction_path);
        let action = self
            .actions
            .get_mut(action)
            .ok_or_else(|| XrError::HandleInvalid(format!("action {:?}", action)))?;

        if action.action_type() != expected {
            return Err(XrError::ActionTypeMismatch {
                expected,
                actual: action.action_type(),
            });
        }
        if !self.tracker.is_set_attached(action.action_set()) {
            return Err(XrError::ActionSetNotAttached);
        }

        let path = action.full_path(&subaction);
        let hand = Hand::from_path(&path);
        let live = action.binding().is_bound()
            && self.tracker.is_set_latched(action.action_set())
            && hand.map_or(false, |hand| self.hands[hand.index()].is_present());

        Ok(ActionQuery {
            action,
            path,
            hand,
            live,
            snapshot: &self.snapshot,
        })
    }
}

/// A validated request against one action
pub(crate) struct ActionQuery<'a> {
    pub action: &'a mut Action,
    /// Sub-action path joined with the bound path
    pub path: String,
    /// Hand `path` resolves to
    pub hand: Option<Hand>,
    /// Bound, set latched and the hand's controller present
    pub live: bool,
    pub snapshot: &'a InputSnapshot,
}


#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::input::config::SuggestedBinding;
    use crate::input::info::StructureType;
    use crate::input::profile::InteractionProfile;
    use crate::input::simulated::SimulatedDevice;

    #[test]
    fn test_string_to_path_roundtrip() {
        let mut runtime = ActionRuntime::new(SimulatedDevice::new());
        let instance = runtime.instance();
        let path = runtime.string_to_path(instance, "/user/hand/left").unwrap();
        assert_eq!(
            runtime.string_to_path(instance, "/user/hand/left").unwrap(),
            path
        );

        let mut out = String::new();
        let required = runtime.path_to_string(instance, path, 0, &mut out).unwrap();
        assert_eq!(required, "/user/hand/left".len() + 1);
        assert!(out.is_empty());

        runtime
            .path_to_string(instance, path, required, &mut out)
            .unwrap();
        assert_eq!(out, "/user/hand/left");
    }

    #[test]
    fn test_path_to_string_errors() {
        let mut runtime = ActionRuntime::new(SimulatedDevice::new());
        let instance = runtime.instance();
        let mut out = String::new();

        let err = runtime
            .path_to_string(instance, Path::from_u64(99), 0, &mut out)
            .unwrap_err();
        assert!(matches!(err, XrError::PathInvalid(_)));

        let path = runtime.string_to_path(instance, "/user").unwrap();
        let err = runtime.path_to_string(instance, path, 2, &mut out).unwrap_err();
        assert!(matches!(err, XrError::SizeInsufficient { .. }));

        let err = runtime
            .path_to_string(InstanceHandle(7), path, 0, &mut out)
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_create_action_set_invalid_instance() {
        let mut runtime = ActionRuntime::new(SimulatedDevice::new());
        let err = runtime
            .create_action_set(InstanceHandle(2), &ActionSetCreateInfo::new("a", "A", 0))
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_create_action_set_validates_tag_first() {
        let mut runtime = ActionRuntime::new(SimulatedDevice::new());
        let mut info = ActionSetCreateInfo::new("a", "A", 0);
        info.ty = StructureType::ActionCreateInfo;
        let err = runtime
            .create_action_set(InstanceHandle(2), &info)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
    }

    #[test]
    fn test_destroy_action_set_keeps_actions() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);

        harness.runtime.destroy_action_set(harness.set).unwrap();
        assert!(harness.runtime.action(fire).is_some());
        assert!(harness.runtime.action_set(harness.set).is_none());

        let err = harness.runtime.destroy_action_set(harness.set).unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_create_action_in_unknown_set() {
        let mut harness = Harness::new();
        harness.runtime.destroy_action_set(harness.set).unwrap();
        let err = harness
            .runtime
            .create_action(
                harness.set,
                &ActionCreateInfo::new("fire", "Fire", ActionType::Boolean),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_destroy_action_twice() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        harness.runtime.destroy_action(fire).unwrap();
        assert!(matches!(
            harness.runtime.destroy_action(fire),
            Err(XrError::HandleInvalid(_))
        ));
    }

    #[test]
    fn test_duplicate_action_names_allowed() {
        let mut harness = Harness::new();
        let a = harness.action("fire", ActionType::Boolean);
        let b = harness.action("fire", ActionType::Boolean);
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_action_records_subaction_paths() {
        let mut harness = Harness::new();
        let left = harness.path("/user/hand/left");
        let right = harness.path("/user/hand/right");
        let action = harness
            .runtime
            .create_action(
                harness.set,
                &ActionCreateInfo::new("grab", "Grab", ActionType::Float)
                    .with_subaction_paths(vec![left, right]),
            )
            .unwrap();
        let action = harness.runtime.action(action).unwrap();
        assert_eq!(action.subaction_paths, vec![left, right]);
        assert_eq!(action.action_type(), ActionType::Float);
    }

    #[test]
    fn test_attach_twice_fails() {
        let mut harness = Harness::new();
        harness.attach();

        let err = harness
            .runtime
            .attach_session_action_sets(
                harness.session,
                &SessionActionSetsAttachInfo::new(vec![harness.set]),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::ActionSetsAlreadyAttached));

        let err = harness
            .runtime
            .attach_session_action_sets(harness.session, &SessionActionSetsAttachInfo::new(vec![]))
            .unwrap_err();
        assert!(matches!(err, XrError::ActionSetsAlreadyAttached));
    }

    #[test]
    fn test_attach_unknown_set_changes_nothing() {
        let mut harness = Harness::new();
        let instance = harness.instance;
        let other = harness
            .runtime
            .create_action_set(instance, &ActionSetCreateInfo::new("other", "Other", 0))
            .unwrap();
        harness.runtime.destroy_action_set(other).unwrap();

        let err = harness
            .runtime
            .attach_session_action_sets(
                harness.session,
                &SessionActionSetsAttachInfo::new(vec![harness.set, other]),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));

        // The failed call did not count as the one-shot attach
        harness.attach();
    }

    #[test]
    fn test_attach_invalid_session() {
        let mut harness = Harness::new();
        let err = harness
            .runtime
            .attach_session_action_sets(
                SessionHandle(42),
                &SessionActionSetsAttachInfo::new(vec![harness.set]),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_suggest_after_attach_fails() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        harness.attach();

        let profile = harness.path(InteractionProfile::KhrSimple.path());
        let binding = harness.path("/user/hand/left/input/select/click");
        let err = harness
            .runtime
            .suggest_interaction_profile_bindings(
                harness.instance,
                &InteractionProfileSuggestedBinding::new(
                    profile,
                    vec![SuggestedBinding::new(fire, binding)],
                ),
            )
            .unwrap_err();
        assert!(matches!(err, XrError::ActionSetsAlreadyAttached));
    }

    #[test]
    fn test_suggest_unknown_profile_handle_ignored() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        let binding = harness.path("/user/hand/right/input/trigger/click");
        harness
            .runtime
            .suggest_interaction_profile_bindings(
                harness.instance,
                &InteractionProfileSuggestedBinding::new(
                    Path::from_u64(999),
                    vec![SuggestedBinding::new(fire, binding)],
                ),
            )
            .unwrap();
        assert!(harness.runtime.bindings.is_empty());

        harness.attach();
        harness.device().connect(Hand::Right, "vive_controller");
        harness.sync();
        assert!(!harness.runtime.action(fire).unwrap().binding().is_bound());
    }

    #[test]
    fn test_suggest_validates_tag() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        harness.suggest(
            InteractionProfile::KhrSimple,
            &[(fire, "/user/hand/left/input/select/click")],
        );

        let profile = harness.path(InteractionProfile::ValveIndex.path());
        let binding = harness.path("/user/hand/left/input/a/click");
        let mut info = InteractionProfileSuggestedBinding::new(
            profile,
            vec![SuggestedBinding::new(fire, binding)],
        );
        info.ty = StructureType::SessionActionSetsAttachInfo;
        let err = harness
            .runtime
            .suggest_interaction_profile_bindings(harness.instance, &info)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
        assert!(harness
            .runtime
            .bindings
            .get(InteractionProfile::ValveIndex)
            .is_none());
    }

    #[test]
    fn test_mistagged_attach_does_not_consume_attach() {
        let mut harness = Harness::new();
        let mut info = SessionActionSetsAttachInfo::new(vec![harness.set]);
        info.ty = StructureType::ActionsSyncInfo;
        let err = harness
            .runtime
            .attach_session_action_sets(harness.session, &info)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
        assert!(!harness.runtime.tracker.is_attached());

        harness.attach();
        assert!(harness.runtime.tracker.is_set_attached(harness.set));
    }

    #[test]
    fn test_destroy_session_allows_new_attach() {
        let mut harness = Harness::new();
        harness.attach();
        harness.runtime.destroy_session(harness.session).unwrap();

        let session = harness.runtime.create_session(harness.instance).unwrap();
        assert_ne!(session, harness.session);
        harness
            .runtime
            .attach_session_action_sets(session, &SessionActionSetsAttachInfo::new(vec![harness.set]))
            .unwrap();
    }

    #[test]
    fn test_single_session() {
        let mut harness = Harness::new();
        assert!(harness.runtime.create_session(harness.instance).is_err());
    }

    #[test]
    fn test_current_interaction_profile_unbound() {
        let mut harness = Harness::new();
        let session = harness.session;
        assert_eq!(
            harness
                .runtime
                .get_current_interaction_profile(session, None)
                .unwrap(),
            None
        );

        let gamepad = harness.path("/user/gamepad");
        assert_eq!(
            harness
                .runtime
                .get_current_interaction_profile(session, Some(gamepad))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_enumerate_bound_sources() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        let session = harness.session;
        let info = BoundSourcesForActionEnumerateInfo::new(fire);
        let mut out = Vec::new();

        // Nothing bound yet
        let count = harness
            .runtime
            .enumerate_bound_sources_for_action(session, &info, 0, &mut out)
            .unwrap();
        assert_eq!(count, 0);

        harness.suggest(
            InteractionProfile::KhrSimple,
            &[(fire, "/user/hand/left/input/select/click")],
        );
        harness.attach();
        harness.device().connect(Hand::Left, "generic");
        harness.sync();

        let count = harness
            .runtime
            .enumerate_bound_sources_for_action(session, &info, 0, &mut out)
            .unwrap();
        assert_eq!(count, 1);
        assert!(out.is_empty());

        harness
            .runtime
            .enumerate_bound_sources_for_action(session, &info, 1, &mut out)
            .unwrap();
        let expected = harness.path("/user/hand/left/input/select/click");
        assert_eq!(out, vec![expected]);
    }

    #[test]
    fn test_enumerate_bound_sources_unknown_action() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        harness.runtime.destroy_action(fire).unwrap();
        let mut out = Vec::new();
        let err = harness
            .runtime
            .enumerate_bound_sources_for_action(
                harness.session,
                &BoundSourcesForActionEnumerateInfo::new(fire),
                0,
                &mut out,
            )
            .unwrap_err();
        assert!(matches!(err, XrError::HandleInvalid(_)));
    }

    #[test]
    fn test_enumerate_bound_sources_validates_tag() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Boolean);
        let mut info = BoundSourcesForActionEnumerateInfo::new(fire);
        info.ty = StructureType::InputSourceLocalizedNameGetInfo;
        let mut out = Vec::new();
        let err = harness
            .runtime
            .enumerate_bound_sources_for_action(harness.session, &info, 0, &mut out)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
    }

    #[test]
    fn test_localized_name() {
        let mut harness = Harness::new();
        let fire = harness.action("fire", ActionType::Float);
        harness.suggest(
            InteractionProfile::ValveIndex,
            &[(fire, "/user/hand/right/input/trigger/value")],
        );
        harness.attach();
        harness.device().connect(Hand::Right, "knuckles");
        harness.sync();

        let source = harness.path("/user/hand/right/input/trigger/value");
        let info = InputSourceLocalizedNameGetInfo::new(source, LocalizedNameComponents::all());
        let mut out = String::new();
        let required = harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 0, &mut out)
            .unwrap();
        harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, required, &mut out)
            .unwrap();
        assert_eq!(out, "Right Hand Index Controller Trigger");
        assert_eq!(required, out.len() + 1);
    }

    #[test]
    fn test_localized_name_partial_components() {
        let mut harness = Harness::new();
        let source = harness.path("/user/hand/left/input/select/click");
        let info = InputSourceLocalizedNameGetInfo::new(source, LocalizedNameComponents::USER_PATH);
        let mut out = String::new();
        harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 64, &mut out)
            .unwrap();
        assert_eq!(out, "Left Hand ");
    }

    #[test]
    fn test_localized_name_unsupported_path() {
        let mut harness = Harness::new();
        let source = harness.path("/user/gamepad/input/a/click");
        let info = InputSourceLocalizedNameGetInfo::new(source, LocalizedNameComponents::all());
        let mut out = String::from("stale");
        let required = harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 8, &mut out)
            .unwrap();
        assert_eq!(required, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_localized_name_capacity_too_small() {
        let mut harness = Harness::new();
        let source = harness.path("/user/hand/left/input/select/click");
        let info = InputSourceLocalizedNameGetInfo::new(source, LocalizedNameComponents::USER_PATH);
        let mut out = String::new();
        let err = harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 3, &mut out)
            .unwrap_err();
        assert!(matches!(
            err,
            XrError::SizeInsufficient {
                required: 11,
                capacity: 3
            }
        ));
    }

    #[test]
    fn test_localized_name_absent_controller() {
        let mut harness = Harness::new();
        let source = harness.path("/user/hand/left/input/select/click");
        let info = InputSourceLocalizedNameGetInfo::new(
            source,
            LocalizedNameComponents::USER_PATH | LocalizedNameComponents::INTERACTION_PROFILE,
        );
        let mut out = String::new();
        harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 64, &mut out)
            .unwrap();
        assert_eq!(out, "Left Hand ");
    }

    #[test]
    fn test_localized_name_validates_tag() {
        let mut harness = Harness::new();
        let source = harness.path("/user/hand/left");
        let mut info = InputSourceLocalizedNameGetInfo::new(source, LocalizedNameComponents::all());
        info.ty = StructureType::BoundSourcesForActionEnumerateInfo;
        let mut out = String::new();
        let err = harness
            .runtime
            .get_input_source_localized_name(harness.session, &info, 64, &mut out)
            .unwrap_err();
        assert!(matches!(err, XrError::ValidationFailure(_)));
    }
}
