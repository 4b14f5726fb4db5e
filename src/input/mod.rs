// Action subsystem
//
// Resolves application-declared actions (boolean, float, 2-axis, pose and
// vibration) onto the live signals of a two-handed controller pair.
//
// ## Architecture
//
// - `action`: Action and action-set objects, resolved bindings, latched values
// - `config`: Binding suggestions and runtime configuration
// - `tracker`: Attached and frame-latched action sets
// - `profile`: Interaction profiles and the compatibility mapping table
// - `controller`: Per-hand controller state and the binding resolver
// - `hardware`: Raw input snapshot and the backend traits
// - `manager`: The runtime tying everything together
// - `sync`, `state`, `haptics`: Sync, state queries and haptic output
//
// ## Usage Example
//
// ```rust
// let mut runtime = ActionRuntime::new(device);
// let instance = runtime.instance();
// let session = runtime.create_session(instance)?;
//
// let set = runtime.create_action_set(instance, &ActionSetCreateInfo::new("game", "Game", 0))?;
// let fire = runtime.create_action(set, &ActionCreateInfo::new("fire", "Fire", ActionType::Boolean))?;
//
// // Suggest bindings, then attach (once)
// runtime.suggest_interaction_profile_bindings(instance, &suggestion)?;
// runtime.attach_session_action_sets(session, &SessionActionSetsAttachInfo::new(vec![set]))?;
//
// // Every frame
// runtime.sync_actions(session, &ActionsSyncInfo::for_sets(&[set]))?;
// let state = runtime.get_action_state_boolean(session, &ActionStateGetInfo::new(fire))?;
// if state.current_state && state.changed_since_last_sync {
//     // Fire was just pressed
// }
// ```

pub mod action;
pub mod config;
pub mod controller;
pub mod haptics;
pub mod hardware;
pub mod info;
pub mod manager;
pub mod profile;
pub mod simulated;
pub mod state;
pub mod sync;
pub mod tracker;

// Re-export commonly used types
pub use action::{ActionHandle, ActionSetHandle, ActionType};
pub use config::{RuntimeConfig, SuggestedBinding};
pub use hardware::{DeviceError, Hand, HapticBackend, InputBackend, InputSnapshot, Time};
pub use info::*;
pub use manager::{ActionRuntime, InstanceHandle, SessionHandle};
pub use profile::InteractionProfile;
pub use simulated::SimulatedDevice;
pub use state::{ActionStateBoolean, ActionStateFloat, ActionStatePose, ActionStateVector2f};

/// Failures returned by every runtime operation
#[derive(Debug, thiserror::Error)]
pub enum XrError {
    #[error("Validation failure: {0}")]
    ValidationFailure(String),

    #[error("Invalid handle: {0}")]
    HandleInvalid(String),

    #[error("Invalid path: {0}")]
    PathInvalid(String),

    #[error("Buffer too small: need {required}, got {capacity}")]
    SizeInsufficient { required: usize, capacity: usize },

    #[error("Action sets are already attached to the session")]
    ActionSetsAlreadyAttached,

    #[error("Action set is not attached to the session")]
    ActionSetNotAttached,

    #[error("Action type mismatch: expected {expected}, action is {actual}")]
    ActionTypeMismatch {
        expected: ActionType,
        actual: ActionType,
    },

    #[error("Runtime failure: {0}")]
    RuntimeFailure(#[from] DeviceError),
}

pub type XrResult<T> = Result<T, XrError>;
