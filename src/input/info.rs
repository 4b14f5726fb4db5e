// Request records passed into the runtime
//
// Every record carries a structure tag, filled in by its constructor. The
// runtime rejects a record whose tag does not match before touching any state.

use super::action::{ActionHandle, ActionSetHandle, ActionType};
use super::config::SuggestedBinding;
use super::{XrError, XrResult};
use crate::core::Path;
use bitflags::bitflags;
use log::debug;

/// Structure tag identifying the kind of a request record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureType {
    ActionSetCreateInfo,
    ActionCreateInfo,
    InteractionProfileSuggestedBinding,
    SessionActionSetsAttachInfo,
    ActionsSyncInfo,
    ActionStateGetInfo,
    BoundSourcesForActionEnumerateInfo,
    InputSourceLocalizedNameGetInfo,
    HapticActionInfo,
    HapticVibration,
}

/// Implemented by every tagged record
pub trait Tagged {
    const EXPECTED: StructureType;

    fn structure_type(&self) -> StructureType;

    /// Fail with a validation error when the tag is wrong
    fn validate(&self) -> XrResult<()> {
        let actual = self.structure_type();
        if actual != Self::EXPECTED {
            debug!("Rejected {:?} record tagged {:?}", Self::EXPECTED, actual);
            return Err(XrError::ValidationFailure(format!(
                "expected {:?}, got {:?}",
                Self::EXPECTED,
                actual
            )));
        }
        Ok(())
    }
}

macro_rules! tagged {
    ($($record:ident),+ $(,)?) => {
        $(
            impl Tagged for $record {
                const EXPECTED: StructureType = StructureType::$record;

                fn structure_type(&self) -> StructureType {
                    self.ty
                }
            }
        )+
    };
}

tagged!(
    ActionSetCreateInfo,
    ActionCreateInfo,
    InteractionProfileSuggestedBinding,
    SessionActionSetsAttachInfo,
    ActionsSyncInfo,
    ActionStateGetInfo,
    BoundSourcesForActionEnumerateInfo,
    InputSourceLocalizedNameGetInfo,
    HapticActionInfo,
    HapticVibration,
);

#[derive(Debug, Clone)]
pub struct ActionSetCreateInfo {
    pub ty: StructureType,
    pub name: String,
    pub localized_name: String,
    pub priority: u32,
}

impl ActionSetCreateInfo {
    pub fn new(name: &str, localized_name: &str, priority: u32) -> Self {
        Self {
            ty: StructureType::ActionSetCreateInfo,
            name: name.to_string(),
            localized_name: localized_name.to_string(),
            priority,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionCreateInfo {
    pub ty: StructureType,
    pub name: String,
    pub localized_name: String,
    pub action_type: ActionType,
    pub subaction_paths: Vec<Path>,
}

impl ActionCreateInfo {
    pub fn new(name: &str, localized_name: &str, action_type: ActionType) -> Self {
        Self {
            ty: StructureType::ActionCreateInfo,
            name: name.to_string(),
            localized_name: localized_name.to_string(),
            action_type,
            subaction_paths: Vec::new(),
        }
    }

    pub fn with_subaction_paths(mut self, paths: Vec<Path>) -> Self {
        self.subaction_paths = paths;
        self
    }
}

#[derive(Debug, Clone)]
pub struct InteractionProfileSuggestedBinding {
    pub ty: StructureType,
    pub interaction_profile: Path,
    pub suggested_bindings: Vec<SuggestedBinding>,
}

impl InteractionProfileSuggestedBinding {
    pub fn new(interaction_profile: Path, suggested_bindings: Vec<SuggestedBinding>) -> Self {
        Self {
            ty: StructureType::InteractionProfileSuggestedBinding,
            interaction_profile,
            suggested_bindings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionActionSetsAttachInfo {
    pub ty: StructureType,
    pub action_sets: Vec<ActionSetHandle>,
}

impl SessionActionSetsAttachInfo {
    pub fn new(action_sets: Vec<ActionSetHandle>) -> Self {
        Self {
            ty: StructureType::SessionActionSetsAttachInfo,
            action_sets,
        }
    }
}

/// An action set declared active for one sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveActionSet {
    pub action_set: ActionSetHandle,
    /// Accepted but not used to filter inputs
    pub subaction_path: Option<Path>,
}

impl ActiveActionSet {
    pub fn new(action_set: ActionSetHandle) -> Self {
        Self {
            action_set,
            subaction_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionsSyncInfo {
    pub ty: StructureType,
    pub active_action_sets: Vec<ActiveActionSet>,
}

impl ActionsSyncInfo {
    pub fn new(active_action_sets: Vec<ActiveActionSet>) -> Self {
        Self {
            ty: StructureType::ActionsSyncInfo,
            active_action_sets,
        }
    }

    /// Declare every given set active, without sub-action filtering
    pub fn for_sets(sets: &[ActionSetHandle]) -> Self {
        Self::new(sets.iter().copied().map(ActiveActionSet::new).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionStateGetInfo {
    pub ty: StructureType,
    pub action: ActionHandle,
    pub subaction_path: Option<Path>,
}

impl ActionStateGetInfo {
    pub fn new(action: ActionHandle) -> Self {
        Self {
            ty: StructureType::ActionStateGetInfo,
            action,
            subaction_path: None,
        }
    }

    pub fn with_subaction_path(mut self, path: Path) -> Self {
        self.subaction_path = Some(path);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundSourcesForActionEnumerateInfo {
    pub ty: StructureType,
    pub action: ActionHandle,
}

impl BoundSourcesForActionEnumerateInfo {
    pub fn new(action: ActionHandle) -> Self {
        Self {
            ty: StructureType::BoundSourcesForActionEnumerateInfo,
            action,
        }
    }
}

bitflags! {
    /// Parts to include in a localized input source name
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LocalizedNameComponents: u32 {
        const USER_PATH = 1 << 0;
        const INTERACTION_PROFILE = 1 << 1;
        const COMPONENT = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InputSourceLocalizedNameGetInfo {
    pub ty: StructureType,
    pub source_path: Path,
    pub which_components: LocalizedNameComponents,
}

impl InputSourceLocalizedNameGetInfo {
    pub fn new(source_path: Path, which_components: LocalizedNameComponents) -> Self {
        Self {
            ty: StructureType::InputSourceLocalizedNameGetInfo,
            source_path,
            which_components,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HapticActionInfo {
    pub ty: StructureType,
    pub action: ActionHandle,
    pub subaction_path: Option<Path>,
}

impl HapticActionInfo {
    pub fn new(action: ActionHandle) -> Self {
        Self {
            ty: StructureType::HapticActionInfo,
            action,
            subaction_path: None,
        }
    }

    pub fn with_subaction_path(mut self, path: Path) -> Self {
        self.subaction_path = Some(path);
        self
    }
}

/// Vibration request; only the amplitude reaches the hardware
#[derive(Debug, Clone, Copy)]
pub struct HapticVibration {
    pub ty: StructureType,
    /// Nanoseconds
    pub duration: i64,
    /// Hz
    pub frequency: f32,
    /// 0.0 to 1.0
    pub amplitude: f32,
}

impl HapticVibration {
    pub fn new(amplitude: f32) -> Self {
        Self {
            ty: StructureType::HapticVibration,
            duration: 0,
            frequency: 0.0,
            amplitude,
        }
    }
}
