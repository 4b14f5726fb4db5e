// Interaction profiles, physical controller families and the compatibility
// mapping table that wires suggested paths onto hardware fields.
//
// A suggested path is first translated, using the table of the profile it was
// suggested under, into a hardware-neutral `Control`. The physical controller
// family then decides which snapshot field (if any) provides that control.

use super::action::{Axis, AxisField, BoundSource, FloatField, ResolvedBinding};
use super::hardware::ButtonFlags;
use crate::core::Pose;
use log::debug;
use std::fmt;

/// Interaction profiles this runtime understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionProfile {
    KhrSimple,
    HtcVive,
    ValveIndex,
    OculusTouch,
    MicrosoftMotion,
}

impl InteractionProfile {
    pub const ALL: [InteractionProfile; 5] = [
        InteractionProfile::KhrSimple,
        InteractionProfile::HtcVive,
        InteractionProfile::ValveIndex,
        InteractionProfile::OculusTouch,
        InteractionProfile::MicrosoftMotion,
    ];

    pub fn path(self) -> &'static str {
        match self {
            InteractionProfile::KhrSimple => "/interaction_profiles/khr/simple_controller",
            InteractionProfile::HtcVive => "/interaction_profiles/htc/vive_controller",
            InteractionProfile::ValveIndex => "/interaction_profiles/valve/index_controller",
            InteractionProfile::OculusTouch => "/interaction_profiles/oculus/touch_controller",
            InteractionProfile::MicrosoftMotion => {
                "/interaction_profiles/microsoft/motion_controller"
            }
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|profile| profile.path() == path)
    }

    /// Path suffixes recognised under this profile
    fn controls(self) -> &'static [(&'static str, Control)] {
        match self {
            InteractionProfile::KhrSimple => SIMPLE_CONTROLS,
            InteractionProfile::HtcVive => VIVE_CONTROLS,
            InteractionProfile::ValveIndex => INDEX_CONTROLS,
            InteractionProfile::OculusTouch => TOUCH_CONTROLS,
            InteractionProfile::MicrosoftMotion => MOTION_CONTROLS,
        }
    }

    /// Translate a suggested binding path into a control
    pub fn control_for(self, path: &str) -> Option<Control> {
        self.controls()
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|(_, control)| *control)
    }
}

impl fmt::Display for InteractionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Physical controller family, identified from the hardware type string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerFamily {
    Vive,
    Index,
    Generic,
}

impl ControllerFamily {
    pub fn from_controller_type(controller_type: &str) -> Self {
        match controller_type {
            "vive_controller" => ControllerFamily::Vive,
            "knuckles" => ControllerFamily::Index,
            _ => ControllerFamily::Generic,
        }
    }

    /// Profile an application would ideally bind for this hardware
    pub fn preferred_profile(self) -> InteractionProfile {
        match self {
            ControllerFamily::Vive => InteractionProfile::HtcVive,
            ControllerFamily::Index => InteractionProfile::ValveIndex,
            ControllerFamily::Generic => InteractionProfile::KhrSimple,
        }
    }

    pub fn localized_name(self) -> &'static str {
        match self {
            ControllerFamily::Vive => "Vive Controller",
            ControllerFamily::Index => "Index Controller",
            ControllerFamily::Generic => "Controller",
        }
    }

    /// Grip-to-aim correction for this hardware
    pub fn aim_pose(self) -> Pose {
        match self {
            ControllerFamily::Vive => Pose::from_pitch_offset(-45.0, 0.05),
            ControllerFamily::Index => Pose::from_pitch_offset(-70.0, 0.05),
            ControllerFamily::Generic => Pose::IDENTITY,
        }
    }

    /// Snapshot field providing a control on this hardware, if any
    pub fn source_for(self, control: Control) -> Option<BoundSource> {
        use Control::*;
        use ControllerFamily::*;

        let source = match (self, control) {
            (_, GripPose | AimPose | Haptic) => return None,

            (_, SelectClick) => BoundSource::button(ButtonFlags::TRIGGER),
            (_, SystemClick) => BoundSource::button(ButtonFlags::SYSTEM),
            (_, TriggerValue) => BoundSource::Float(FloatField::Trigger),
            (_, TriggerClick) => BoundSource::button(ButtonFlags::TRIGGER),

            (Index, MenuClick) => BoundSource::button(ButtonFlags::B),
            (Vive | Generic, MenuClick) => BoundSource::button(ButtonFlags::MENU),

            (Index, TriggerTouch) => BoundSource::touch(ButtonFlags::TRIGGER),
            (Index, SqueezeValue) => BoundSource::Float(FloatField::Grip),
            (Index, SqueezeForce) => BoundSource::Float(FloatField::GripForce),
            (Vive | Generic, SqueezeValue) => BoundSource::button(ButtonFlags::GRIP),
            (_, SqueezeClick) => BoundSource::button(ButtonFlags::GRIP),

            (Index, ThumbstickXy) => BoundSource::axes(AxisField::Joystick),
            (Index, ThumbstickX) => BoundSource::axis(AxisField::Joystick, Axis::X),
            (Index, ThumbstickY) => BoundSource::axis(AxisField::Joystick, Axis::Y),
            (Index, ThumbstickClick) => BoundSource::button(ButtonFlags::JOYSTICK),
            (Index, ThumbstickTouch) => BoundSource::touch(ButtonFlags::JOYSTICK),

            // Wands have no thumbstick: emulate it with the trackpad.
            (Vive, ThumbstickXy | TrackpadXy) => BoundSource::axes(AxisField::Touchpad),
            (Vive, ThumbstickX | TrackpadX) => BoundSource::axis(AxisField::Touchpad, Axis::X),
            (Vive, ThumbstickY | TrackpadY) => BoundSource::axis(AxisField::Touchpad, Axis::Y),
            (Vive, ThumbstickClick | TrackpadClick) => BoundSource::button(ButtonFlags::TOUCHPAD),
            (Vive, ThumbstickTouch | TrackpadTouch) => BoundSource::touch(ButtonFlags::TOUCHPAD),

            (Index, TrackpadXy) => BoundSource::axes(AxisField::Touchpad),
            (Index, TrackpadX) => BoundSource::axis(AxisField::Touchpad, Axis::X),
            (Index, TrackpadY) => BoundSource::axis(AxisField::Touchpad, Axis::Y),
            (Index, TrackpadTouch) => BoundSource::touch(ButtonFlags::TOUCHPAD),
            (Index, TrackpadForce) => BoundSource::Float(FloatField::TouchpadForce),

            (Index, PrimaryClick) => BoundSource::button(ButtonFlags::A),
            (Index, PrimaryTouch) => BoundSource::touch(ButtonFlags::A),
            (Index, SecondaryClick) => BoundSource::button(ButtonFlags::B),
            (Index, SecondaryTouch) => BoundSource::touch(ButtonFlags::B),
            (Vive, SecondaryClick) => BoundSource::button(ButtonFlags::MENU),

            _ => return None,
        };
        Some(source)
    }
}

impl fmt::Display for ControllerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.localized_name())
    }
}

/// Hardware-neutral meaning of a suggested path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SelectClick,
    MenuClick,
    SystemClick,
    TriggerValue,
    TriggerClick,
    TriggerTouch,
    SqueezeValue,
    SqueezeClick,
    SqueezeForce,
    ThumbstickXy,
    ThumbstickX,
    ThumbstickY,
    ThumbstickClick,
    ThumbstickTouch,
    TrackpadXy,
    TrackpadX,
    TrackpadY,
    TrackpadClick,
    TrackpadTouch,
    TrackpadForce,
    /// A (right) or X (left)
    PrimaryClick,
    PrimaryTouch,
    /// B (right) or Y (left)
    SecondaryClick,
    SecondaryTouch,
    ThumbrestTouch,
    GripPose,
    AimPose,
    Haptic,
}

impl Control {
    /// Display name used for localized input source names
    pub fn localized_name(self) -> &'static str {
        match self {
            Control::SelectClick => "Select",
            Control::MenuClick => "Menu Button",
            Control::SystemClick => "System Button",
            Control::TriggerValue | Control::TriggerClick => "Trigger",
            Control::TriggerTouch => "Trigger Touch",
            Control::SqueezeValue | Control::SqueezeClick => "Grip",
            Control::SqueezeForce => "Grip Force",
            Control::ThumbstickXy => "Thumbstick",
            Control::ThumbstickX => "Thumbstick X",
            Control::ThumbstickY => "Thumbstick Y",
            Control::ThumbstickClick => "Thumbstick Press",
            Control::ThumbstickTouch => "Thumbstick Touch",
            Control::TrackpadXy => "Trackpad",
            Control::TrackpadX => "Trackpad X",
            Control::TrackpadY => "Trackpad Y",
            Control::TrackpadClick => "Trackpad Press",
            Control::TrackpadTouch => "Trackpad Touch",
            Control::TrackpadForce => "Trackpad Force",
            Control::PrimaryClick => "Primary Button",
            Control::PrimaryTouch => "Primary Button Touch",
            Control::SecondaryClick => "Secondary Button",
            Control::SecondaryTouch => "Secondary Button Touch",
            Control::ThumbrestTouch => "Thumbrest Touch",
            Control::GripPose => "Grip Pose",
            Control::AimPose => "Aim Pose",
            Control::Haptic => "Haptics",
        }
    }
}

const COMMON_POSE_CONTROLS: [(&str, Control); 3] = [
    ("/input/grip/pose", Control::GripPose),
    ("/input/aim/pose", Control::AimPose),
    ("/output/haptic", Control::Haptic),
];

const SIMPLE_CONTROLS: &[(&str, Control)] = &[
    ("/input/select/click", Control::SelectClick),
    ("/input/menu/click", Control::MenuClick),
    COMMON_POSE_CONTROLS[0],
    COMMON_POSE_CONTROLS[1],
    COMMON_POSE_CONTROLS[2],
];

const VIVE_CONTROLS: &[(&str, Control)] = &[
    ("/input/system/click", Control::SystemClick),
    ("/input/squeeze/click", Control::SqueezeClick),
    ("/input/menu/click", Control::MenuClick),
    ("/input/trigger/click", Control::TriggerClick),
    ("/input/trigger/value", Control::TriggerValue),
    ("/input/trackpad", Control::TrackpadXy),
    ("/input/trackpad/x", Control::TrackpadX),
    ("/input/trackpad/y", Control::TrackpadY),
    ("/input/trackpad/click", Control::TrackpadClick),
    ("/input/trackpad/touch", Control::TrackpadTouch),
    COMMON_POSE_CONTROLS[0],
    COMMON_POSE_CONTROLS[1],
    COMMON_POSE_CONTROLS[2],
];

const INDEX_CONTROLS: &[(&str, Control)] = &[
    ("/input/system/click", Control::SystemClick),
    ("/input/a/click", Control::PrimaryClick),
    ("/input/a/touch", Control::PrimaryTouch),
    ("/input/b/click", Control::SecondaryClick),
    ("/input/b/touch", Control::SecondaryTouch),
    ("/input/squeeze/value", Control::SqueezeValue),
    ("/input/squeeze/force", Control::SqueezeForce),
    ("/input/trigger/click", Control::TriggerClick),
    ("/input/trigger/value", Control::TriggerValue),
    ("/input/trigger/touch", Control::TriggerTouch),
    ("/input/thumbstick", Control::ThumbstickXy),
    ("/input/thumbstick/x", Control::ThumbstickX),
    ("/input/thumbstick/y", Control::ThumbstickY),
    ("/input/thumbstick/click", Control::ThumbstickClick),
    ("/input/thumbstick/touch", Control::ThumbstickTouch),
    ("/input/trackpad", Control::TrackpadXy),
    ("/input/trackpad/x", Control::TrackpadX),
    ("/input/trackpad/y", Control::TrackpadY),
    ("/input/trackpad/force", Control::TrackpadForce),
    ("/input/trackpad/touch", Control::TrackpadTouch),
    COMMON_POSE_CONTROLS[0],
    COMMON_POSE_CONTROLS[1],
    COMMON_POSE_CONTROLS[2],
];

const TOUCH_CONTROLS: &[(&str, Control)] = &[
    ("/input/x/click", Control::PrimaryClick),
    ("/input/x/touch", Control::PrimaryTouch),
    ("/input/y/click", Control::SecondaryClick),
    ("/input/y/touch", Control::SecondaryTouch),
    ("/input/a/click", Control::PrimaryClick),
    ("/input/a/touch", Control::PrimaryTouch),
    ("/input/b/click", Control::SecondaryClick),
    ("/input/b/touch", Control::SecondaryTouch),
    ("/input/menu/click", Control::MenuClick),
    ("/input/system/click", Control::SystemClick),
    ("/input/squeeze/value", Control::SqueezeValue),
    ("/input/trigger/value", Control::TriggerValue),
    ("/input/trigger/touch", Control::TriggerTouch),
    ("/input/thumbstick", Control::ThumbstickXy),
    ("/input/thumbstick/x", Control::ThumbstickX),
    ("/input/thumbstick/y", Control::ThumbstickY),
    ("/input/thumbstick/click", Control::ThumbstickClick),
    ("/input/thumbstick/touch", Control::ThumbstickTouch),
    ("/input/thumbrest/touch", Control::ThumbrestTouch),
    COMMON_POSE_CONTROLS[0],
    COMMON_POSE_CONTROLS[1],
    COMMON_POSE_CONTROLS[2],
];

const MOTION_CONTROLS: &[(&str, Control)] = &[
    ("/input/menu/click", Control::MenuClick),
    ("/input/squeeze/click", Control::SqueezeClick),
    ("/input/trigger/value", Control::TriggerValue),
    ("/input/thumbstick", Control::ThumbstickXy),
    ("/input/thumbstick/x", Control::ThumbstickX),
    ("/input/thumbstick/y", Control::ThumbstickY),
    ("/input/thumbstick/click", Control::ThumbstickClick),
    ("/input/trackpad", Control::TrackpadXy),
    ("/input/trackpad/x", Control::TrackpadX),
    ("/input/trackpad/y", Control::TrackpadY),
    ("/input/trackpad/click", Control::TrackpadClick),
    ("/input/trackpad/touch", Control::TrackpadTouch),
    COMMON_POSE_CONTROLS[0],
    COMMON_POSE_CONTROLS[1],
    COMMON_POSE_CONTROLS[2],
];

/// Wires one suggested path into an action's binding
pub type MappingFn = fn(&mut ResolvedBinding, &str);

fn wire(
    binding: &mut ResolvedBinding,
    path: &str,
    resolved: InteractionProfile,
    family: ControllerFamily,
) {
    let control = resolved.control_for(path);
    let source = control.and_then(|control| family.source_for(control));
    debug!(
        "Wiring {} under {} for {:?} hardware: {:?} -> {:?}",
        path, resolved, family, control, source
    );
    binding.rewire(path, source);
}

macro_rules! mapping_fns {
    ($($name:ident: $profile:ident on $family:ident),+ $(,)?) => {
        $(
            fn $name(binding: &mut ResolvedBinding, path: &str) {
                wire(binding, path, InteractionProfile::$profile, ControllerFamily::$family);
            }
        )+
    };
}

mapping_fns! {
    simple_on_generic: KhrSimple on Generic,
    simple_on_vive: KhrSimple on Vive,
    simple_on_index: KhrSimple on Index,
    vive_on_vive: HtcVive on Vive,
    index_on_index: ValveIndex on Index,
    touch_on_generic: OculusTouch on Generic,
    touch_on_vive: OculusTouch on Vive,
    touch_on_index: OculusTouch on Index,
    motion_on_generic: MicrosoftMotion on Generic,
    motion_on_vive: MicrosoftMotion on Vive,
    motion_on_index: MicrosoftMotion on Index,
}

/// Compatibility mapping for bindings suggested under `resolved` when the
/// hardware would prefer `preferred`
///
/// `resolved` is either `preferred` itself or one of the fallback profiles.
/// Other combinations never arise and have no mapping.
pub fn compatibility_mapping(
    resolved: InteractionProfile,
    preferred: InteractionProfile,
) -> Option<MappingFn> {
    use InteractionProfile::*;

    let mapping: MappingFn = match (resolved, preferred) {
        (KhrSimple, KhrSimple) => simple_on_generic,
        (KhrSimple, HtcVive) => simple_on_vive,
        (KhrSimple, ValveIndex) => simple_on_index,
        (HtcVive, HtcVive) => vive_on_vive,
        (ValveIndex, ValveIndex) => index_on_index,
        (OculusTouch, KhrSimple) => touch_on_generic,
        (OculusTouch, HtcVive) => touch_on_vive,
        (OculusTouch, ValveIndex) => touch_on_index,
        (MicrosoftMotion, KhrSimple) => motion_on_generic,
        (MicrosoftMotion, HtcVive) => motion_on_vive,
        (MicrosoftMotion, ValveIndex) => motion_on_index,
        (HtcVive | ValveIndex, _) | (_, OculusTouch | MicrosoftMotion) => return None,
    };
    Some(mapping)
}
