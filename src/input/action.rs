// Action and action-set definitions, resolved bindings and latched values

use super::hardware::{ButtonFlags, Hand, InputSnapshot, Time};
use crate::core::{Handle, Path};
use glam::Vec2;
use std::fmt;

pub type ActionSetHandle = Handle<ActionSet>;
pub type ActionHandle = Handle<Action>;

/// Declared type of an action, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Boolean,
    Float,
    Vector2f,
    Pose,
    Vibration,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionType::Boolean => "boolean_input",
            ActionType::Float => "float_input",
            ActionType::Vector2f => "vector2f_input",
            ActionType::Pose => "pose_input",
            ActionType::Vibration => "vibration_output",
        };
        f.write_str(name)
    }
}

/// A named group of actions
#[derive(Debug, Clone)]
pub struct ActionSet {
    pub name: String,
    pub localized_name: String,
    /// Accepted for API compatibility; has no effect
    pub priority: u32,
}

/// Which per-hand bitmask a button binding reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonField {
    Press,
    Touch,
}

/// Per-hand scalar signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatField {
    Trigger,
    Grip,
    GripForce,
    TouchpadForce,
}

/// Per-hand two-axis signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisField {
    Joystick,
    Touchpad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Reference into the hardware snapshot that an action reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundSource {
    Button { field: ButtonField, mask: ButtonFlags },
    Float(FloatField),
    /// A two-axis field; `component` selects one axis for float actions
    Vector2 {
        field: AxisField,
        component: Option<Axis>,
    },
}

impl BoundSource {
    pub fn button(mask: ButtonFlags) -> Self {
        Self::Button {
            field: ButtonField::Press,
            mask,
        }
    }

    pub fn touch(mask: ButtonFlags) -> Self {
        Self::Button {
            field: ButtonField::Touch,
            mask,
        }
    }

    pub fn axes(field: AxisField) -> Self {
        Self::Vector2 {
            field,
            component: None,
        }
    }

    pub fn axis(field: AxisField, component: Axis) -> Self {
        Self::Vector2 {
            field,
            component: Some(component),
        }
    }
}

impl ButtonField {
    pub fn read(self, snapshot: &InputSnapshot, hand: Hand) -> ButtonFlags {
        match self {
            ButtonField::Press => snapshot.buttons[hand.index()],
            ButtonField::Touch => snapshot.touches[hand.index()],
        }
    }
}

impl FloatField {
    pub fn read(self, snapshot: &InputSnapshot, hand: Hand) -> f32 {
        let values = match self {
            FloatField::Trigger => &snapshot.trigger,
            FloatField::Grip => &snapshot.grip,
            FloatField::GripForce => &snapshot.grip_force,
            FloatField::TouchpadForce => &snapshot.touchpad_force,
        };
        values[hand.index()]
    }
}

impl AxisField {
    pub fn read(self, snapshot: &InputSnapshot, hand: Hand) -> Vec2 {
        match self {
            AxisField::Joystick => snapshot.joystick[hand.index()],
            AxisField::Touchpad => snapshot.touchpad[hand.index()],
        }
    }
}

impl Axis {
    pub fn pick(self, value: Vec2) -> f32 {
        match self {
            Axis::X => value.x,
            Axis::Y => value.y,
        }
    }
}

/// The binding wired into an action by the controller binding resolver
///
/// `path` is kept even when `source` is `None`: pose and haptic bindings have a
/// path but no input field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBinding {
    pub path: Option<String>,
    pub source: Option<BoundSource>,
}

impl ResolvedBinding {
    /// Replace the binding wholesale
    pub(crate) fn rewire(&mut self, path: &str, source: Option<BoundSource>) {
        self.path = Some(path.to_string());
        self.source = source;
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }
}

/// Last value reported for an action and when it last changed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Latched<T> {
    pub value: T,
    pub changed_at: Time,
}

/// Outcome of latching a freshly computed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatchOutcome {
    pub changed: bool,
    pub last_change_time: Time,
}

impl<T: Copy + PartialEq> Latched<T> {
    /// Record `value`, comparing exactly against the previous one
    ///
    /// The stored value and timestamp are overwritten on every call, so calling
    /// again with the same value reports no change.
    pub fn latch(&mut self, value: T, now: Time) -> LatchOutcome {
        let changed = value != self.value;
        if changed {
            self.changed_at = now;
        }
        self.value = value;
        LatchOutcome {
            changed,
            last_change_time: self.changed_at,
        }
    }
}

/// An application-declared action, owned by the runtime
#[derive(Debug, Clone)]
pub struct Action {
    pub name: String,
    pub localized_name: String,
    action_type: ActionType,
    action_set: ActionSetHandle,
    /// Recorded for diagnostics only
    pub subaction_paths: Vec<Path>,

    pub(crate) binding: ResolvedBinding,
    pub(crate) last_bool: Latched<bool>,
    pub(crate) last_float: Latched<f32>,
    pub(crate) last_vector2: Latched<Vec2>,
}

impl Action {
    pub fn new(
        action_set: ActionSetHandle,
        name: &str,
        localized_name: &str,
        action_type: ActionType,
        subaction_paths: Vec<Path>,
    ) -> Self {
        Self {
            name: name.to_string(),
            localized_name: localized_name.to_string(),
            action_type,
            action_set,
            subaction_paths,
            binding: ResolvedBinding::default(),
            last_bool: Latched::default(),
            last_float: Latched::default(),
            last_vector2: Latched::default(),
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn action_set(&self) -> ActionSetHandle {
        self.action_set
    }

    pub fn binding(&self) -> &ResolvedBinding {
        &self.binding
    }

    /// Join a sub-action path with the bound path
    ///
    /// The sub-action path comes first, so it decides which hand the result refers to.
    pub fn full_path(&self, subaction_path: &str) -> String {
        let bound = self.binding.path.as_deref().unwrap_or_default();
        let mut path = subaction_path.to_string();
        if !path.is_empty() && !path.ends_with('/') && !bound.starts_with('/') {
            path.push('/');
        }
        path.push_str(bound);
        path
    }
}
