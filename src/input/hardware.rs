// Hardware seam: raw controller signals, polling and haptic pulses

use bitflags::bitflags;
use glam::Vec2;
use std::fmt;

/// One of the two tracked hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    /// Index into per-hand arrays
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }

    /// Top-level user path for this hand
    pub fn user_path(self) -> &'static str {
        match self {
            Hand::Left => "/user/hand/left",
            Hand::Right => "/user/hand/right",
        }
    }

    /// Resolve the hand a full input path refers to
    ///
    /// Only hand paths are supported; anything else (gamepad, head...) gives `None`.
    pub fn from_path(path: &str) -> Option<Hand> {
        if path.starts_with(Hand::Left.user_path()) {
            Some(Hand::Left)
        } else if path.starts_with(Hand::Right.user_path()) {
            Some(Hand::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => write!(f, "Left"),
            Hand::Right => write!(f, "Right"),
        }
    }
}

bitflags! {
    /// Button press / touch bits reported per hand
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonFlags: u32 {
        const SYSTEM = 1 << 0;
        const MENU = 1 << 1;
        const GRIP = 1 << 2;
        const TRIGGER = 1 << 3;
        const TOUCHPAD = 1 << 4;
        const JOYSTICK = 1 << 5;
        const A = 1 << 6;
        const B = 1 << 7;
    }
}

/// Runtime timestamp in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(pub i64);

impl Time {
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * 1e9) as i64)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }
}

/// One atomic read of every raw controller signal
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Device clock, in seconds
    pub time_in_seconds: f64,
    pub buttons: [ButtonFlags; 2],
    pub touches: [ButtonFlags; 2],
    pub trigger: [f32; 2],
    pub grip: [f32; 2],
    pub grip_force: [f32; 2],
    pub joystick: [Vec2; 2],
    pub touchpad: [Vec2; 2],
    pub touchpad_force: [f32; 2],
    pub finger_index: [f32; 2],
    pub finger_middle: [f32; 2],
    pub finger_ring: [f32; 2],
    pub finger_pinky: [f32; 2],
}

impl InputSnapshot {
    pub fn timestamp(&self) -> Time {
        Time::from_seconds(self.time_in_seconds)
    }
}

/// Errors reported by the hardware backend
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Failed to read input state: {0}")]
    InputRead(String),

    #[error("Failed to trigger haptic pulse on {hand} hand: {reason}")]
    Haptic { hand: Hand, reason: String },
}

/// Source of raw controller input
pub trait InputBackend {
    /// Read the current state of all controller signals
    fn fetch_input_state(&mut self) -> Result<InputSnapshot, DeviceError>;

    /// Controller type string for a hand, or `None` when no controller is present
    fn detect_controller_type(&mut self, hand: Hand) -> Option<String>;
}

/// Haptic output; the hardware only knows fixed-length pulses
pub trait HapticBackend {
    fn trigger_pulse(&mut self, hand: Hand, amplitude: f32) -> Result<(), DeviceError>;
}
