// Scriptable in-memory backend for tests and the demo binary

use super::hardware::{DeviceError, Hand, HapticBackend, InputBackend, InputSnapshot};

/// A fake controller pair whose state is set directly by the caller
#[derive(Debug, Default)]
pub struct SimulatedDevice {
    /// Snapshot returned by the next poll
    pub state: InputSnapshot,

    /// Controller type per hand; `None` means not connected
    pub controller_types: [Option<String>; 2],

    /// When set, the next poll fails with this message (once)
    pub fail_next_read: Option<String>,

    /// When set, the next haptic pulse fails with this message (once)
    pub fail_next_pulse: Option<String>,

    /// Every haptic pulse received, in order
    pub pulses: Vec<(Hand, f32)>,

    /// Number of successful polls
    pub reads: usize,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug in (or replace) a controller of the given type
    pub fn connect(&mut self, hand: Hand, controller_type: &str) {
        self.controller_types[hand.index()] = Some(controller_type.to_string());
    }

    /// Unplug the controller for a hand
    pub fn disconnect(&mut self, hand: Hand) {
        self.controller_types[hand.index()] = None;
    }

    /// Move the device clock forward
    pub fn advance(&mut self, seconds: f64) {
        self.state.time_in_seconds += seconds;
    }
}

impl InputBackend for SimulatedDevice {
    fn fetch_input_state(&mut self) -> Result<InputSnapshot, DeviceError> {
        if let Some(reason) = self.fail_next_read.take() {
            return Err(DeviceError::InputRead(reason));
        }
        self.reads += 1;
        Ok(self.state)
    }

    fn detect_controller_type(&mut self, hand: Hand) -> Option<String> {
        self.controller_types[hand.index()].clone()
    }
}

impl HapticBackend for SimulatedDevice {
    fn trigger_pulse(&mut self, hand: Hand, amplitude: f32) -> Result<(), DeviceError> {
        if let Some(reason) = self.fail_next_pulse.take() {
            return Err(DeviceError::Haptic { hand, reason });
        }
        self.pulses.push((hand, amplitude));
        Ok(())
    }
}
