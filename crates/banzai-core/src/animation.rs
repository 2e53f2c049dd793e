//! Spin animation for the scene object
//!
//! The object turns about the vertical axis at a constant rate while
//! spinning and holds its angle while paused. Toggling only flips the
//! state; the next frame picks it up.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Angular velocity while spinning, in radians per second
pub const SPIN_RATE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinState {
    #[default]
    Spinning,
    Paused,
}

impl SpinState {
    pub fn toggle(self) -> Self {
        match self {
            SpinState::Spinning => SpinState::Paused,
            SpinState::Paused => SpinState::Spinning,
        }
    }

    pub fn is_spinning(self) -> bool {
        self == SpinState::Spinning
    }

    /// Text of the spin button, which names the action it performs
    pub fn button_label(self) -> &'static str {
        match self {
            SpinState::Spinning => "Stop Spin",
            SpinState::Paused => "Start Spin",
        }
    }
}

impl From<bool> for SpinState {
    fn from(spinning: bool) -> Self {
        if spinning {
            SpinState::Spinning
        } else {
            SpinState::Paused
        }
    }
}

/// Rotation angle about the vertical axis, kept in [0, 2π)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub angle: f32,
}

impl Spin {
    /// Advance by one frame of `dt` seconds
    pub fn advance(&mut self, state: SpinState, dt: f32) {
        if !state.is_spinning() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.angle = (self.angle + dt * SPIN_RATE).rem_euclid(TAU);
    }
}
