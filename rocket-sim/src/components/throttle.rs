// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Throttle lever
//!
//! The throttle is a rate integrator keyed by a mode flag. The mode is set
//! from input events and never changes on its own; each frame the level moves
//! at a fixed rate in the direction the mode says and is then clamped to
//! [0, 1].

use crate::ecs::{Component, UpdateContext};

/// Default lever speed in full-scale units per second
pub const DEFAULT_THROTTLE_CHANGE_RATE: f64 = 0.5;

/// Lever mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrottleState {
    /// Engine cut: the level drops to zero immediately
    #[default]
    Off,
    /// Level rises at the change rate
    Up,
    /// Level falls at the change rate
    Down,
    /// Level stays where it is
    Hold,
}

impl ThrottleState {
    /// Next throttle level after `dt` seconds in this mode, clamped to [0, 1]
    pub fn integrate(self, percent: f64, change_rate: f64, dt: f64) -> f64 {
        let next = match self {
            ThrottleState::Off => 0.0,
            ThrottleState::Up => percent + change_rate * dt,
            ThrottleState::Down => percent - change_rate * dt,
            ThrottleState::Hold => percent,
        };
        next.clamp(0.0, 1.0)
    }
}

/// Throttle level of a rocket (or of a single part that has its own lever)
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleComponent {
    state: ThrottleState,
    percent: f64,
    change_rate: f64,
}

impl ThrottleComponent {
    /// Create a closed throttle that moves at `change_rate` per second
    ///
    /// Negative or non-finite rates fall back to the default rate.
    pub fn new(change_rate: f64) -> Self {
        let change_rate = if change_rate.is_finite() && change_rate >= 0.0 {
            change_rate
        } else {
            log::warn!(
                "invalid throttle change rate {}, using {}",
                change_rate,
                DEFAULT_THROTTLE_CHANGE_RATE
            );
            DEFAULT_THROTTLE_CHANGE_RATE
        };

        ThrottleComponent {
            state: ThrottleState::Off,
            percent: 0.0,
            change_rate,
        }
    }

    /// Current lever mode
    pub fn state(&self) -> ThrottleState {
        self.state
    }

    /// Switch the lever mode; takes effect on the next update
    pub fn set_state(&mut self, state: ThrottleState) {
        self.state = state;
    }

    /// Current level in [0, 1]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Lever speed in full-scale units per second
    pub fn change_rate(&self) -> f64 {
        self.change_rate
    }

    /// Advance the level by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() {
            log::warn!("ignoring non-finite throttle step {}", dt);
            return;
        }
        self.percent = self.state.integrate(self.percent, self.change_rate, dt);
    }
}

impl Default for ThrottleComponent {
    fn default() -> Self {
        ThrottleComponent::new(DEFAULT_THROTTLE_CHANGE_RATE)
    }
}

impl Component for ThrottleComponent {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.advance(ctx.dt);
    }
}
