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
//! Attitude control
//!
//! A reaction wheel does not integrate a rate. Its `direction` is the sum of
//! the unit vectors of the control axes currently held down, so pressing two
//! opposite keys cancels out and releasing a key subtracts exactly what
//! pressing it added.
//!
//! Attitude hold ("SAS") is not simulated here. Toggling it writes the
//! angular damping of the host body directly through the physics backend.

use crate::ecs::{Component, UpdateContext};
use crate::physics::{ApplyMode, BodyHandle, PhysicsBackend};
use glam::DVec3;
use std::fmt;

/// Default angular damping applied while attitude hold is active
pub const DEFAULT_SAS_DAMPING: f64 = 0.9;

/// One of the six rotational control inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorqueAxis {
    /// Rotate left about +Y
    YawLeft,
    /// Rotate right about -Y
    YawRight,
    /// Nose up about +X
    PitchUp,
    /// Nose down about -X
    PitchDown,
    /// Roll left about +Z
    RollLeft,
    /// Roll right about -Z
    RollRight,
}

impl TorqueAxis {
    /// All six axes
    pub const ALL: [TorqueAxis; 6] = [
        TorqueAxis::YawLeft,
        TorqueAxis::YawRight,
        TorqueAxis::PitchUp,
        TorqueAxis::PitchDown,
        TorqueAxis::RollLeft,
        TorqueAxis::RollRight,
    ];

    /// Body-space unit vector of this axis
    pub fn vector(self) -> DVec3 {
        match self {
            TorqueAxis::YawLeft => DVec3::Y,
            TorqueAxis::YawRight => DVec3::NEG_Y,
            TorqueAxis::PitchUp => DVec3::X,
            TorqueAxis::PitchDown => DVec3::NEG_X,
            TorqueAxis::RollLeft => DVec3::Z,
            TorqueAxis::RollRight => DVec3::NEG_Z,
        }
    }

    /// The axis pulling the other way
    pub fn opposite(self) -> TorqueAxis {
        match self {
            TorqueAxis::YawLeft => TorqueAxis::YawRight,
            TorqueAxis::YawRight => TorqueAxis::YawLeft,
            TorqueAxis::PitchUp => TorqueAxis::PitchDown,
            TorqueAxis::PitchDown => TorqueAxis::PitchUp,
            TorqueAxis::RollLeft => TorqueAxis::RollRight,
            TorqueAxis::RollRight => TorqueAxis::RollLeft,
        }
    }
}

impl fmt::Display for TorqueAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Reaction wheel of one part
#[derive(Debug, Clone, PartialEq)]
pub struct TorqueComponent {
    magnitude: f64,
    angular_damping: f64,
    direction: DVec3,
}

impl TorqueComponent {
    /// Create a reaction wheel
    ///
    /// `magnitude` saturates to [0, 1]; `angular_damping` is the coefficient
    /// written to the body when attitude hold is on.
    pub fn new(magnitude: f64, angular_damping: f64) -> Self {
        let clamped = if magnitude.is_finite() { magnitude.clamp(0.0, 1.0) } else { 0.0 };
        if clamped != magnitude {
            log::debug!("torque magnitude {} saturated to {}", magnitude, clamped);
        }

        TorqueComponent {
            magnitude: clamped,
            angular_damping: if angular_damping.is_finite() { angular_damping.max(0.0) } else { 0.0 },
            direction: DVec3::ZERO,
        }
    }

    /// Torque magnitude in [0, 1]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Damping coefficient used for attitude hold
    pub fn angular_damping(&self) -> f64 {
        self.angular_damping
    }

    /// Sum of the currently held axis vectors (body space)
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Replace the accumulated direction
    pub fn set_direction(&mut self, direction: DVec3) {
        self.direction = direction;
    }

    /// Add one axis to the accumulated direction
    pub fn add_axis(&mut self, axis: TorqueAxis) {
        self.direction += axis.vector();
    }

    /// Remove one axis from the accumulated direction
    pub fn remove_axis(&mut self, axis: TorqueAxis) {
        self.direction -= axis.vector();
    }

    /// Flip the body's angular damping between zero and the hold coefficient
    ///
    /// Returns the damping now in effect.
    pub fn toggle_angular_damping(&self, body: BodyHandle, physics: &mut dyn PhysicsBackend) -> f64 {
        let damping = if physics.angular_damping(body) == 0.0 {
            self.angular_damping
        } else {
            0.0
        };
        physics.set_angular_damping(body, damping);
        damping
    }

    /// Set the body's angular damping for attitude hold on or off
    pub fn set_angular_damping(&self, active: bool, body: BodyHandle, physics: &mut dyn PhysicsBackend) {
        let damping = if active { self.angular_damping } else { 0.0 };
        physics.set_angular_damping(body, damping);
    }
}

impl Component for TorqueComponent {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.direction == DVec3::ZERO {
            return;
        }
        let Some(body) = ctx.body else {
            log::trace!("{} has no body, not applying torque", ctx.owner);
            return;
        };

        let world_axis = ctx.physics.orientation(body) * self.direction;
        if let Some(axis) = world_axis.try_normalize() {
            ctx.physics
                .apply_torque(body, axis, self.magnitude, ApplyMode::Continuous);
        }
    }
}
