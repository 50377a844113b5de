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
//! Physics collaborator interface
//!
//! The simulation core never owns rigid bodies. Components compute force and
//! torque requests and hand them to a [`PhysicsBackend`] implemented by the
//! host engine, keyed by the [`BodyHandle`] stored in the entity's
//! geometry component.
//!
//! The only piece of body state the core reads back is orientation (to move
//! torque axes into world space) and angular damping (for the attitude-hold
//! toggle).

use glam::{DQuat, DVec3};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier of a host physics body (a scene node in the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BodyHandle(pub u64);

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// How a request is integrated by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyMode {
    /// Applied for the duration of the current physics step
    Continuous,
    /// Instantaneous change of momentum
    Impulse,
}

/// Host physics engine as seen from the simulation core
pub trait PhysicsBackend {
    /// Apply a force (world space, Newtons) to a body
    fn apply_force(&mut self, body: BodyHandle, force: DVec3, mode: ApplyMode);

    /// Apply a torque of `magnitude` about the unit world-space `axis`
    fn apply_torque(&mut self, body: BodyHandle, axis: DVec3, magnitude: f64, mode: ApplyMode);

    /// Current world orientation of a body
    fn orientation(&self, _body: BodyHandle) -> DQuat {
        DQuat::IDENTITY
    }

    /// Current angular damping coefficient of a body
    fn angular_damping(&self, body: BodyHandle) -> f64;

    /// Overwrite the angular damping coefficient of a body
    fn set_angular_damping(&mut self, body: BodyHandle, damping: f64);
}

/// A request issued to the physics backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsRequest {
    /// `apply_force`
    Force {
        /// Target body
        body: BodyHandle,
        /// Force vector
        force: DVec3,
        /// Integration mode
        mode: ApplyMode,
    },
    /// `apply_torque`
    Torque {
        /// Target body
        body: BodyHandle,
        /// Unit rotation axis in world space
        axis: DVec3,
        /// Torque magnitude
        magnitude: f64,
        /// Integration mode
        mode: ApplyMode,
    },
    /// `set_angular_damping`
    SetAngularDamping {
        /// Target body
        body: BodyHandle,
        /// New damping coefficient
        damping: f64,
    },
}

impl PhysicsRequest {
    /// Body the request targets
    pub fn body(&self) -> BodyHandle {
        match *self {
            PhysicsRequest::Force { body, .. }
            | PhysicsRequest::Torque { body, .. }
            | PhysicsRequest::SetAngularDamping { body, .. } => body,
        }
    }
}

/// In-memory backend that records every request
///
/// Used by tests, benches and headless hosts. Orientation and damping are
/// kept per body so the read-back paths behave like a real engine.
#[derive(Debug, Default, Clone)]
pub struct RecordingPhysics {
    requests: Vec<PhysicsRequest>,
    orientations: HashMap<BodyHandle, DQuat>,
    damping: HashMap<BodyHandle, f64>,
}

impl RecordingPhysics {
    /// Create an empty recorder; every body starts unrotated and undamped
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation reported for a body
    pub fn set_orientation(&mut self, body: BodyHandle, orientation: DQuat) {
        self.orientations.insert(body, orientation);
    }

    /// All requests recorded so far, oldest first
    pub fn requests(&self) -> &[PhysicsRequest] {
        &self.requests
    }

    /// Drain the recorded requests
    pub fn take_requests(&mut self) -> Vec<PhysicsRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Forget recorded requests but keep body state
    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }

    /// Sum of continuous forces recorded for a body
    pub fn total_force(&self, body: BodyHandle) -> DVec3 {
        self.requests
            .iter()
            .filter_map(|request| match *request {
                PhysicsRequest::Force { body: b, force, mode: ApplyMode::Continuous } if b == body => Some(force),
                _ => None,
            })
            .fold(DVec3::ZERO, |total, force| total + force)
    }

    /// Impulses recorded for a body, oldest first
    pub fn impulses(&self, body: BodyHandle) -> Vec<DVec3> {
        self.requests
            .iter()
            .filter_map(|request| match *request {
                PhysicsRequest::Force { body: b, force, mode: ApplyMode::Impulse } if b == body => Some(force),
                _ => None,
            })
            .collect()
    }

    /// Torque requests recorded for a body as `(axis, magnitude)` pairs
    pub fn torques(&self, body: BodyHandle) -> Vec<(DVec3, f64)> {
        self.requests
            .iter()
            .filter_map(|request| match *request {
                PhysicsRequest::Torque { body: b, axis, magnitude, .. } if b == body => Some((axis, magnitude)),
                _ => None,
            })
            .collect()
    }
}

impl PhysicsBackend for RecordingPhysics {
    fn apply_force(&mut self, body: BodyHandle, force: DVec3, mode: ApplyMode) {
        self.requests.push(PhysicsRequest::Force { body, force, mode });
    }

    fn apply_torque(&mut self, body: BodyHandle, axis: DVec3, magnitude: f64, mode: ApplyMode) {
        self.requests.push(PhysicsRequest::Torque { body, axis, magnitude, mode });
    }

    fn orientation(&self, body: BodyHandle) -> DQuat {
        self.orientations.get(&body).copied().unwrap_or(DQuat::IDENTITY)
    }

    fn angular_damping(&self, body: BodyHandle) -> f64 {
        self.damping.get(&body).copied().unwrap_or(0.0)
    }

    fn set_angular_damping(&mut self, body: BodyHandle, damping: f64) {
        self.damping.insert(body, damping);
        self.requests.push(PhysicsRequest::SetAngularDamping { body, damping });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_sums_continuous_forces_only() {
        let mut physics = RecordingPhysics::new();
        let body = BodyHandle(1);
        physics.apply_force(body, DVec3::new(0.0, 2.0, 0.0), ApplyMode::Continuous);
        physics.apply_force(body, DVec3::new(0.0, 3.0, 0.0), ApplyMode::Continuous);
        physics.apply_force(body, DVec3::new(0.0, 5.0, 0.0), ApplyMode::Impulse);
        physics.apply_force(BodyHandle(2), DVec3::X, ApplyMode::Continuous);

        assert_eq!(physics.total_force(body), DVec3::new(0.0, 5.0, 0.0));
        assert_eq!(physics.impulses(body), vec![DVec3::new(0.0, 5.0, 0.0)]);
        assert_eq!(physics.requests().len(), 4);
    }

    #[test]
    fn test_recorder_tracks_damping() {
        let mut physics = RecordingPhysics::new();
        let body = BodyHandle(3);
        assert_eq!(physics.angular_damping(body), 0.0);

        physics.set_angular_damping(body, 0.8);
        assert_eq!(physics.angular_damping(body), 0.8);
        assert_eq!(
            physics.take_requests(),
            vec![PhysicsRequest::SetAngularDamping { body, damping: 0.8 }]
        );
        assert!(physics.requests().is_empty());
    }

    #[test]
    fn test_default_orientation_is_identity() {
        let mut physics = RecordingPhysics::new();
        assert_eq!(physics.orientation(BodyHandle(9)), DQuat::IDENTITY);

        let turned = DQuat::from_rotation_z(1.0);
        physics.set_orientation(BodyHandle(9), turned);
        assert_eq!(physics.orientation(BodyHandle(9)), turned);
    }

    #[test]
    fn test_request_body() {
        let request = PhysicsRequest::Torque {
            body: BodyHandle(5),
            axis: DVec3::Y,
            magnitude: 0.5,
            mode: ApplyMode::Continuous,
        };
        assert_eq!(request.body(), BodyHandle(5));
    }
}
