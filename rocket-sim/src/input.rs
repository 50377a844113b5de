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
//! Discrete input events
//!
//! Input is delivered on the same thread as the frame update and takes
//! effect immediately. Key repeat is filtered here: a second key-down for a
//! torque axis that is already held changes nothing, and so does a key-up
//! for an axis that is not held.

use crate::components::{ThrottleState, TorqueAxis};
use crate::ecs::Entity;
use crate::physics::{BodyHandle, PhysicsBackend};
use crate::rocket::Rocket;
use bitflags::bitflags;

bitflags! {
    /// Set of torque axes whose key is currently held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeldAxes: u8 {
        /// [`TorqueAxis::YawLeft`]
        const YAW_LEFT = 1 << 0;
        /// [`TorqueAxis::YawRight`]
        const YAW_RIGHT = 1 << 1;
        /// [`TorqueAxis::PitchUp`]
        const PITCH_UP = 1 << 2;
        /// [`TorqueAxis::PitchDown`]
        const PITCH_DOWN = 1 << 3;
        /// [`TorqueAxis::RollLeft`]
        const ROLL_LEFT = 1 << 4;
        /// [`TorqueAxis::RollRight`]
        const ROLL_RIGHT = 1 << 5;
    }
}

impl From<TorqueAxis> for HeldAxes {
    fn from(axis: TorqueAxis) -> Self {
        match axis {
            TorqueAxis::YawLeft => HeldAxes::YAW_LEFT,
            TorqueAxis::YawRight => HeldAxes::YAW_RIGHT,
            TorqueAxis::PitchUp => HeldAxes::PITCH_UP,
            TorqueAxis::PitchDown => HeldAxes::PITCH_DOWN,
            TorqueAxis::RollLeft => HeldAxes::ROLL_LEFT,
            TorqueAxis::RollRight => HeldAxes::ROLL_RIGHT,
        }
    }
}

/// An event from the host's input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Change the aggregate throttle mode
    SetThrottle(ThrottleState),
    /// A torque key went down
    TorqueKeyDown(TorqueAxis),
    /// A torque key went up
    TorqueKeyUp(TorqueAxis),
    /// Flip attitude hold
    ToggleSas,
    /// The user clicked on a body
    Select(BodyHandle),
}

/// What an input event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// The event changed rocket state
    Applied,
    /// The event was a repeat or did not hit anything
    Ignored,
    /// The clicked body belongs to this part
    Selected(Entity),
}

impl Rocket {
    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent, physics: &mut dyn PhysicsBackend) -> InputResponse {
        let response = match event {
            InputEvent::SetThrottle(state) => {
                self.set_throttle_state(state);
                InputResponse::Applied
            }
            InputEvent::TorqueKeyDown(axis) => applied_if(self.add_torque_axis(axis)),
            InputEvent::TorqueKeyUp(axis) => applied_if(self.remove_torque_axis(axis)),
            InputEvent::ToggleSas => {
                self.toggle_sas(physics);
                InputResponse::Applied
            }
            InputEvent::Select(body) => match self.part_for_body(body) {
                Some(part) => InputResponse::Selected(part),
                None => InputResponse::Ignored,
            },
        };
        log::debug!("input {:?} -> {:?}", event, response);
        response
    }
}

fn applied_if(changed: bool) -> InputResponse {
    if changed {
        InputResponse::Applied
    } else {
        InputResponse::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GeometryComponent, TorqueComponent};
    use crate::physics::RecordingPhysics;
    use glam::DVec3;

    #[test]
    fn test_held_axes_are_distinct() {
        let all = TorqueAxis::ALL
            .iter()
            .fold(HeldAxes::empty(), |held, &axis| held | HeldAxes::from(axis));
        assert_eq!(all, HeldAxes::all());
    }

    #[test]
    fn test_key_repeat_is_ignored() {
        let mut rocket = Rocket::default();
        let mut physics = RecordingPhysics::new();

        let down = InputEvent::TorqueKeyDown(TorqueAxis::PitchUp);
        assert_eq!(rocket.handle_input(down, &mut physics), InputResponse::Applied);
        assert_eq!(rocket.handle_input(down, &mut physics), InputResponse::Ignored);
        assert_eq!(rocket.torque_direction(), DVec3::X);

        let up = InputEvent::TorqueKeyUp(TorqueAxis::PitchUp);
        assert_eq!(rocket.handle_input(up, &mut physics), InputResponse::Applied);
        assert_eq!(rocket.handle_input(up, &mut physics), InputResponse::Ignored);
        assert_eq!(rocket.torque_direction(), DVec3::ZERO);
    }

    #[test]
    fn test_select_maps_body_to_part() {
        let mut rocket = Rocket::default();
        let mut physics = RecordingPhysics::new();
        let part = rocket
            .part_builder()
            .with(GeometryComponent::new(BodyHandle(12)))
            .and_then(|builder| builder.with(TorqueComponent::new(0.5, 0.9)))
            .and_then(|builder| builder.attach())
            .unwrap();

        assert_eq!(
            rocket.handle_input(InputEvent::Select(BodyHandle(12)), &mut physics),
            InputResponse::Selected(part)
        );
        assert_eq!(
            rocket.handle_input(InputEvent::Select(BodyHandle(13)), &mut physics),
            InputResponse::Ignored
        );
    }

    #[test]
    fn test_throttle_and_sas_events() {
        let mut rocket = Rocket::default();
        let mut physics = RecordingPhysics::new();

        rocket.handle_input(InputEvent::SetThrottle(ThrottleState::Up), &mut physics);
        assert_eq!(rocket.throttle_state(), ThrottleState::Up);

        rocket.handle_input(InputEvent::ToggleSas, &mut physics);
        assert!(rocket.is_sas_active());
    }
}
