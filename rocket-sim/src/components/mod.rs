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
//! Domain components
//!
//! One file per component type. Every type here is listed in the
//! compile-time table behind [`crate::ecs::ComponentKind`].

mod fuel;
mod geometry;
mod particle;
mod player_control;
mod throttle;
mod thrust;
mod torque;

pub use fuel::FuelComponent;
pub use geometry::GeometryComponent;
pub use particle::{ParticleComponent, ParticleMode};
pub use player_control::{PlayerControlComponent, DEFAULT_JUMP_IMPULSE};
pub use throttle::{ThrottleComponent, ThrottleState, DEFAULT_THROTTLE_CHANGE_RATE};
pub use thrust::{ThrustComponent, DEFAULT_THRUST_DIRECTION};
pub use torque::{TorqueAxis, TorqueComponent, DEFAULT_SAS_DAMPING};
