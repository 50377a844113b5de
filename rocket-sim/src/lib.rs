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
//! # Rocket Sim
//!
//! An entity-component simulation core for a physics-driven rocket rig.
//! The core computes force, torque and damping requests each frame and
//! hands them to a host physics engine; it never owns rigid bodies itself.
//!
//! ## Features
//!
//! - **Typed ECS**: generational entity handles, a fixed-size component
//!   table per entity indexed by a compile-time component enumeration
//! - **Rocket Parts**: throttle, fuel tank, engine, reaction wheel and
//!   particle emitter components
//! - **Deterministic Frames**: one update pass per frame in a fixed stage
//!   order, scoped per rocket
//! - **Configuration**: rockets described in versioned TOML files
//!
//! ## Example
//!
//! ```rust
//! use rocket_sim::components::{FuelComponent, GeometryComponent, ThrottleState, ThrustComponent};
//! use rocket_sim::physics::{BodyHandle, RecordingPhysics};
//! use rocket_sim::Rocket;
//!
//! let mut rocket = Rocket::new(1.0);
//! rocket
//!     .part_builder()
//!     .with(GeometryComponent::new(BodyHandle(7)))
//!     .and_then(|part| part.with(FuelComponent::new(10.0)))
//!     .and_then(|part| part.with(ThrustComponent::new(20.0, 1.0)))
//!     .and_then(|part| part.attach())
//!     .expect("fresh part");
//!
//! let mut physics = RecordingPhysics::new();
//! rocket.set_throttle_state(ThrottleState::Up);
//! rocket.update(0.5, &mut physics);
//!
//! assert!(physics.total_force(BodyHandle(7)).y > 0.0);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Rocket part components
pub mod components;

/// Rocket aggregate and its update stages
pub mod rocket;

/// Host physics engine interface
pub mod physics;

/// Keyboard and pointer events
pub mod input;

/// Timestamp to delta conversion
pub mod clock;

/// TOML rocket descriptions
pub mod config;

/// Error types
pub mod error;

/// Box-jumping scene
pub mod game;

pub use ecs::{Entity, World};
pub use error::{ConfigError, EcsError, SimError};
pub use rocket::Rocket;
