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
//! Rocket aggregate
//!
//! A [`Rocket`] owns a private [`World`] holding one root entity (the
//! aggregate throttle lever) and any number of part entities. It also owns
//! one [`ComponentSystem`] per updatable component type, so two rockets never
//! share registrations.
//!
//! # Frame
//!
//! [`Rocket::update`] runs the systems in [`UpdateStage::ORDER`]. Before
//! every stage the aggregate throttle level and fuel availability are read
//! again, so the engines see the throttle the lever stage just produced and
//! the next frame sees the tanks the fuel stage just drained.
//!
//! # Example
//!
//! ```
//! use rocket_sim::components::{FuelComponent, GeometryComponent, ThrottleState, ThrustComponent};
//! use rocket_sim::physics::{BodyHandle, RecordingPhysics};
//! use rocket_sim::rocket::Rocket;
//!
//! # fn main() -> Result<(), rocket_sim::EcsError> {
//! let mut rocket = Rocket::new(1.0);
//! rocket
//!     .part_builder()
//!     .with(GeometryComponent::new(BodyHandle(1)))?
//!     .with(FuelComponent::new(10.0))?
//!     .with(ThrustComponent::new(20.0, 1.0))?
//!     .attach()?;
//!
//! let mut physics = RecordingPhysics::new();
//! rocket.set_throttle_state(ThrottleState::Up);
//! rocket.update(1.0, &mut physics);
//!
//! assert_eq!(rocket.remaining_fuel(), 9.0);
//! # Ok(())
//! # }
//! ```

mod stage;

pub use stage::UpdateStage;

use crate::clock::FrameClock;
use crate::components::{
    FuelComponent, GeometryComponent, ParticleComponent, PlayerControlComponent, ThrottleComponent,
    ThrottleState, ThrustComponent, TorqueAxis, TorqueComponent,
};
use crate::config::RocketConfig;
use crate::ecs::{Component, ComponentKind, ComponentSystem, Entity, FrameContext, Siblings, World};
use crate::error::EcsError;
use crate::input::HeldAxes;
use crate::physics::{BodyHandle, PhysicsBackend};
use glam::DVec3;

/// An assembly of parts driven as one vehicle
#[derive(Debug, Clone)]
pub struct Rocket {
    world: World,
    root: Entity,
    parts: Vec<Entity>,
    throttle_system: ComponentSystem<ThrottleComponent>,
    torque_system: ComponentSystem<TorqueComponent>,
    thrust_system: ComponentSystem<ThrustComponent>,
    fuel_system: ComponentSystem<FuelComponent>,
    particle_system: ComponentSystem<ParticleComponent>,
    torque_direction: DVec3,
    held_axes: HeldAxes,
    sas_active: bool,
    clock: FrameClock,
}

impl Rocket {
    /// Create a rocket with no parts whose throttle moves at `change_rate`
    pub fn new(throttle_change_rate: f64) -> Self {
        let mut world = World::new();
        let root = world.create_entity();
        let mut throttle_system = ComponentSystem::new();
        // A fresh entity has no components, so this cannot collide
        if world
            .add_component(root, ThrottleComponent::new(throttle_change_rate))
            .is_ok()
        {
            throttle_system.add(root);
        }

        Rocket {
            world,
            root,
            parts: Vec::new(),
            throttle_system,
            torque_system: ComponentSystem::new(),
            thrust_system: ComponentSystem::new(),
            fuel_system: ComponentSystem::new(),
            particle_system: ComponentSystem::new(),
            torque_direction: DVec3::ZERO,
            held_axes: HeldAxes::empty(),
            sas_active: false,
            clock: FrameClock::new(),
        }
    }

    /// Assemble a rocket from a validated configuration
    pub fn from_config(config: &RocketConfig) -> Result<Self, EcsError> {
        let mut rocket = Rocket::new(config.throttle.change_rate);

        for part in &config.parts {
            let mut builder = rocket.part_builder();
            if let Some(body) = part.body {
                builder = builder.with(GeometryComponent::new(body))?;
            }
            if let Some(throttle) = &part.throttle {
                builder = builder.with(ThrottleComponent::new(throttle.change_rate))?;
            }
            if let Some(fuel) = &part.fuel {
                builder = builder.with(FuelComponent::new(fuel.capacity))?;
            }
            if let Some(thrust) = &part.thrust {
                builder = builder.with(
                    ThrustComponent::new(thrust.max_thrust, thrust.fuel_consumption_rate)
                        .with_direction(DVec3::from_array(thrust.direction)),
                )?;
            }
            if let Some(torque) = &part.torque {
                builder = builder.with(TorqueComponent::new(torque.magnitude, torque.angular_damping))?;
            }
            if let Some(particle) = &part.particle {
                builder = builder.with(ParticleComponent::new(particle.name.clone(), particle.mode))?;
            }
            builder.attach()?;
        }

        log::debug!("assembled rocket with {} parts from config", rocket.parts.len());
        Ok(rocket)
    }

    /// Start assembling a new part inside this rocket's world
    pub fn part_builder(&mut self) -> PartBuilder<'_> {
        let entity = self.world.create_entity();
        PartBuilder {
            rocket: self,
            entity,
            attached: false,
        }
    }

    /// Make an entity of this rocket's world a part
    ///
    /// Every updatable component the entity carries is registered in the
    /// matching system. Attaching twice changes nothing.
    pub fn attach_part(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.world.is_entity_alive(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        if entity == self.root {
            return Err(EcsError::NotAPart(entity));
        }

        self.world.set_parent(entity, Some(self.root))?;
        if !self.parts.contains(&entity) {
            self.parts.push(entity);
            log::debug!(
                "attached part {} with {:?}",
                entity,
                self.world.component_kinds(entity)
            );
        }
        self.register(entity);
        Ok(())
    }

    /// Remove a part and destroy it with all its components
    pub fn detach_part(&mut self, entity: Entity) -> Result<(), EcsError> {
        let Some(index) = self.parts.iter().position(|&part| part == entity) else {
            return Err(EcsError::NotAPart(entity));
        };

        self.parts.remove(index);
        self.throttle_system.remove(entity);
        self.torque_system.remove(entity);
        self.thrust_system.remove(entity);
        self.fuel_system.remove(entity);
        self.particle_system.remove(entity);
        self.world.destroy_entity(entity);
        log::debug!("detached part {}", entity);
        Ok(())
    }

    /// Add a component to an attached part and register it
    pub fn add_part_component<T: Component>(&mut self, part: Entity, component: T) -> Result<(), EcsError> {
        self.ensure_part(part)?;
        self.world.add_component(part, component)?;
        self.register(part);
        Ok(())
    }

    /// Remove a component from an attached part and unregister it
    pub fn remove_part_component<T: Component>(&mut self, part: Entity) -> Result<Option<T>, EcsError> {
        self.ensure_part(part)?;
        let removed = self.world.remove_component::<T>(part);
        if removed.is_some() {
            match T::KIND {
                ComponentKind::Throttle => self.throttle_system.remove(part),
                ComponentKind::Torque => self.torque_system.remove(part),
                ComponentKind::Thrust => self.thrust_system.remove(part),
                ComponentKind::Fuel => self.fuel_system.remove(part),
                ComponentKind::Particle => self.particle_system.remove(part),
                ComponentKind::Geometry | ComponentKind::PlayerControl => false,
            };
        }
        Ok(removed)
    }

    fn ensure_part(&self, entity: Entity) -> Result<(), EcsError> {
        if !self.world.is_entity_alive(entity) {
            Err(EcsError::EntityNotFound(entity))
        } else if !self.parts.contains(&entity) {
            Err(EcsError::NotAPart(entity))
        } else {
            Ok(())
        }
    }

    fn register(&mut self, entity: Entity) {
        self.throttle_system.add_component_found_in(&self.world, entity);
        self.thrust_system.add_component_found_in(&self.world, entity);
        self.fuel_system.add_component_found_in(&self.world, entity);
        self.particle_system.add_component_found_in(&self.world, entity);
        if self.torque_system.add_component_found_in(&self.world, entity) {
            // New wheels pick up whatever keys are already held
            if let Some(wheel) = self.world.component_mut::<TorqueComponent>(entity) {
                wheel.set_direction(self.torque_direction);
            }
        }
    }

    /// The entity carrying the aggregate throttle
    pub fn root(&self) -> Entity {
        self.root
    }

    /// Parts in attach order
    pub fn parts(&self) -> &[Entity] {
        &self.parts
    }

    /// Read access to the rocket's entities and components
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The part whose geometry owns `body`
    pub fn part_for_body(&self, body: BodyHandle) -> Option<Entity> {
        self.world
            .entity_for_body(body)
            .filter(|entity| self.parts.contains(entity))
    }

    /// Sum of every engine's consumption rate
    pub fn fuel_consumption_rate(&self) -> f64 {
        self.thrust_system
            .components(&self.world)
            .map(ThrustComponent::fuel_consumption_rate)
            .sum()
    }

    /// Fuel left across every tank
    pub fn remaining_fuel(&self) -> f64 {
        self.fuel_system
            .components(&self.world)
            .map(FuelComponent::remaining_amount)
            .sum()
    }

    /// Capacity across every tank
    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_system
            .components(&self.world)
            .map(FuelComponent::max_amount)
            .sum()
    }

    /// Whether the engines may fire
    ///
    /// A rocket without any tank has unlimited fuel.
    pub fn has_fuel(&self) -> bool {
        self.fuel_system.is_empty() || self.remaining_fuel() > 0.0
    }

    /// Aggregate throttle level in [0, 1]
    pub fn throttle_percent(&self) -> f64 {
        self.world
            .component::<ThrottleComponent>(self.root)
            .map_or(0.0, ThrottleComponent::percent)
    }

    /// Aggregate throttle mode
    pub fn throttle_state(&self) -> ThrottleState {
        self.world
            .component::<ThrottleComponent>(self.root)
            .map_or(ThrottleState::Off, ThrottleComponent::state)
    }

    /// Change the aggregate throttle mode
    pub fn set_throttle_state(&mut self, state: ThrottleState) {
        if let Some(throttle) = self.world.component_mut::<ThrottleComponent>(self.root) {
            throttle.set_state(state);
        }
    }

    /// Change the mode of a part's own throttle lever
    pub fn set_part_throttle_state(&mut self, part: Entity, state: ThrottleState) -> Result<(), EcsError> {
        self.ensure_part(part)?;
        if let Some(throttle) = self.world.component_mut::<ThrottleComponent>(part) {
            throttle.set_state(state);
        }
        Ok(())
    }

    /// Sum of the held torque axes
    pub fn torque_direction(&self) -> DVec3 {
        self.torque_direction
    }

    /// Torque axes currently held
    pub fn held_axes(&self) -> HeldAxes {
        self.held_axes
    }

    /// Press a torque key; returns false if it was already held
    pub fn add_torque_axis(&mut self, axis: TorqueAxis) -> bool {
        let flag = HeldAxes::from(axis);
        if self.held_axes.contains(flag) {
            return false;
        }
        self.held_axes.insert(flag);
        self.torque_direction += axis.vector();
        self.push_torque_direction();
        true
    }

    /// Release a torque key; returns false if it was not held
    pub fn remove_torque_axis(&mut self, axis: TorqueAxis) -> bool {
        let flag = HeldAxes::from(axis);
        if !self.held_axes.contains(flag) {
            return false;
        }
        self.held_axes.remove(flag);
        self.torque_direction -= axis.vector();
        self.push_torque_direction();
        true
    }

    fn push_torque_direction(&mut self) {
        let direction = self.torque_direction;
        self.torque_system
            .for_each_mut(&mut self.world, |_, wheel| wheel.set_direction(direction));
    }

    /// Whether attitude hold is on
    pub fn is_sas_active(&self) -> bool {
        self.sas_active
    }

    /// Flip attitude hold on every reaction wheel's body
    pub fn toggle_sas(&mut self, physics: &mut dyn PhysicsBackend) -> bool {
        self.set_sas(!self.sas_active, physics);
        self.sas_active
    }

    /// Turn attitude hold on or off on every reaction wheel's body
    pub fn set_sas(&mut self, active: bool, physics: &mut dyn PhysicsBackend) {
        self.sas_active = active;
        for &entity in self.torque_system.entities() {
            let Some(body) = self.world.component::<GeometryComponent>(entity).map(GeometryComponent::body) else {
                continue;
            };
            if let Some(wheel) = self.world.component::<TorqueComponent>(entity) {
                wheel.set_angular_damping(active, body, physics);
            }
        }
        log::debug!("SAS {}", if active { "on" } else { "off" });
    }

    /// Advance the rocket by `dt` seconds
    ///
    /// Negative or non-finite steps are ignored.
    pub fn update(&mut self, dt: f64, physics: &mut dyn PhysicsBackend) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring invalid rocket step {}", dt);
            return;
        }

        let mut frame = FrameContext::standalone(dt, physics).with_siblings(part_siblings);

        for stage in UpdateStage::ORDER {
            frame.throttle = self.throttle_percent();
            frame.has_fuel = self.has_fuel();
            log::trace!(
                "{} stage: throttle {:.3}, fuel {}",
                stage,
                frame.throttle,
                frame.has_fuel
            );

            match stage {
                UpdateStage::Throttle => self.throttle_system.update(&mut self.world, &mut frame),
                UpdateStage::Torque => self.torque_system.update(&mut self.world, &mut frame),
                UpdateStage::Thrust => self.thrust_system.update(&mut self.world, &mut frame),
                UpdateStage::Fuel => self.fuel_system.update(&mut self.world, &mut frame),
                UpdateStage::Particle => self.particle_system.update(&mut self.world, &mut frame),
            }
        }

        if frame.fuel_demand > 0.0 && !self.fuel_system.is_empty() {
            log::trace!("{:.4} fuel demand left unmet", frame.fuel_demand);
        }
    }

    /// Advance the rocket to the absolute frame timestamp `seconds`
    ///
    /// Returns the step that was taken (0 on the first call).
    pub fn update_at(&mut self, seconds: f64, physics: &mut dyn PhysicsBackend) -> f64 {
        let dt = self.clock.tick(seconds);
        self.update(dt, physics);
        dt
    }

    /// Systems as (stage, registered entities), for inspection
    pub fn registrations(&self) -> [(UpdateStage, &[Entity]); 5] {
        [
            (UpdateStage::Throttle, self.throttle_system.entities()),
            (UpdateStage::Torque, self.torque_system.entities()),
            (UpdateStage::Thrust, self.thrust_system.entities()),
            (UpdateStage::Fuel, self.fuel_system.entities()),
            (UpdateStage::Particle, self.particle_system.entities()),
        ]
    }

    /// Read-only view of a part's component
    pub fn part_component<T: Component>(&self, part: Entity) -> Option<&T> {
        if self.parts.contains(&part) {
            self.world.component::<T>(part)
        } else {
            None
        }
    }

    /// Make a part jump if it is player-controlled and has a body
    pub fn jump_part(&self, part: Entity, physics: &mut dyn PhysicsBackend) -> bool {
        let body = self.part_component::<GeometryComponent>(part).map(GeometryComponent::body);
        match (self.part_component::<PlayerControlComponent>(part), body) {
            (Some(control), Some(body)) => {
                control.jump(body, physics);
                true
            }
            _ => false,
        }
    }
}

/// A part pushes its own geometry body and prefers its own throttle
fn part_siblings(world: &World, entity: Entity) -> Siblings {
    Siblings {
        body: world
            .component::<GeometryComponent>(entity)
            .map(GeometryComponent::body),
        throttle: world
            .component::<ThrottleComponent>(entity)
            .map(ThrottleComponent::percent),
    }
}

impl Default for Rocket {
    fn default() -> Self {
        Rocket::new(crate::components::DEFAULT_THROTTLE_CHANGE_RATE)
    }
}

/// Assembles one part inside a rocket
///
/// Created by [`Rocket::part_builder`]. The entity exists from the start but
/// only becomes a part on [`attach`](Self::attach). A builder that is dropped
/// before attaching, or whose component or attach step fails, destroys the
/// half-built entity.
#[derive(Debug)]
#[must_use = "the part is destroyed unless `attach` is called"]
pub struct PartBuilder<'r> {
    rocket: &'r mut Rocket,
    entity: Entity,
    attached: bool,
}

impl<'r> PartBuilder<'r> {
    /// Add a component to the part
    pub fn with<T: Component>(self, component: T) -> Result<Self, EcsError> {
        self.rocket.world.add_component(self.entity, component)?;
        Ok(self)
    }

    /// Entity being assembled
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Attach the part to the rocket
    pub fn attach(mut self) -> Result<Entity, EcsError> {
        self.rocket.attach_part(self.entity)?;
        self.attached = true;
        Ok(self.entity)
    }
}

impl Drop for PartBuilder<'_> {
    fn drop(&mut self) {
        if !self.attached && self.rocket.world.destroy_entity(self.entity) {
            log::debug!("discarded unattached part {}", self.entity);
        }
    }
}
