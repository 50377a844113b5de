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
//! Batched per-type component updates
//!
//! A [`ComponentSystem`] is a registry of the entities whose component of
//! one concrete type it drives. It owns no components: the world owns them,
//! the system only remembers entity handles in registration order.
//!
//! Order *within* a system is registration order. Order *across* systems is
//! decided by whoever owns them (see [`Rocket::update`](crate::rocket::Rocket::update)).

use crate::ecs::{Component, Entity, UpdateContext, World};
use crate::physics::{BodyHandle, PhysicsBackend};
use std::fmt;
use std::marker::PhantomData;

/// State of an entity's other components that an update may read
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Siblings {
    /// Physics body the entity is bound to
    pub body: Option<BodyHandle>,
    /// The entity's own throttle level, overriding the aggregate one
    pub throttle: Option<f64>,
}

/// Reads [`Siblings`] out of the world for one entity
///
/// Supplied by whoever owns the systems, since only the owner knows which
/// component kinds carry that state.
pub type SiblingResolver = fn(&World, Entity) -> Siblings;

fn no_siblings(_: &World, _: Entity) -> Siblings {
    Siblings::default()
}

/// Frame-wide state shared by every component updated in one pass
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub dt: f64,
    /// Aggregate throttle level in [0, 1]
    pub throttle: f64,
    /// Whether the aggregate still has fuel
    pub has_fuel: bool,
    /// Fuel requested by engines this frame and not yet drawn
    pub fuel_demand: f64,
    /// Host physics engine
    pub physics: &'a mut dyn PhysicsBackend,
    /// Sibling lookup run before each component is updated
    pub siblings: SiblingResolver,
}

impl<'a> FrameContext<'a> {
    /// A frame with no aggregate: throttle closed, unlimited fuel, no
    /// sibling state
    pub fn standalone(dt: f64, physics: &'a mut dyn PhysicsBackend) -> Self {
        FrameContext {
            dt,
            throttle: 0.0,
            has_fuel: true,
            fuel_demand: 0.0,
            physics,
            siblings: no_siblings,
        }
    }

    /// Use `resolver` to fill in each component's sibling state
    pub fn with_siblings(mut self, resolver: SiblingResolver) -> Self {
        self.siblings = resolver;
        self
    }
}

/// Registry of all live components of type `T` within one scope
pub struct ComponentSystem<T: Component> {
    entities: Vec<Entity>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Component> ComponentSystem<T> {
    /// Create an empty system
    pub fn new() -> Self {
        ComponentSystem {
            entities: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Register the entity's `T`, if it has one
    ///
    /// Returns true only when a new registration was made; registering the
    /// same entity twice is a no-op.
    pub fn add_component_found_in(&mut self, world: &World, entity: Entity) -> bool {
        world.has_component::<T>(entity) && self.add(entity)
    }

    /// Register an entity without checking the world
    ///
    /// Idempotent: returns false if the entity is already registered.
    pub fn add(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Unregister an entity, keeping the order of the others
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|&e| e == entity) {
            Some(index) => {
                self.entities.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the entity is registered
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registered entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Unregister everything
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Drop registrations whose entity died or lost its `T`
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self, world: &World) -> usize {
        let before = self.entities.len();
        self.entities.retain(|&entity| world.has_component::<T>(entity));
        let removed = before - self.entities.len();
        if removed > 0 {
            log::warn!(
                "pruned {} stale {} registration(s)",
                removed,
                T::KIND
            );
        }
        removed
    }

    /// Iterate over the registered components in registration order
    pub fn components<'w>(&'w self, world: &'w World) -> impl Iterator<Item = &'w T> + 'w {
        self.entities
            .iter()
            .filter_map(move |&entity| world.component::<T>(entity))
    }

    /// Look up the component registered for an owning entity
    pub fn component_for<'w>(&self, world: &'w World, entity: Entity) -> Option<&'w T> {
        if self.contains(entity) {
            world.component::<T>(entity)
        } else {
            None
        }
    }

    /// Apply `f` to every registered component in registration order
    pub fn for_each_mut(&self, world: &mut World, mut f: impl FnMut(Entity, &mut T)) {
        for &entity in &self.entities {
            if let Some(component) = world.component_mut::<T>(entity) {
                f(entity, component);
            }
        }
    }

    /// Run [`Component::update`] on every registered component
    ///
    /// Sibling state is resolved through [`FrameContext::siblings`] before
    /// each component is borrowed. Entries whose component has disappeared
    /// are skipped.
    pub fn update(&self, world: &mut World, frame: &mut FrameContext<'_>) {
        for &entity in &self.entities {
            let siblings = (frame.siblings)(world, entity);

            let Some(component) = world.component_mut::<T>(entity) else {
                log::trace!("{} has no {} component, skipping", entity, T::KIND);
                continue;
            };

            let mut ctx = UpdateContext {
                dt: frame.dt,
                owner: entity,
                body: siblings.body,
                throttle: siblings.throttle.unwrap_or(frame.throttle),
                has_fuel: frame.has_fuel,
                fuel_demand: &mut frame.fuel_demand,
                physics: &mut *frame.physics,
            };
            component.update(&mut ctx);
        }
    }
}

impl<T: Component> Default for ComponentSystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> Clone for ComponentSystem<T> {
    fn clone(&self) -> Self {
        ComponentSystem {
            entities: self.entities.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Component> fmt::Debug for ComponentSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSystem")
            .field("kind", &T::KIND)
            .field("entities", &self.entities)
            .finish()
    }
}
