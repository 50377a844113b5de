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
//! World management
//!
//! The World is the entity arena: a contiguous vector of entity records
//! indexed by [`EntityId`], each owning its component table. Destroying an
//! entity drops its components with it.

use crate::components::GeometryComponent;
use crate::ecs::{Component, ComponentKind, ComponentTable, Entity, EntityId};
use crate::error::EcsError;
use crate::physics::BodyHandle;

#[derive(Debug, Clone, Default)]
struct EntityRecord {
    components: ComponentTable,
    parent: Option<Entity>,
}

/// Arena owning every entity of one simulation scope
#[derive(Debug, Clone, Default)]
pub struct World {
    generations: Vec<u32>,
    records: Vec<Option<EntityRecord>>,
    free_ids: Vec<u64>,
    alive: usize,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World::default()
    }

    /// Create a new entity with no components
    ///
    /// Slots freed by [`destroy_entity`](Self::destroy_entity) are reused
    /// with a bumped generation.
    pub fn create_entity(&mut self) -> Entity {
        let id = match self.free_ids.pop() {
            Some(id) => id,
            None => {
                self.generations.push(0);
                self.records.push(None);
                (self.records.len() - 1) as u64
            }
        };

        let index = id as usize;
        self.records[index] = Some(EntityRecord::default());
        self.alive += 1;
        Entity::new(id, self.generations[index])
    }

    /// Destroy an entity together with all of its components
    ///
    /// Returns false if the handle was already stale.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_entity_alive(entity) {
            return false;
        }

        let index = entity.id().index();
        self.records[index] = None;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_ids.push(entity.id().raw());
        self.alive -= 1;
        true
    }

    /// Check if an entity is alive
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        let index = entity.id().index();
        self.generations.get(index) == Some(&entity.generation())
            && matches!(self.records.get(index), Some(Some(_)))
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.alive
    }

    /// Destroy every entity
    ///
    /// Slots are kept and their generations bumped like in
    /// [`destroy_entity`](Self::destroy_entity), so handles issued before the
    /// clear stay stale.
    pub fn clear(&mut self) {
        self.free_ids.clear();
        for (index, record) in self.records.iter_mut().enumerate() {
            if record.take().is_some() {
                self.generations[index] = self.generations[index].wrapping_add(1);
            }
            self.free_ids.push(index as u64);
        }
        self.alive = 0;
    }

    /// Iterate over all alive entities in slot order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_some())
            .map(|(index, _)| Entity::new(index as u64, self.generations[index]))
    }

    fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        if self.generations.get(entity.id().index()) != Some(&entity.generation()) {
            return None;
        }
        self.records.get(entity.id().index())?.as_ref()
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        if self.generations.get(entity.id().index()) != Some(&entity.generation()) {
            return None;
        }
        self.records.get_mut(entity.id().index())?.as_mut()
    }

    /// Attach a component to an entity
    ///
    /// # Errors
    ///
    /// - [`EcsError::EntityNotFound`] if the handle is stale
    /// - [`EcsError::DuplicateComponentType`] if the entity already has a
    ///   component of the same kind; the existing component is kept
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        let record = self
            .record_mut(entity)
            .ok_or(EcsError::EntityNotFound(entity))?;

        record
            .components
            .insert(component)
            .map_err(|_| EcsError::DuplicateComponentType {
                entity,
                kind: T::KIND,
            })
    }

    /// Borrow the component of type `T` attached to an entity
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.record(entity)?.components.get::<T>()
    }

    /// Mutably borrow the component of type `T` attached to an entity
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.record_mut(entity)?.components.get_mut::<T>()
    }

    /// Check whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.component::<T>(entity).is_some()
    }

    /// Detach and return the component of type `T`
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.record_mut(entity)?.components.remove::<T>()
    }

    /// Kinds of the components attached to an entity (empty for stale handles)
    pub fn component_kinds(&self, entity: Entity) -> Vec<ComponentKind> {
        self.record(entity)
            .map(|record| record.components.kinds().collect())
            .unwrap_or_default()
    }

    /// Link an entity to the aggregate it belongs to
    ///
    /// The link is a plain handle: it does not keep the parent alive.
    pub fn set_parent(&mut self, entity: Entity, parent: Option<Entity>) -> Result<(), EcsError> {
        let record = self
            .record_mut(entity)
            .ok_or(EcsError::EntityNotFound(entity))?;
        record.parent = parent;
        Ok(())
    }

    /// Aggregate the entity belongs to, if any
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.record(entity)?.parent
    }

    /// Find the entity whose geometry owns the given physics body
    ///
    /// This is how a host hit-test result is mapped back into the simulation.
    pub fn entity_for_body(&self, body: BodyHandle) -> Option<Entity> {
        self.entities().find(|&entity| {
            self.component::<GeometryComponent>(entity)
                .is_some_and(|geometry| geometry.body() == body)
        })
    }

    /// Raw slot lookup, mainly useful for diagnostics
    pub fn entity_at(&self, id: EntityId) -> Option<Entity> {
        let index = id.index();
        match self.records.get(index) {
            Some(Some(_)) => Some(Entity::new(id.raw(), self.generations[index])),
            _ => None,
        }
    }
}
