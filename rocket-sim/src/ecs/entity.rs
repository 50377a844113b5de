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
//! Entity handles
//!
//! An entity is a rigid part of the simulated assembly (a box, a rocket
//! stage). The handle is a slot index into the [`World`](crate::ecs::World)
//! arena plus a generation, so a handle kept by a component system or a
//! part's parent link can never alias an entity created later in the same slot.

use std::fmt;

/// Slot index of an entity inside its world arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw slot index
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw slot index
    pub fn raw(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generational, non-owning handle to an entity
///
/// Handles are `Copy` and cheap to store. Holding one never keeps the
/// entity alive; the world decides liveness by comparing generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
    generation: u32,
}

impl Entity {
    /// Create a handle for the given slot and generation
    pub fn new(id: u64, generation: u32) -> Self {
        Entity {
            id: EntityId::new(id),
            generation,
        }
    }

    /// Slot index of this entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Generation the slot had when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.id.0, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_accessors() {
        let entity = Entity::new(7, 3);
        assert_eq!(entity.id().raw(), 7);
        assert_eq!(entity.id().index(), 7);
        assert_eq!(entity.generation(), 3);
    }

    #[test]
    fn test_generation_distinguishes_handles() {
        assert_eq!(Entity::new(1, 0), Entity::new(1, 0));
        assert_ne!(Entity::new(1, 0), Entity::new(1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::new(4, 2).to_string(), "Entity(4v2)");
        assert_eq!(EntityId::new(9).to_string(), "#9");
    }
}
