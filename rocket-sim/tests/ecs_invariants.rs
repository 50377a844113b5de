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
//! Entity arena and component system invariants

use rocket_sim::components::{
    FuelComponent, GeometryComponent, ThrottleComponent, ThrottleState, ThrustComponent,
};
use rocket_sim::ecs::{ComponentKind, ComponentSystem, FrameContext};
use rocket_sim::physics::{BodyHandle, RecordingPhysics};
use rocket_sim::{EcsError, World};

#[test]
fn test_second_component_of_same_kind_fails() {
    let mut world = World::new();
    let entity = world.create_entity();

    world.add_component(entity, ThrottleComponent::new(0.5)).unwrap();
    let err = world
        .add_component(entity, ThrottleComponent::new(1.0))
        .unwrap_err();

    assert_eq!(
        err,
        EcsError::DuplicateComponentType {
            entity,
            kind: ComponentKind::Throttle
        }
    );
    // The first component is kept untouched
    assert_eq!(
        world.component::<ThrottleComponent>(entity).unwrap().change_rate(),
        0.5
    );
}

#[test]
fn test_stale_handle_never_aliases_new_entity() {
    let mut world = World::new();
    let old = world.create_entity();
    world.add_component(old, FuelComponent::new(1.0)).unwrap();
    assert!(world.destroy_entity(old));
    assert!(!world.destroy_entity(old));

    let new = world.create_entity();
    assert_eq!(new.id(), old.id());
    assert_ne!(new.generation(), old.generation());

    assert!(!world.is_entity_alive(old));
    assert!(world.component::<FuelComponent>(new).is_none());
    assert_eq!(
        world.add_component(old, FuelComponent::new(2.0)),
        Err(EcsError::EntityNotFound(old))
    );
}

#[test]
fn test_destroying_entity_drops_components_and_stops_updates() {
    let mut world = World::new();
    let entities: Vec<_> = (0..3)
        .map(|_| {
            let entity = world.create_entity();
            let mut throttle = ThrottleComponent::new(1.0);
            throttle.set_state(ThrottleState::Up);
            world.add_component(entity, throttle).unwrap();
            entity
        })
        .collect();

    let mut system = ComponentSystem::<ThrottleComponent>::new();
    for &entity in &entities {
        system.add_component_found_in(&world, entity);
    }
    world.destroy_entity(entities[1]);

    let mut physics = RecordingPhysics::new();
    let mut frame = FrameContext::standalone(0.5, &mut physics);
    system.update(&mut world, &mut frame);

    assert_eq!(system.components(&world).count(), 2);
    assert_eq!(system.prune(&world), 1);
    assert_eq!(system.entities(), &[entities[0], entities[2]]);
}

#[test]
fn test_removed_component_is_skipped_by_update() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, FuelComponent::new(3.0)).unwrap();

    let mut tanks = ComponentSystem::<FuelComponent>::new();
    tanks.add_component_found_in(&world, entity);
    let removed = world.remove_component::<FuelComponent>(entity).unwrap();
    assert_eq!(removed.remaining_amount(), 3.0);

    let mut physics = RecordingPhysics::new();
    let mut frame = FrameContext::standalone(1.0, &mut physics);
    frame.fuel_demand = 1.0;
    tanks.update(&mut world, &mut frame);

    assert_eq!(frame.fuel_demand, 1.0);
    assert!(tanks.component_for(&world, entity).is_none());
}

#[test]
fn test_body_lookup_and_kinds() {
    let mut world = World::new();
    let engine = world.create_entity();
    world.add_component(engine, GeometryComponent::new(BodyHandle(40))).unwrap();
    world.add_component(engine, ThrustComponent::new(1.0, 1.0)).unwrap();
    let bare = world.create_entity();

    assert_eq!(world.entity_for_body(BodyHandle(40)), Some(engine));
    assert_eq!(world.entity_for_body(BodyHandle(41)), None);
    assert_eq!(
        world.component_kinds(engine),
        vec![ComponentKind::Geometry, ComponentKind::Thrust]
    );
    assert!(world.component_kinds(bare).is_empty());
}

#[test]
fn test_parent_link_does_not_keep_parent_alive() {
    let mut world = World::new();
    let root = world.create_entity();
    let part = world.create_entity();
    world.set_parent(part, Some(root)).unwrap();
    assert_eq!(world.parent(part), Some(root));

    world.destroy_entity(root);
    assert!(world.is_entity_alive(part));
    assert!(!world.is_entity_alive(world.parent(part).unwrap()));
}
