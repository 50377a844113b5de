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
//! Box-jumping scene
//!
//! The simpler scene the rocket grew out of: a handful of boxes, some of
//! them player-controlled, some with a sparkle effect. Clicking a box hands
//! control to it; a jump kicks every controllable box (or just the selected
//! one) upwards.

use crate::clock::FrameClock;
use crate::components::{GeometryComponent, ParticleComponent, PlayerControlComponent};
use crate::ecs::{ComponentSystem, Entity, FrameContext, World};
use crate::error::EcsError;
use crate::physics::{BodyHandle, PhysicsBackend};

/// Description of one box to spawn
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    /// Host body of the box
    pub body: BodyHandle,
    /// Jump control, if the player may drive this box
    pub control: Option<PlayerControlComponent>,
    /// Name of an always-on effect, e.g. `"Sparkle"`
    pub particle: Option<String>,
}

impl BoxSpec {
    /// A plain box with no control and no effect
    pub fn new(body: BodyHandle) -> Self {
        BoxSpec {
            body,
            control: None,
            particle: None,
        }
    }

    /// Make the box player-controlled with the default jump
    pub fn controlled(mut self) -> Self {
        self.control = Some(PlayerControlComponent::default());
        self
    }

    /// Give the box an ambient effect
    pub fn with_particle(mut self, name: impl Into<String>) -> Self {
        self.particle = Some(name.into());
        self
    }
}

/// The box scene and its systems
#[derive(Debug, Default)]
pub struct BoxGame {
    world: World,
    boxes: Vec<Entity>,
    control_system: ComponentSystem<PlayerControlComponent>,
    particle_system: ComponentSystem<ParticleComponent>,
    controlled: Option<Entity>,
    clock: FrameClock,
}

impl BoxGame {
    /// Empty scene
    pub fn new() -> Self {
        BoxGame::default()
    }

    /// Spawn a box and register its components
    pub fn spawn(&mut self, spec: BoxSpec) -> Result<Entity, EcsError> {
        let entity = self.world.create_entity();
        if let Err(err) = self.populate(entity, spec) {
            self.world.destroy_entity(entity);
            return Err(err);
        }

        self.control_system.add_component_found_in(&self.world, entity);
        self.particle_system.add_component_found_in(&self.world, entity);
        self.boxes.push(entity);
        Ok(entity)
    }

    fn populate(&mut self, entity: Entity, spec: BoxSpec) -> Result<(), EcsError> {
        self.world.add_component(entity, GeometryComponent::new(spec.body))?;
        if let Some(control) = spec.control {
            self.world.add_component(entity, control)?;
        }
        if let Some(name) = spec.particle {
            self.world.add_component(entity, ParticleComponent::ambient(name))?;
        }
        Ok(())
    }

    /// Boxes in spawn order
    pub fn boxes(&self) -> &[Entity] {
        &self.boxes
    }

    /// Read access to the scene's entities
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The box selected by the last successful hit test
    pub fn controlled(&self) -> Option<Entity> {
        self.controlled
    }

    /// Hand control to the box owning `body`
    ///
    /// Only player-controllable boxes can be selected; anything else leaves
    /// the current selection alone and returns `None`.
    pub fn control_entity_with(&mut self, body: BodyHandle) -> Option<Entity> {
        let entity = self.world.entity_for_body(body)?;
        if !self.control_system.contains(entity) {
            log::debug!("{} is not controllable", body);
            return None;
        }
        self.controlled = Some(entity);
        Some(entity)
    }

    /// Make every controllable box jump; returns how many did
    pub fn jump_boxes(&self, physics: &mut dyn PhysicsBackend) -> usize {
        self.control_system
            .entities()
            .iter()
            .filter(|&&entity| self.jump(entity, physics))
            .count()
    }

    /// Make the selected box jump
    pub fn jump_controlled(&self, physics: &mut dyn PhysicsBackend) -> bool {
        self.controlled
            .map_or(false, |entity| self.jump(entity, physics))
    }

    fn jump(&self, entity: Entity, physics: &mut dyn PhysicsBackend) -> bool {
        let body = self
            .world
            .component::<GeometryComponent>(entity)
            .map(GeometryComponent::body);
        match (self.control_system.component_for(&self.world, entity), body) {
            (Some(control), Some(body)) => {
                control.jump(body, physics);
                true
            }
            _ => false,
        }
    }

    /// Advance the scene to the absolute frame timestamp `seconds`
    pub fn update_at(&mut self, seconds: f64, physics: &mut dyn PhysicsBackend) -> f64 {
        let dt = self.clock.tick(seconds);
        let mut frame = FrameContext::standalone(dt, physics);
        self.particle_system.update(&mut self.world, &mut frame);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::RecordingPhysics;
    use glam::DVec3;

    fn scene() -> (BoxGame, Vec<Entity>) {
        let mut game = BoxGame::new();
        let boxes = vec![
            game.spawn(BoxSpec::new(BodyHandle(1)).controlled()).unwrap(),
            game.spawn(BoxSpec::new(BodyHandle(2)).with_particle("Sparkle")).unwrap(),
            game.spawn(BoxSpec::new(BodyHandle(3)).controlled().with_particle("Sparkle"))
                .unwrap(),
        ];
        (game, boxes)
    }

    #[test]
    fn test_jump_kicks_only_controllable_boxes() {
        let (game, _) = scene();
        let mut physics = RecordingPhysics::new();

        assert_eq!(game.jump_boxes(&mut physics), 2);
        assert_eq!(physics.impulses(BodyHandle(1)), vec![DVec3::new(0.0, 5.0, 0.0)]);
        assert!(physics.impulses(BodyHandle(2)).is_empty());
        assert_eq!(physics.impulses(BodyHandle(3)).len(), 1);
    }

    #[test]
    fn test_selection_by_hit_test() {
        let (mut game, boxes) = scene();
        let mut physics = RecordingPhysics::new();
        assert!(!game.jump_controlled(&mut physics));

        assert_eq!(game.control_entity_with(BodyHandle(3)), Some(boxes[2]));
        // Not controllable: selection unchanged
        assert_eq!(game.control_entity_with(BodyHandle(2)), None);
        assert_eq!(game.control_entity_with(BodyHandle(99)), None);
        assert_eq!(game.controlled(), Some(boxes[2]));

        assert!(game.jump_controlled(&mut physics));
        assert_eq!(physics.impulses(BodyHandle(3)).len(), 1);
        assert!(physics.impulses(BodyHandle(1)).is_empty());
    }

    #[test]
    fn test_update_advances_particles() {
        let (mut game, boxes) = scene();
        let mut physics = RecordingPhysics::new();

        game.update_at(10.0, &mut physics);
        game.update_at(10.5, &mut physics);

        let sparkle = game.world().component::<ParticleComponent>(boxes[1]).unwrap();
        assert_eq!(sparkle.elapsed(), 0.5);
        assert!(sparkle.is_emitting());
    }
}
