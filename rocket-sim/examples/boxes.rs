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
//! Box-jumping example
//!
//! Spawns three boxes, selects one by "clicking" its body and makes it jump.

use rocket_sim::game::{BoxGame, BoxSpec};
use rocket_sim::physics::{BodyHandle, PhysicsRequest, RecordingPhysics};
use rocket_sim::EcsError;

fn main() -> Result<(), EcsError> {
    env_logger::init();

    println!("Rocket Sim - Box Example");
    println!("========================\n");

    let mut game = BoxGame::new();
    game.spawn(BoxSpec::new(BodyHandle(1)).controlled())?;
    game.spawn(BoxSpec::new(BodyHandle(2)).with_particle("Sparkle"))?;
    game.spawn(BoxSpec::new(BodyHandle(3)).controlled().with_particle("Sparkle"))?;
    println!("Spawned {} boxes", game.boxes().len());

    let mut physics = RecordingPhysics::new();
    let jumped = game.jump_boxes(&mut physics);
    println!("Everyone jump: {} boxes jumped", jumped);

    for body in [BodyHandle(2), BodyHandle(3)] {
        match game.control_entity_with(body) {
            Some(entity) => println!("Clicked {}: now controlling {}", body, entity),
            None => println!("Clicked {}: not controllable", body),
        }
    }
    game.jump_controlled(&mut physics);

    for (i, timestamp) in [0.0, 0.5, 1.0].iter().enumerate() {
        let dt = game.update_at(*timestamp, &mut physics);
        println!("Frame {}: dt = {:.2}s", i, dt);
    }

    println!("\nPhysics requests:");
    for request in physics.requests() {
        if let PhysicsRequest::Force { body, force, mode } = request {
            println!("  {} <- {} ({:?})", body, force, mode);
        }
    }
    Ok(())
}
