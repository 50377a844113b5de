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
//! Launch example
//!
//! Flies a two-part rocket against a tiny point-mass "host engine" until the
//! tank runs dry. Pass a TOML file to fly your own rocket:
//!
//! ```text
//! RUST_LOG=debug cargo run --example launch -- my_rocket.toml
//! ```

use glam::{DQuat, DVec3};
use rocket_sim::components::{ThrottleState, TorqueAxis};
use rocket_sim::config::RocketConfig;
use rocket_sim::input::InputEvent;
use rocket_sim::physics::{ApplyMode, BodyHandle, PhysicsBackend};
use rocket_sim::{Rocket, SimError};
use std::collections::HashMap;

const DEFAULT_ROCKET: &str = r#"
version = "0.1.0"

[throttle]
change_rate = 0.5

[[part]]
body = 1
fuel = { capacity = 40.0 }
thrust = { max_thrust = 15.0, fuel_consumption_rate = 4.0 }
particle = { name = "Fire", mode = "exhaust" }

[[part]]
body = 1
torque = { magnitude = 0.5 }
"#;

const GRAVITY: DVec3 = DVec3::new(0.0, -9.81, 0.0);
const MASS: f64 = 1.0;

/// Every body is a unit point mass; forces are summed per frame
#[derive(Default)]
struct PointMasses {
    forces: HashMap<BodyHandle, DVec3>,
    velocity: HashMap<BodyHandle, DVec3>,
    position: HashMap<BodyHandle, DVec3>,
    damping: HashMap<BodyHandle, f64>,
}

impl PointMasses {
    fn step(&mut self, dt: f64) {
        for (body, velocity) in self.velocity.iter_mut() {
            let force = self.forces.remove(body).unwrap_or(DVec3::ZERO);
            *velocity += (force / MASS + GRAVITY) * dt;
            let position = self.position.entry(*body).or_default();
            *position += *velocity * dt;
            if position.y < 0.0 {
                position.y = 0.0;
                velocity.y = 0.0;
            }
        }
    }

    fn altitude(&self, body: BodyHandle) -> f64 {
        self.position.get(&body).map_or(0.0, |position| position.y)
    }
}

impl PhysicsBackend for PointMasses {
    fn apply_force(&mut self, body: BodyHandle, force: DVec3, mode: ApplyMode) {
        match mode {
            ApplyMode::Continuous => *self.forces.entry(body).or_default() += force,
            ApplyMode::Impulse => *self.velocity.entry(body).or_default() += force / MASS,
        }
        self.velocity.entry(body).or_default();
    }

    fn apply_torque(&mut self, _body: BodyHandle, _axis: DVec3, _magnitude: f64, _mode: ApplyMode) {}

    fn orientation(&self, _body: BodyHandle) -> DQuat {
        DQuat::IDENTITY
    }

    fn angular_damping(&self, body: BodyHandle) -> f64 {
        self.damping.get(&body).copied().unwrap_or(0.0)
    }

    fn set_angular_damping(&mut self, body: BodyHandle, damping: f64) {
        self.damping.insert(body, damping);
    }
}

fn main() -> Result<(), SimError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RocketConfig::load(path)?,
        None => RocketConfig::from_toml_str(DEFAULT_ROCKET)?,
    };
    let mut rocket = Rocket::from_config(&config)?;
    let mut host = PointMasses::default();
    let body = BodyHandle(1);

    println!("Rocket Sim - Launch Example");
    println!("===========================\n");
    println!(
        "{} parts, {:.1} fuel, burning {:.1}/s at full throttle\n",
        rocket.parts().len(),
        rocket.fuel_capacity(),
        rocket.fuel_consumption_rate()
    );

    rocket.handle_input(InputEvent::SetThrottle(ThrottleState::Up), &mut host);
    rocket.handle_input(InputEvent::ToggleSas, &mut host);

    let frame = 1.0 / 60.0;
    for tick in 0..=60 * 30 {
        let now = tick as f64 * frame;
        let dt = rocket.update_at(now, &mut host);
        host.step(dt);

        if tick == 60 * 2 {
            rocket.handle_input(InputEvent::SetThrottle(ThrottleState::Hold), &mut host);
            rocket.handle_input(InputEvent::TorqueKeyDown(TorqueAxis::PitchUp), &mut host);
        }
        if tick % 60 == 0 {
            println!(
                "t={:>4.1}s  throttle={:>4.0}%  fuel={:>5.2}  altitude={:>8.2}",
                now,
                rocket.throttle_percent() * 100.0,
                rocket.remaining_fuel(),
                host.altitude(body)
            );
        }
        if !rocket.has_fuel() && host.altitude(body) == 0.0 {
            break;
        }
    }

    println!("\nTouchdown. Fuel left: {:.2}", rocket.remaining_fuel());
    Ok(())
}
