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
//! Engine
//!
//! Each frame an engine reads the throttle level and the aggregate fuel
//! availability. When both allow it, it requests a continuous force of
//! `direction × throttle × max_thrust` on its body and books
//! `fuel_consumption_rate × throttle × dt` of fuel demand for the tanks to
//! draw later in the same frame.
//!
//! Fuel availability is sampled once before the engines run, so an engine
//! either fires for the whole frame or not at all.

use crate::ecs::{Component, UpdateContext};
use crate::physics::ApplyMode;
use glam::DVec3;

/// Default thrust direction in body space
pub const DEFAULT_THRUST_DIRECTION: DVec3 = DVec3::Y;

/// Engine of one part
#[derive(Debug, Clone, PartialEq)]
pub struct ThrustComponent {
    max_thrust: f64,
    fuel_consumption_rate: f64,
    direction: DVec3,
    output: DVec3,
}

impl ThrustComponent {
    /// Create an engine pushing along +Y
    ///
    /// Negative or non-finite values are saturated to zero.
    pub fn new(max_thrust: f64, fuel_consumption_rate: f64) -> Self {
        ThrustComponent {
            max_thrust: non_negative(max_thrust, "max thrust"),
            fuel_consumption_rate: non_negative(fuel_consumption_rate, "fuel consumption rate"),
            direction: DEFAULT_THRUST_DIRECTION,
            output: DVec3::ZERO,
        }
    }

    /// Use a different thrust direction (normalised; zero vectors keep +Y)
    pub fn with_direction(mut self, direction: DVec3) -> Self {
        self.direction = direction.try_normalize().unwrap_or(DEFAULT_THRUST_DIRECTION);
        self
    }

    /// Full-throttle force magnitude
    pub fn max_thrust(&self) -> f64 {
        self.max_thrust
    }

    /// Fuel drawn per second at full throttle
    pub fn fuel_consumption_rate(&self) -> f64 {
        self.fuel_consumption_rate
    }

    /// Unit thrust direction
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Force computed in the last update (zero when the engine did not fire)
    pub fn output(&self) -> DVec3 {
        self.output
    }

    /// Whether the engine fired in the last update
    pub fn is_firing(&self) -> bool {
        self.output != DVec3::ZERO
    }
}

fn non_negative(value: f64, what: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("invalid {} {}, using 0", what, value);
        0.0
    }
}

impl Component for ThrustComponent {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let throttle = ctx.throttle.clamp(0.0, 1.0);
        if throttle <= 0.0 || !ctx.has_fuel {
            self.output = DVec3::ZERO;
            return;
        }

        self.output = self.direction * (throttle * self.max_thrust);
        *ctx.fuel_demand += self.fuel_consumption_rate * throttle * ctx.dt;

        if let Some(body) = ctx.body {
            ctx.physics.apply_force(body, self.output, ApplyMode::Continuous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::physics::{BodyHandle, PhysicsRequest, RecordingPhysics};

    fn run(
        engine: &mut ThrustComponent,
        throttle: f64,
        has_fuel: bool,
        body: Option<BodyHandle>,
        physics: &mut RecordingPhysics,
    ) -> f64 {
        let mut demand = 0.0;
        let mut ctx = UpdateContext {
            dt: 0.5,
            owner: Entity::new(0, 0),
            body,
            throttle,
            has_fuel,
            fuel_demand: &mut demand,
            physics,
        };
        engine.update(&mut ctx);
        demand
    }

    #[test]
    fn test_fires_proportionally_to_throttle() {
        let mut engine = ThrustComponent::new(20.0, 2.0);
        let mut physics = RecordingPhysics::new();

        let demand = run(&mut engine, 0.5, true, Some(BodyHandle(1)), &mut physics);

        assert_eq!(engine.output(), DVec3::new(0.0, 10.0, 0.0));
        assert_eq!(demand, 0.5); // 2.0 * 0.5 * 0.5
        assert_eq!(
            physics.requests(),
            &[PhysicsRequest::Force {
                body: BodyHandle(1),
                force: DVec3::new(0.0, 10.0, 0.0),
                mode: ApplyMode::Continuous,
            }]
        );
    }

    #[test]
    fn test_no_force_without_fuel() {
        let mut engine = ThrustComponent::new(20.0, 2.0);
        let mut physics = RecordingPhysics::new();

        let demand = run(&mut engine, 1.0, false, Some(BodyHandle(1)), &mut physics);

        assert!(!engine.is_firing());
        assert_eq!(demand, 0.0);
        assert!(physics.requests().is_empty());
    }

    #[test]
    fn test_closed_throttle_clears_previous_output() {
        let mut engine = ThrustComponent::new(20.0, 2.0);
        let mut physics = RecordingPhysics::new();
        run(&mut engine, 1.0, true, None, &mut physics);
        assert!(engine.is_firing());

        run(&mut engine, 0.0, true, None, &mut physics);
        assert_eq!(engine.output(), DVec3::ZERO);
    }

    #[test]
    fn test_without_body_still_books_demand() {
        let mut engine = ThrustComponent::new(4.0, 1.0);
        let mut physics = RecordingPhysics::new();

        let demand = run(&mut engine, 1.0, true, None, &mut physics);

        assert_eq!(demand, 0.5);
        assert!(physics.requests().is_empty());
    }

    #[test]
    fn test_custom_direction_is_normalised() {
        let engine = ThrustComponent::new(1.0, 1.0).with_direction(DVec3::new(0.0, 0.0, -3.0));
        assert_eq!(engine.direction(), DVec3::NEG_Z);

        let fallback = ThrustComponent::new(1.0, 1.0).with_direction(DVec3::ZERO);
        assert_eq!(fallback.direction(), DVec3::Y);
    }

    #[test]
    fn test_invalid_constants_saturate() {
        let engine = ThrustComponent::new(-10.0, f64::NAN);
        assert_eq!(engine.max_thrust(), 0.0);
        assert_eq!(engine.fuel_consumption_rate(), 0.0);
    }
}
