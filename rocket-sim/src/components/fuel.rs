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
//! Fuel tank
//!
//! A tank starts full and only ever drains. During a rocket frame the
//! engines first accumulate a fuel demand, then the tanks draw it down in
//! registration order.

use crate::ecs::{Component, UpdateContext};

/// Fuel tank of one part
#[derive(Debug, Clone, PartialEq)]
pub struct FuelComponent {
    max_amount: f64,
    remaining_amount: f64,
}

impl FuelComponent {
    /// Create a full tank holding `max_amount`
    ///
    /// Negative or non-finite capacities are saturated to an empty tank.
    pub fn new(max_amount: f64) -> Self {
        let max_amount = if max_amount.is_finite() {
            max_amount.max(0.0)
        } else {
            log::warn!("invalid tank capacity {}, tank will be empty", max_amount);
            0.0
        };

        FuelComponent {
            max_amount,
            remaining_amount: max_amount,
        }
    }

    /// Capacity of the tank
    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    /// Fuel left in the tank
    pub fn remaining_amount(&self) -> f64 {
        self.remaining_amount
    }

    /// Whether the tank is dry
    pub fn is_empty(&self) -> bool {
        self.remaining_amount == 0.0
    }

    /// Remaining fuel as a fraction of capacity (0 for a zero-capacity tank)
    pub fn fill_fraction(&self) -> f64 {
        if self.max_amount > 0.0 {
            self.remaining_amount / self.max_amount
        } else {
            0.0
        }
    }

    /// Draw `amount` from the tank and return how much was actually drawn
    ///
    /// The level is clamped at zero and never rises: non-positive and
    /// non-finite amounts are ignored, as is any call on an empty tank.
    pub fn consume(&mut self, amount: f64) -> f64 {
        if self.remaining_amount <= 0.0 || !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let before = self.remaining_amount;
        self.remaining_amount = (before - amount).clamp(0.0, self.max_amount);
        before - self.remaining_amount
    }
}

impl Component for FuelComponent {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if *ctx.fuel_demand <= 0.0 {
            return;
        }
        let drawn = self.consume(*ctx.fuel_demand);
        *ctx.fuel_demand -= drawn;
        if self.is_empty() && drawn > 0.0 {
            log::debug!("fuel tank on {} ran dry", ctx.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tank_is_full() {
        let tank = FuelComponent::new(10.0);
        assert_eq!(tank.max_amount(), 10.0);
        assert_eq!(tank.remaining_amount(), 10.0);
        assert_eq!(tank.fill_fraction(), 1.0);
        assert!(!tank.is_empty());
    }

    #[test]
    fn test_consume_clamps_at_zero() {
        let mut tank = FuelComponent::new(3.0);
        assert_eq!(tank.consume(2.0), 2.0);
        assert_eq!(tank.consume(2.0), 1.0);
        assert_eq!(tank.remaining_amount(), 0.0);
        assert!(tank.is_empty());
    }

    #[test]
    fn test_empty_tank_ignores_consume() {
        let mut tank = FuelComponent::new(1.0);
        tank.consume(5.0);
        assert!(tank.is_empty());
        assert_eq!(tank.consume(1.0), 0.0);
        assert_eq!(tank.remaining_amount(), 0.0);
    }

    #[test]
    fn test_level_never_rises() {
        let mut tank = FuelComponent::new(10.0);
        tank.consume(4.0);
        assert_eq!(tank.consume(-3.0), 0.0);
        assert_eq!(tank.consume(f64::NAN), 0.0);
        assert_eq!(tank.consume(f64::NEG_INFINITY), 0.0);
        assert_eq!(tank.remaining_amount(), 6.0);
    }

    #[test]
    fn test_level_is_non_increasing_over_any_sequence() {
        let mut tank = FuelComponent::new(25.0);
        let mut previous = tank.remaining_amount();
        for step in 0..100 {
            tank.consume(((step * 37) % 11) as f64 * 0.3 - 1.0);
            assert!(tank.remaining_amount() <= previous);
            assert!(tank.remaining_amount() >= 0.0);
            previous = tank.remaining_amount();
        }
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(FuelComponent::new(-5.0).is_empty());
        assert!(FuelComponent::new(f64::NAN).is_empty());
        assert_eq!(FuelComponent::new(0.0).fill_fraction(), 0.0);
    }
}
