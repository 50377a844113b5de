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
//! Update stages of a rocket frame
//!
//! Stages run strictly one after another in [`UpdateStage::ORDER`]. The
//! order is load-bearing:
//!
//! - the throttle settles before engines read it
//! - engines book fuel demand before tanks are drained
//! - tanks are drained before the next frame samples fuel availability

use std::fmt;

/// One pass over a single component system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpdateStage {
    /// Throttle levers integrate their mode
    Throttle,
    /// Reaction wheels emit torque
    Torque,
    /// Engines emit force and book fuel demand
    Thrust,
    /// Tanks draw the booked demand
    Fuel,
    /// Emitters follow the new state
    Particle,
}

impl UpdateStage {
    /// Fixed execution order within a frame
    pub const ORDER: [UpdateStage; 5] = [
        UpdateStage::Throttle,
        UpdateStage::Torque,
        UpdateStage::Thrust,
        UpdateStage::Fuel,
        UpdateStage::Particle,
    ];

    /// Position of the stage within a frame
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateStage::Throttle => "throttle",
            UpdateStage::Torque => "torque",
            UpdateStage::Thrust => "thrust",
            UpdateStage::Fuel => "fuel",
            UpdateStage::Particle => "particle",
        };
        f.write_str(name)
    }
}
