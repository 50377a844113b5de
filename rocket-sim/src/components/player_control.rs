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
//! Player control for the box game

use crate::ecs::Component;
use crate::physics::{ApplyMode, BodyHandle, PhysicsBackend};
use glam::DVec3;

/// Upward kick given by a jump
pub const DEFAULT_JUMP_IMPULSE: DVec3 = DVec3::new(0.0, 5.0, 0.0);

/// Marks an entity as player-controllable and holds its jump impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerControlComponent {
    impulse: DVec3,
}

impl PlayerControlComponent {
    /// Control with a custom jump impulse
    pub fn new(impulse: DVec3) -> Self {
        PlayerControlComponent { impulse }
    }

    /// Impulse applied by a jump
    pub fn impulse(&self) -> DVec3 {
        self.impulse
    }

    /// Kick the body upwards with an instantaneous impulse
    pub fn jump(&self, body: BodyHandle, physics: &mut dyn PhysicsBackend) {
        log::debug!("{} jumps with impulse {}", body, self.impulse);
        physics.apply_force(body, self.impulse, ApplyMode::Impulse);
    }
}

impl Default for PlayerControlComponent {
    fn default() -> Self {
        PlayerControlComponent::new(DEFAULT_JUMP_IMPULSE)
    }
}

impl Component for PlayerControlComponent {}
