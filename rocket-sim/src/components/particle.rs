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
//! Particle emitters
//!
//! The core does not render particles. An emitter only tracks how long it
//! has been alive and how strongly it should be emitting, and the host reads
//! that back to drive its own effect named by [`ParticleComponent::name`].

use crate::ecs::{Component, UpdateContext};

/// How an emitter decides its intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleMode {
    /// Always on at full intensity
    #[default]
    Ambient,
    /// Follows the throttle while there is fuel, dark otherwise
    Exhaust,
}

/// Named visual effect attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleComponent {
    name: String,
    mode: ParticleMode,
    intensity: f64,
    elapsed: f64,
}

impl ParticleComponent {
    /// Always-on emitter, e.g. `"Sparkle"`
    pub fn ambient(name: impl Into<String>) -> Self {
        Self::new(name, ParticleMode::Ambient)
    }

    /// Engine plume, e.g. `"Fire"`
    pub fn exhaust(name: impl Into<String>) -> Self {
        Self::new(name, ParticleMode::Exhaust)
    }

    /// Emitter with an explicit mode
    pub fn new(name: impl Into<String>, mode: ParticleMode) -> Self {
        let intensity = match mode {
            ParticleMode::Ambient => 1.0,
            ParticleMode::Exhaust => 0.0,
        };
        ParticleComponent {
            name: name.into(),
            mode,
            intensity,
            elapsed: 0.0,
        }
    }

    /// Effect name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intensity policy
    pub fn mode(&self) -> ParticleMode {
        self.mode
    }

    /// Emission strength in [0, 1]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Seconds of simulated time this emitter has been updated for
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the host should show the effect
    pub fn is_emitting(&self) -> bool {
        self.intensity > 0.0
    }
}

impl Component for ParticleComponent {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if ctx.dt.is_finite() && ctx.dt > 0.0 {
            self.elapsed += ctx.dt;
        }

        self.intensity = match self.mode {
            ParticleMode::Ambient => 1.0,
            ParticleMode::Exhaust if ctx.has_fuel => ctx.throttle.clamp(0.0, 1.0),
            ParticleMode::Exhaust => 0.0,
        };
    }
}
