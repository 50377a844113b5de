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
//! Rocket configuration files
//!
//! A rocket can be described in TOML instead of being assembled in code:
//!
//! ```toml
//! version = "0.1.0"
//!
//! [throttle]
//! change_rate = 0.5
//!
//! [[part]]
//! body = 1
//! fuel = { capacity = 10.0 }
//! thrust = { max_thrust = 20.0, fuel_consumption_rate = 1.0 }
//!
//! [[part]]
//! body = 2
//! torque = { magnitude = 0.5 }
//! ```
//!
//! The `version` field names the file format. It is checked against
//! [`CONFIG_FORMAT_VERSION`] with the usual semver rule: the major version
//! must match, and below 1.0 the minor version must match too.

use crate::components::{
    ParticleMode, DEFAULT_SAS_DAMPING, DEFAULT_THROTTLE_CHANGE_RATE, DEFAULT_THRUST_DIRECTION,
};
use crate::error::ConfigError;
use crate::physics::BodyHandle;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format version written by and accepted by this crate
pub const CONFIG_FORMAT_VERSION: &str = "0.1.0";

fn default_version() -> String {
    CONFIG_FORMAT_VERSION.to_string()
}

fn default_change_rate() -> f64 {
    DEFAULT_THROTTLE_CHANGE_RATE
}

fn default_direction() -> [f64; 3] {
    DEFAULT_THRUST_DIRECTION.to_array()
}

fn default_sas_damping() -> f64 {
    DEFAULT_SAS_DAMPING
}

/// A whole rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RocketConfig {
    /// File format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Aggregate throttle lever
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Parts in attach order
    #[serde(default, rename = "part")]
    pub parts: Vec<PartConfig>,
}

/// Throttle lever settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Lever speed in full-scale units per second
    #[serde(default = "default_change_rate")]
    pub change_rate: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        ThrottleConfig {
            change_rate: DEFAULT_THROTTLE_CHANGE_RATE,
        }
    }
}

/// One part and the components it carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartConfig {
    /// Host physics body, if the part has geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyHandle>,

    /// Part-local throttle lever overriding the aggregate one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle: Option<ThrottleConfig>,

    /// Fuel tank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelConfig>,

    /// Engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrust: Option<ThrustConfig>,

    /// Reaction wheel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torque: Option<TorqueConfig>,

    /// Visual emitter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle: Option<ParticleConfig>,
}

/// Fuel tank settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelConfig {
    /// Tank capacity; tanks start full
    pub capacity: f64,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrustConfig {
    /// Force at full throttle
    pub max_thrust: f64,
    /// Fuel per second at full throttle
    pub fuel_consumption_rate: f64,
    /// Body-space thrust direction
    #[serde(default = "default_direction")]
    pub direction: [f64; 3],
}

/// Reaction wheel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TorqueConfig {
    /// Torque magnitude, saturated to [0, 1]
    pub magnitude: f64,
    /// Angular damping used for attitude hold
    #[serde(default = "default_sas_damping")]
    pub angular_damping: f64,
}

/// Particle emitter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleConfig {
    /// Effect name the host renders
    pub name: String,
    /// Intensity policy
    #[serde(default)]
    pub mode: ParticleMode,
}

impl Default for RocketConfig {
    fn default() -> Self {
        RocketConfig {
            version: default_version(),
            throttle: ThrottleConfig::default(),
            parts: Vec::new(),
        }
    }
}

impl RocketConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RocketConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(
            "loaded rocket config from {} ({} parts)",
            path.display(),
            config.parts.len()
        );
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check the format version and every physical constant
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_version(&self.version)?;
        non_negative("throttle.change_rate", self.throttle.change_rate)?;

        for (index, part) in self.parts.iter().enumerate() {
            let field = |name: &str| format!("part[{}].{}", index, name);

            if let Some(throttle) = &part.throttle {
                non_negative(&field("throttle.change_rate"), throttle.change_rate)?;
            }
            if let Some(fuel) = &part.fuel {
                non_negative(&field("fuel.capacity"), fuel.capacity)?;
            }
            if let Some(thrust) = &part.thrust {
                non_negative(&field("thrust.max_thrust"), thrust.max_thrust)?;
                non_negative(&field("thrust.fuel_consumption_rate"), thrust.fuel_consumption_rate)?;
                let direction = thrust.direction;
                if direction.iter().any(|c| !c.is_finite()) || direction == [0.0; 3] {
                    return Err(ConfigError::InvalidValue {
                        field: field("thrust.direction"),
                        reason: format!("{:?} is not a usable direction", direction),
                    });
                }
            }
            if let Some(torque) = &part.torque {
                non_negative(&field("torque.magnitude"), torque.magnitude)?;
                non_negative(&field("torque.angular_damping"), torque.angular_damping)?;
            }
            if let Some(particle) = &part.particle {
                if particle.name.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: field("particle.name"),
                        reason: "effect name is empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{} must be a finite, non-negative number", value),
        })
    }
}

fn check_version(found: &str) -> Result<(), ConfigError> {
    let parse = |version: &str| {
        Version::parse(version).map_err(|source| ConfigError::InvalidVersion {
            version: version.to_string(),
            source,
        })
    };
    let found_ver = parse(found)?;
    let supported_ver = parse(CONFIG_FORMAT_VERSION)?;

    if is_version_compatible(&found_ver, &supported_ver) {
        Ok(())
    } else {
        Err(ConfigError::IncompatibleVersion {
            found: found.to_string(),
            supported: CONFIG_FORMAT_VERSION.to_string(),
        })
    }
}

/// Whether a file written for `found` can be read by a crate supporting `supported`
pub fn is_version_compatible(found: &Version, supported: &Version) -> bool {
    if found.major != supported.major {
        return false;
    }

    if found.major != 0 {
        found.minor <= supported.minor
    } else {
        // Below 1.0 every minor bump is breaking
        found.minor == supported.minor
    }
}
