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
//! Error types
//!
//! Assembly mistakes (a second component of the same kind, a stale handle)
//! are typed errors returned at construction time. Nothing in the per-frame
//! update path can fail: absent components are skipped and out-of-range
//! scalars are clamped.

use crate::ecs::{ComponentKind, Entity};
use thiserror::Error;

/// Errors raised while assembling or editing entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity already carries a component of this kind
    #[error("{entity} already has a {kind} component")]
    DuplicateComponentType {
        /// Entity the component was being added to
        entity: Entity,
        /// Kind that is already present
        kind: ComponentKind,
    },

    /// The handle does not refer to a live entity
    #[error("{0} is not alive")]
    EntityNotFound(Entity),

    /// The entity is alive but is not a part of this aggregate
    #[error("{0} is not a part of this rocket")]
    NotAPart(Entity),
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML could not be parsed into a configuration
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written out as TOML
    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `version` field is not a semantic version
    #[error("invalid config version '{version}': {source}")]
    InvalidVersion {
        /// Version string found in the file
        version: String,
        /// Parser error
        source: semver::Error,
    },

    /// The file was written for an incompatible format version
    #[error("config version {found} is incompatible with supported version {supported}")]
    IncompatibleVersion {
        /// Version found in the file
        found: String,
        /// Version this crate reads
        supported: String,
    },

    /// A physical constant is out of range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Any error the crate can return
#[derive(Debug, Error)]
pub enum SimError {
    /// Entity assembly error
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
