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
//! Link between an entity and its host physics body

use crate::ecs::Component;
use crate::physics::BodyHandle;

/// The physics body an entity's requests are issued against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryComponent {
    body: BodyHandle,
}

impl GeometryComponent {
    /// Bind the entity to a host body
    pub fn new(body: BodyHandle) -> Self {
        GeometryComponent { body }
    }

    /// Host body handle
    pub fn body(&self) -> BodyHandle {
        self.body
    }
}

impl Component for GeometryComponent {}
