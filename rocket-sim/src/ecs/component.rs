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
//! Components and their typed per-entity storage
//!
//! Every component type the simulation knows about is listed once in the
//! `component_kinds!` invocation below. That single list generates:
//!
//! - [`ComponentKind`], the compile-time enumeration used as a table index
//! - [`ComponentSlot`], the tagged cell an entity stores a component in
//! - a [`Slotted`] impl per component type, giving match-based typed access
//!
//! Lookups are therefore a fixed array index plus an enum match, with no
//! runtime type inspection.

use crate::components::{
    FuelComponent, GeometryComponent, ParticleComponent, PlayerControlComponent,
    ThrottleComponent, ThrustComponent, TorqueComponent,
};
use crate::ecs::Entity;
use crate::physics::{BodyHandle, PhysicsBackend};
use std::fmt;

macro_rules! component_kinds {
    ($($(#[$meta:meta])* $kind:ident => $ty:ty),+ $(,)?) => {
        /// Compile-time enumeration of every component type an entity can carry
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ComponentKind {
            $($(#[$meta])* $kind,)+
        }

        impl ComponentKind {
            /// Every kind, in table order
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$kind,)+];

            /// Number of component kinds (size of an entity's component table)
            pub const COUNT: usize = Self::ALL.len();

            /// Human-readable name
            pub fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$kind => stringify!($kind),)+
                }
            }
        }

        /// Storage cell holding exactly one concrete component
        #[derive(Debug, Clone)]
        pub enum ComponentSlot {
            $($(#[$meta])* $kind($ty),)+
        }

        impl ComponentSlot {
            /// Kind of the component stored in this cell
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(ComponentSlot::$kind(_) => ComponentKind::$kind,)+
                }
            }
        }

        $(
            impl Slotted for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn into_slot(self) -> ComponentSlot {
                    ComponentSlot::$kind(self)
                }

                fn try_from_slot(slot: ComponentSlot) -> Result<Self, ComponentSlot> {
                    match slot {
                        ComponentSlot::$kind(component) => Ok(component),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }

                fn from_slot(slot: &ComponentSlot) -> Option<&Self> {
                    match slot {
                        ComponentSlot::$kind(component) => Some(component),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_slot_mut(slot: &mut ComponentSlot) -> Option<&mut Self> {
                    match slot {
                        ComponentSlot::$kind(component) => Some(component),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

component_kinds! {
    /// Host physics body of the entity
    Geometry => GeometryComponent,
    /// Throttle lever
    Throttle => ThrottleComponent,
    /// Fuel tank
    Fuel => FuelComponent,
    /// Engine
    Thrust => ThrustComponent,
    /// Reaction wheel / attitude control
    Torque => TorqueComponent,
    /// Visual particle emitter
    Particle => ParticleComponent,
    /// Box-jumping player control
    PlayerControl => PlayerControlComponent,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ComponentKind {
    /// Position of this kind in an entity's component table
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Typed conversion between a concrete component and a [`ComponentSlot`]
///
/// Implemented by `component_kinds!` for every built-in component; there is
/// no reason to implement it by hand.
pub trait Slotted: Sized {
    /// Table index of this component type
    const KIND: ComponentKind;

    /// Wrap the component in its slot variant
    fn into_slot(self) -> ComponentSlot;

    /// Unwrap a slot, handing it back unchanged if it holds another kind
    fn try_from_slot(slot: ComponentSlot) -> Result<Self, ComponentSlot>;

    /// Borrow the component if the slot holds this kind
    fn from_slot(slot: &ComponentSlot) -> Option<&Self>;

    /// Mutably borrow the component if the slot holds this kind
    fn from_slot_mut(slot: &mut ComponentSlot) -> Option<&mut Self>;
}

/// Unit of per-entity behaviour and state
///
/// Components hold no rendering knowledge. Their per-frame behaviour lives
/// in [`Component::update`], which a [`ComponentSystem`](crate::ecs::ComponentSystem)
/// calls with everything the component may read about its siblings already
/// resolved into the [`UpdateContext`].
pub trait Component: Slotted + 'static + Send + Sync {
    /// Advance the component by one frame
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}
}

/// Per-component view of the frame handed to [`Component::update`]
///
/// Sibling and aggregate state is copied in before the component is borrowed
/// mutably, so a component never holds a reference into the world.
pub struct UpdateContext<'a> {
    /// Seconds since the previous frame
    pub dt: f64,
    /// Entity that owns the component being updated
    pub owner: Entity,
    /// Physics body of the owner's geometry component, if it has one
    pub body: Option<BodyHandle>,
    /// Throttle level in [0, 1]: the owner's own throttle if it has one,
    /// otherwise the aggregate throttle
    pub throttle: f64,
    /// Whether the aggregate still has fuel (always true without tanks)
    pub has_fuel: bool,
    /// Fuel requested by engines this frame and not yet drawn from a tank
    pub fuel_demand: &'a mut f64,
    /// Host physics engine
    pub physics: &'a mut dyn PhysicsBackend,
}

/// Fixed-size component table of one entity, indexed by [`ComponentKind`]
#[derive(Debug, Clone)]
pub struct ComponentTable {
    slots: [Option<ComponentSlot>; ComponentKind::COUNT],
}

impl ComponentTable {
    /// Create an empty table
    pub fn new() -> Self {
        ComponentTable {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Store a component; hands it back if its kind is already present
    pub fn insert<T: Component>(&mut self, component: T) -> Result<(), T> {
        let slot = &mut self.slots[T::KIND.index()];
        if slot.is_some() {
            return Err(component);
        }
        *slot = Some(component.into_slot());
        Ok(())
    }

    /// Borrow the component of type `T`
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.slots[T::KIND.index()].as_ref().and_then(T::from_slot)
    }

    /// Mutably borrow the component of type `T`
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.slots[T::KIND.index()].as_mut().and_then(T::from_slot_mut)
    }

    /// Take the component of type `T` out of the table
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        let slot = self.slots[T::KIND.index()].take()?;
        T::try_from_slot(slot).ok()
    }

    /// Whether a component of `kind` is present
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Kinds currently present, in table order
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.slots.iter().flatten().map(ComponentSlot::kind)
    }

    /// Number of components present
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the table holds no components
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl Default for ComponentTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_follow_declaration_order() {
        assert_eq!(ComponentKind::COUNT, 7);
        for (index, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
        assert_eq!(ComponentKind::Thrust.to_string(), "Thrust");
    }

    #[test]
    fn test_slot_roundtrip_checks_kind() {
        let slot = FuelComponent::new(10.0).into_slot();
        assert_eq!(slot.kind(), ComponentKind::Fuel);
        assert!(FuelComponent::from_slot(&slot).is_some());
        assert!(ThrustComponent::from_slot(&slot).is_none());

        let slot = ThrustComponent::try_from_slot(slot).unwrap_err();
        let fuel = FuelComponent::try_from_slot(slot).unwrap();
        assert_eq!(fuel.max_amount(), 10.0);
    }

    #[test]
    fn test_table_rejects_second_component_of_same_kind() {
        let mut table = ComponentTable::new();
        assert!(table.insert(FuelComponent::new(10.0)).is_ok());

        let rejected = table.insert(FuelComponent::new(99.0)).unwrap_err();
        assert_eq!(rejected.max_amount(), 99.0);
        assert_eq!(table.get::<FuelComponent>().unwrap().max_amount(), 10.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_typed_access() {
        let mut table = ComponentTable::new();
        table.insert(ThrottleComponent::default()).unwrap();
        table.insert(FuelComponent::new(4.0)).unwrap();

        assert!(table.contains(ComponentKind::Throttle));
        assert!(!table.contains(ComponentKind::Torque));
        assert_eq!(
            table.kinds().collect::<Vec<_>>(),
            vec![ComponentKind::Throttle, ComponentKind::Fuel]
        );

        table.get_mut::<FuelComponent>().unwrap().consume(1.5);
        assert_eq!(table.get::<FuelComponent>().unwrap().remaining_amount(), 2.5);

        let removed = table.remove::<FuelComponent>().unwrap();
        assert_eq!(removed.remaining_amount(), 2.5);
        assert!(table.get::<FuelComponent>().is_none());
        assert!(table.remove::<FuelComponent>().is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = ComponentTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.kinds().count(), 0);
    }
}
