//! Entity Component System (ECS) core
//!
//! This module provides the scaffolding the rocket rig is built on:
//! - Generational entity handles
//! - A compile-time component enumeration with a fixed-size table per entity
//! - An entity arena owning every component
//! - Per-type component systems driving batched updates

mod entity;
mod component;
mod system;
mod world;

pub use entity::{Entity, EntityId};
pub use component::{Component, ComponentKind, ComponentSlot, ComponentTable, Slotted, UpdateContext};
pub use system::{ComponentSystem, FrameContext, SiblingResolver, Siblings};
pub use world::World;
