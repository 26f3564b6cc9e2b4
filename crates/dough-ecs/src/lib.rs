//! Dough ECS - Entity Component System
//!
//! The registry behind every Dough scene. Entities are generational
//! `(index, generation)` pairs, components live in per-type sparse sets and
//! queries iterate the entities holding a given combination of components.

mod component;
mod entity;
mod error;
mod query;
mod resource;
mod world;

pub use component::Component;
pub use entity::Entity;
pub use error::EcsError;
pub use query::{QueryIter, ReadOnlyWorldQuery, WorldQuery};
pub use world::{EntityMut, World};
