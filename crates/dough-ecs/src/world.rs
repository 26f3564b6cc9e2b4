use std::any::TypeId;
use std::collections::HashMap;

use crate::component::{Component, SparseSet};
use crate::entity::{Entity, EntityAllocator};
use crate::error::EcsError;
use crate::query::{QueryIter, ReadOnlyWorldQuery, StorageMap, WorldQuery};
use crate::resource::Resources;

/// The registry: owns every entity, component and resource of a scene.
///
/// All mutations take effect immediately; a query created afterwards sees
/// them.
pub struct World {
    entities: EntityAllocator,
    components: StorageMap,
    resources: Resources,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            components: HashMap::new(),
            resources: Resources::new(),
        }
    }

    // ---- Entity management ----

    /// Allocate a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Allocate a new entity and return a handle for attaching components.
    pub fn spawn_mut(&mut self) -> EntityMut<'_> {
        let entity = self.entities.allocate();
        EntityMut {
            world: self,
            entity,
        }
    }

    /// Destroy an entity together with all of its components.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }
        for storage in self.components.values_mut() {
            storage.remove(entity.index);
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Borrow a handle to a live entity.
    pub fn entity_mut(&mut self, entity: Entity) -> Result<EntityMut<'_>, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        Ok(EntityMut {
            world: self,
            entity,
        })
    }

    // ---- Component management ----

    fn storage<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<SparseSet<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut SparseSet<T> {
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .expect("component storage registered under a foreign TypeId")
    }

    /// Attach `component` to `entity`, replacing any previous value of the
    /// same type, and return the stored value.
    ///
    /// # Panics
    /// If `entity` is not alive.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> &mut T {
        assert!(
            self.entities.is_alive(entity),
            "cannot insert component on dead entity {entity:?}"
        );
        self.storage_mut::<T>().insert(entity.index, component)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.storage::<T>()?.get(entity.index)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.components
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()?
            .get_mut(entity.index)
    }

    /// Like [`get`](Self::get), but reports why the lookup failed.
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        self.get::<T>(entity)
            .ok_or_else(|| EcsError::missing::<T>(entity))
    }

    /// Like [`get_mut`](Self::get_mut), but reports why the lookup failed.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        self.get_mut::<T>(entity)
            .ok_or_else(|| EcsError::missing::<T>(entity))
    }

    /// Detach a component. Returns `true` if it was present.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        self.components
            .get_mut(&TypeId::of::<T>())
            .map_or(false, |storage| storage.remove(entity.index))
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    // ---- Queries ----

    /// Iterate every entity holding all components named by `Q`.
    ///
    /// ```ignore
    /// for (entity, (transform, sprite)) in world.query::<(&Transform, &Sprite)>() {
    ///     // ...
    /// }
    /// ```
    pub fn query<Q: ReadOnlyWorldQuery>(&self) -> QueryIter<'_, Q> {
        QueryIter::new(&self.entities, &self.components)
    }

    /// Iterate with mutable access, e.g. `query_mut::<(&mut Transform, &Movement)>()`.
    ///
    /// # Panics
    /// If `Q` borrows a component type mutably and also accesses it elsewhere.
    pub fn query_mut<Q: WorldQuery>(&mut self) -> QueryIter<'_, Q> {
        QueryIter::new_mut(&self.entities, &mut self.components)
    }

    // ---- Resources ----

    /// Insert a singleton resource, replacing any previous one of its type.
    pub fn insert_resource<T: 'static + Send + Sync>(&mut self, value: T) {
        self.resources.insert(value);
    }

    pub fn resource<T: 'static + Send + Sync>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    pub fn resource_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    pub fn remove_resource<T: 'static + Send + Sync>(&mut self) -> Option<T> {
        self.resources.remove::<T>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-owning handle binding one entity to its world.
///
/// Forwards component access to the [`World`]; dropping the handle leaves
/// the entity untouched.
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityMut<'w> {
    pub fn id(&self) -> Entity {
        self.entity
    }

    pub fn insert<T: Component>(&mut self, component: T) -> &mut T {
        self.world.insert(self.entity, component)
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with<T: Component>(mut self, component: T) -> Self {
        self.insert(component);
        self
    }

    pub fn remove<T: Component>(&mut self) -> bool {
        self.world.remove::<T>(self.entity)
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut::<T>(self.entity)
    }

    pub fn component<T: Component>(&self) -> Result<&T, EcsError> {
        self.world.component::<T>(self.entity)
    }

    pub fn component_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        self.world.component_mut::<T>(self.entity)
    }

    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.entity)
    }
}
