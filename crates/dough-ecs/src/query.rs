#![allow(private_interfaces)]

use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::component::{Component, ComponentStorage, SparseSet};
use crate::entity::{Entity, EntityAllocator};

pub(crate) type StorageMap = HashMap<TypeId, Box<dyn ComponentStorage>>;

/// Query parameter types: `&T`, `&mut T`, `Option<&T>` and tuples of them.
///
/// # Safety
/// Implementors must report every component type they access, and report
/// the mutably accessed ones through [`WorldQuery::mutable_type_ids`].
pub unsafe trait WorldQuery {
    type Item<'w>;

    /// Component types an entity must hold to match.
    fn required_type_ids() -> Vec<TypeId>;

    /// Component types read when present.
    fn optional_type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    /// Component types handed out as `&mut`.
    fn mutable_type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    /// Fetch the item for one entity slot.
    ///
    /// # Safety
    /// `storages` must stay valid for `'w`. If the query hands out mutable
    /// items, the pointer must come from a unique borrow of the map and no
    /// other live reference may alias a component handed out mutably.
    unsafe fn fetch<'w>(storages: NonNull<StorageMap>, index: u32) -> Option<Self::Item<'w>>;
}

/// Queries that only ever read, usable through a shared `&World`.
///
/// # Safety
/// Implementors must not hand out mutable references.
pub unsafe trait ReadOnlyWorldQuery: WorldQuery {}

fn sparse_set<T: Component>(storages: &StorageMap) -> Option<&SparseSet<T>> {
    storages
        .get(&TypeId::of::<T>())
        .and_then(|storage| storage.as_any().downcast_ref::<SparseSet<T>>())
}

unsafe impl<T: Component> WorldQuery for &T {
    type Item<'w> = &'w T;

    fn required_type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    unsafe fn fetch<'w>(storages: NonNull<StorageMap>, index: u32) -> Option<Self::Item<'w>> {
        sparse_set::<T>(storages.as_ref())?.get(index)
    }
}

unsafe impl<T: Component> ReadOnlyWorldQuery for &T {}

unsafe impl<T: Component> WorldQuery for &mut T {
    type Item<'w> = &'w mut T;

    fn required_type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn mutable_type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    unsafe fn fetch<'w>(storages: NonNull<StorageMap>, index: u32) -> Option<Self::Item<'w>> {
        // Only reachable through `World::query_mut`, whose pointer comes from
        // `&mut World`, and each slot is visited once.
        let storage = (*storages.as_ptr()).get_mut(&TypeId::of::<T>())?;
        let set = storage.as_any_mut().downcast_mut::<SparseSet<T>>()?;
        SparseSet::get_mut_ptr(set, index).map(|value| &mut *value)
    }
}

unsafe impl<T: Component> WorldQuery for Option<&T> {
    type Item<'w> = Option<&'w T>;

    fn required_type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn optional_type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    unsafe fn fetch<'w>(storages: NonNull<StorageMap>, index: u32) -> Option<Self::Item<'w>> {
        Some(sparse_set::<T>(storages.as_ref()).and_then(|set| set.get(index)))
    }
}

unsafe impl<T: Component> ReadOnlyWorldQuery for Option<&T> {}

macro_rules! impl_world_query_tuple {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        unsafe impl<$($name: WorldQuery),+> WorldQuery for ($($name,)+) {
            type Item<'w> = ($($name::Item<'w>,)+);

            fn required_type_ids() -> Vec<TypeId> {
                let mut ids = Vec::new();
                $(ids.extend($name::required_type_ids());)+
                ids
            }

            fn optional_type_ids() -> Vec<TypeId> {
                let mut ids = Vec::new();
                $(ids.extend($name::optional_type_ids());)+
                ids
            }

            fn mutable_type_ids() -> Vec<TypeId> {
                let mut ids = Vec::new();
                $(ids.extend($name::mutable_type_ids());)+
                ids
            }

            unsafe fn fetch<'w>(storages: NonNull<StorageMap>, index: u32) -> Option<Self::Item<'w>> {
                Some(($($name::fetch(storages, index)?,)+))
            }
        }

        unsafe impl<$($name: ReadOnlyWorldQuery),+> ReadOnlyWorldQuery for ($($name,)+) {}
    };
}

impl_world_query_tuple!(A);
impl_world_query_tuple!(A, B);
impl_world_query_tuple!(A, B, C);
impl_world_query_tuple!(A, B, C, D);
impl_world_query_tuple!(A, B, C, D, E);
impl_world_query_tuple!(A, B, C, D, E, F);

/// Panics if a query asks for a mutable component alongside any other
/// access to the same type.
fn assert_disjoint_access<Q: WorldQuery>() {
    let mutable = Q::mutable_type_ids();
    if mutable.is_empty() {
        return;
    }
    let mut accessed = Q::required_type_ids();
    accessed.extend(Q::optional_type_ids());
    for id in &mutable {
        let uses = accessed.iter().filter(|other| *other == id).count();
        assert!(
            uses == 1,
            "query `{}` accesses a mutably borrowed component more than once",
            std::any::type_name::<Q>()
        );
    }
}

/// Slots worth visiting for `Q`: the owners of the smallest required table,
/// or every slot when nothing is required.
fn candidate_indices<Q: WorldQuery>(
    entities: &EntityAllocator,
    storages: &StorageMap,
) -> Vec<u32> {
    let required = Q::required_type_ids();
    if required.is_empty() {
        return (0..entities.slot_count())
            .filter(|&index| entities.live_at(index).is_some())
            .collect();
    }

    let mut smallest: Option<&[u32]> = None;
    for id in &required {
        // A required type that was never inserted cannot match anything.
        let Some(storage) = storages.get(id) else {
            return Vec::new();
        };
        let owners = storage.entity_indices();
        if smallest.map_or(true, |current| owners.len() < current.len()) {
            smallest = Some(owners);
        }
    }
    smallest.map(<[u32]>::to_vec).unwrap_or_default()
}

/// Lazy iterator returned by [`World::query`](crate::World::query) and
/// [`World::query_mut`](crate::World::query_mut). Yields `(Entity, Q::Item)`
/// for every live entity holding all required components.
pub struct QueryIter<'w, Q: WorldQuery> {
    entities: &'w EntityAllocator,
    /// Shared or unique borrow of the tables, depending on the constructor.
    storages: NonNull<StorageMap>,
    candidates: Vec<u32>,
    position: usize,
    _marker: PhantomData<(Q, &'w mut StorageMap)>,
}

impl<'w, Q: WorldQuery> QueryIter<'w, Q> {
    fn from_parts(
        entities: &'w EntityAllocator,
        storages: NonNull<StorageMap>,
        candidates: Vec<u32>,
    ) -> Self {
        Self {
            entities,
            storages,
            candidates,
            position: 0,
            _marker: PhantomData,
        }
    }

    /// Iterator over read-only items, backed by a shared borrow.
    pub(crate) fn new(entities: &'w EntityAllocator, storages: &'w StorageMap) -> Self
    where
        Q: ReadOnlyWorldQuery,
    {
        let candidates = candidate_indices::<Q>(entities, storages);
        Self::from_parts(entities, NonNull::from(storages), candidates)
    }

    /// Iterator that may hand out `&mut` items, backed by a unique borrow.
    pub(crate) fn new_mut(entities: &'w EntityAllocator, storages: &'w mut StorageMap) -> Self {
        assert_disjoint_access::<Q>();
        let candidates = candidate_indices::<Q>(entities, storages);
        Self::from_parts(entities, NonNull::from(storages), candidates)
    }
}

impl<'w, Q: WorldQuery> Iterator for QueryIter<'w, Q> {
    type Item = (Entity, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&index) = self.candidates.get(self.position) {
            self.position += 1;

            let Some(entity) = self.entities.live_at(index) else {
                continue;
            };

            // Safety: every slot is visited at most once per iterator and
            // `assert_disjoint_access` rejected overlapping mutable access.
            if let Some(item) = unsafe { Q::fetch(self.storages, index) } {
                return Some((entity, item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len() - self.position))
    }
}
