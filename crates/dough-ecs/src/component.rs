use std::any::Any;

/// Marker trait for types that can be attached to entities.
pub trait Component: 'static + Send + Sync {}

/// Any `'static + Send + Sync` type is a valid component.
impl<T: 'static + Send + Sync> Component for T {}

/// Type-erased view of one component table.
pub(crate) trait ComponentStorage: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove(&mut self, index: u32) -> bool;
    fn contains(&self, index: u32) -> bool;
    /// Entity slots currently holding a value, in dense order.
    fn entity_indices(&self) -> &[u32];
}

/// Sparse-set table for a single component type: O(1) insert, remove and
/// lookup by entity slot, with the values packed for iteration.
pub(crate) struct SparseSet<T> {
    /// Entity slot -> position in `dense`.
    sparse: Vec<Option<usize>>,
    dense: Vec<T>,
    /// Entity slot owning each `dense` entry.
    owners: Vec<u32>,
}

impl<T: Component> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    /// Store `value` for the slot, overwriting any previous value, and hand
    /// back a reference to the stored component.
    pub fn insert(&mut self, index: u32, value: T) -> &mut T {
        let slot = index as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }
        let position = match self.sparse[slot] {
            Some(position) => {
                self.dense[position] = value;
                position
            }
            None => {
                let position = self.dense.len();
                self.dense.push(value);
                self.owners.push(index);
                self.sparse[slot] = Some(position);
                position
            }
        };
        &mut self.dense[position]
    }

    fn position(&self, index: u32) -> Option<usize> {
        self.sparse.get(index as usize).copied().flatten()
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.position(index).map(|position| &self.dense[position])
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.position(index).map(|position| &mut self.dense[position])
    }

    /// Raw pointer to the slot's value. Unlike [`get_mut`](Self::get_mut) it
    /// never borrows the whole value buffer, so pointers to different slots
    /// can be live at the same time.
    ///
    /// # Safety
    /// `this` must be valid for writes, and the table must not grow or shrink
    /// while the returned pointer is in use.
    pub unsafe fn get_mut_ptr(this: *mut Self, index: u32) -> Option<*mut T> {
        let position = (*this).position(index)?;
        Some((*this).dense.as_mut_ptr().add(position))
    }
}

impl<T: Component> ComponentStorage for SparseSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove(&mut self, index: u32) -> bool {
        let Some(position) = self.position(index) else {
            return false;
        };
        self.sparse[index as usize] = None;

        // Swap-remove keeps `dense` packed; re-point the moved owner.
        self.dense.swap_remove(position);
        self.owners.swap_remove(position);
        if let Some(&moved) = self.owners.get(position) {
            self.sparse[moved as usize] = Some(position);
        }
        true
    }

    fn contains(&self, index: u32) -> bool {
        self.position(index).is_some()
    }

    fn entity_indices(&self) -> &[u32] {
        &self.owners
    }
}
