use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-keyed singleton storage, at most one value per type.
#[derive(Default)]
pub(crate) struct Resources {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, replacing any previous value of the same type.
    pub fn insert<T: 'static + Send + Sync>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: 'static + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    pub fn get_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut())
    }

    pub fn remove<T: 'static + Send + Sync>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast().ok())
            .map(|value| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn values_are_keyed_by_type() {
        let mut res = Resources::new();
        res.insert(16u32);
        res.insert("atlas".to_string());
        assert_eq!(res.get::<u32>(), Some(&16));
        assert_eq!(res.get::<String>().map(String::as_str), Some("atlas"));
        assert_eq!(res.get::<i64>(), None);
    }

    #[test]
    fn insert_replaces_previous_value() {
        let mut res = Resources::new();
        res.insert(1u32);
        res.insert(2u32);
        assert_eq!(res.get::<u32>(), Some(&2));
    }

    #[test]
    fn shared_values_can_be_published() {
        let mut res = Resources::new();
        let table = Arc::new(vec![1, 2, 3]);
        res.insert(Arc::clone(&table));
        let published = res.get::<Arc<Vec<i32>>>().cloned().unwrap();
        assert!(Arc::ptr_eq(&table, &published));
        assert_eq!(res.remove::<Arc<Vec<i32>>>().map(|t| t.len()), Some(3));
        assert!(res.get::<Arc<Vec<i32>>>().is_none());
    }
}
