use crate::entity::Entity;

/// Errors reported by component lookups on the [`World`](crate::World).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}

impl EcsError {
    pub(crate) fn missing<T>(entity: Entity) -> Self {
        Self::MissingComponent {
            entity,
            component: short_type_name::<T>(),
        }
    }
}

/// Type name without its module path, for readable diagnostics.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
