use crate::errors::CartError;

/// Synchronous string key-value store the cart is persisted into
/// (browser `localStorage`, a settings file, an in-memory map...).
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, CartError>;

    /// Replace whatever is stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CartError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CartError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartError> {
        (**self).set(key, value)
    }
}
