pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::BudgetError;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Key holding the serialized transaction collection.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key holding the month-keyed budget limits.
pub const BUDGET_LIMITS_KEY: &str = "budget_limits";

/// A persistent string-keyed store of JSON blobs.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Deserializes the value under `key`, falling back to `T::default()` when it is missing.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|err| {
            BudgetError::StorageError(format!("corrupt record `{key}`: {err}"))
        }),
        _ => Ok(T::default()),
    }
}

pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    store.set(key, &json)
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
