//! Local persistence of the dashboard lists.
//!  - Every list lives under a [StorageKey], the same keys the browser version used.
//!  - [json_store::JsonFileStore] keeps one JSON document per key in a directory.
//!  - Values are read and written whole, there is no partial update.

pub mod entities;
pub mod json_store;

use std::{fmt::Display, future::Future, ops::Deref};

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Tasks,
    Notes,
    Habits,
    Events,
    Resources,
    Goals,
    PomodoroSessions,
}

impl StorageKey {
    pub const ALL: [StorageKey; 7] = [
        StorageKey::Tasks,
        StorageKey::Notes,
        StorageKey::Habits,
        StorageKey::Events,
        StorageKey::Resources,
        StorageKey::Goals,
        StorageKey::PomodoroSessions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Tasks => "tasks",
            StorageKey::Notes => "notes",
            StorageKey::Habits => "habits",
            StorageKey::Events => "events",
            StorageKey::Resources => "resources",
            StorageKey::Goals => "goals",
            StorageKey::PomodoroSessions => "pomodoroSessions",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Get/set by key. Implementations decide how values are kept, callers only see whole
/// documents.
pub trait KeyValueStore {
    /// `None` when nothing was stored under `key` yet.
    fn get<T: DeserializeOwned + Send>(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<T>>> + Send;

    fn set<T: Serialize + Sync>(
        &self,
        key: StorageKey,
        value: &T,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Deref + Sync> KeyValueStore for T
where
    T::Target: KeyValueStore,
{
    fn get<V: DeserializeOwned + Send>(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<V>>> + Send {
        self.deref().get(key)
    }

    fn set<V: Serialize + Sync>(
        &self,
        key: StorageKey,
        value: &V,
    ) -> impl Future<Output = Result<()>> + Send {
        self.deref().set(key, value)
    }
}

/// Reads a list, an absent key is an empty list.
pub async fn load_list<T: DeserializeOwned + Send>(
    store: &impl KeyValueStore,
    key: StorageKey,
) -> Result<Vec<T>> {
    Ok(store.get::<Vec<T>>(key).await?.unwrap_or_default())
}

/// Pushes `item` at the end of the list stored under `key`.
pub async fn append_to_list<T: Serialize + DeserializeOwned + Send + Sync>(
    store: &impl KeyValueStore,
    key: StorageKey,
    item: T,
) -> Result<()> {
    let mut list = load_list::<T>(store, key).await?;
    list.push(item);
    store.set(key, &list).await
}
