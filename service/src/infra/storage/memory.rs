//! In-memory [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Delete, Insert, Select};
use parking_lot::RwLock;
use tracerr::Traced;

use super::{Entry, Error, Key, Storage};

/// [`Storage`] keeping values in memory only.
///
/// Clones share the same underlying values.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<HashMap<Key, String>>>);

impl Memory {
    /// Returns the value stored under the provided [`Key`], if any.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<String> {
        self.0.read().get(&key).cloned()
    }

    /// Stores the provided `value` under the provided [`Key`].
    pub fn set(&self, key: Key, value: impl Into<String>) {
        drop(self.0.write().insert(key, value.into()));
    }
}

impl Storage<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.get(by.into_inner()))
    }
}

impl Storage<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.set(key, value);
        Ok(())
    }
}

impl Storage<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.write().remove(&key));
        Ok(())
    }
}
