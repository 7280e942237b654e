//! Durable key-value [`Storage`] of the client state.

pub mod file;
pub mod memory;

use std::io;

use common::operations::{By, Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

pub use self::{file::File, memory::Memory};

/// Storage operation.
pub use common::Handler as Storage;

/// Key of a value in a [`Storage`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Key(&'static str);

impl Key {
    /// [`Key`] of the raw session token.
    pub const TOKEN: Self = Self("token");

    /// [`Key`] of the JSON-encoded session user.
    pub const USER: Self = Self("user");

    /// Returns the string representation of this [`Key`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Value stored under a [`Key`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// [`Key`] of this [`Entry`].
    pub key: Key,

    /// Value of this [`Entry`].
    pub value: String,
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Filesystem I/O error.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),
}

/// Shortcut for a [`Storage`] supporting all the key-value operations.
pub trait KeyValue:
    Storage<Select<By<Option<String>, Key>>, Ok = Option<String>, Err = Traced<Error>>
    + Storage<Insert<Entry>, Ok = (), Err = Traced<Error>>
    + Storage<Delete<Key>, Ok = (), Err = Traced<Error>>
{
}

impl<T> KeyValue for T where
    T: Storage<
            Select<By<Option<String>, Key>>,
            Ok = Option<String>,
            Err = Traced<Error>,
        > + Storage<Insert<Entry>, Ok = (), Err = Traced<Error>>
        + Storage<Delete<Key>, Ok = (), Err = Traced<Error>>
{
}
