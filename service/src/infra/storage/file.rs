//! Filesystem [`Storage`] implementation.

use std::{
    io,
    path::PathBuf,
};

use common::operations::{By, Delete, Insert, Select};
use tokio::fs;
use tracerr::Traced;

use super::{Entry, Error, Key, Storage};

/// [`Storage`] keeping every value in a separate file of a directory.
#[derive(Clone, Debug)]
pub struct File {
    /// Directory the values are stored in.
    dir: PathBuf,
}

impl File {
    /// Creates a new [`File`] storage in the provided directory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path of the file holding the value of the provided [`Key`].
    fn path(&self, key: Key) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

impl Storage<Select<By<Option<String>, Key>>> for File {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::read_to_string(self.path(by.into_inner())).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(tracerr::new!(Error::from(e))),
        }
    }
}

impl Storage<Insert<Entry>> for File {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        // Write-then-rename, so readers never see a partially written value.
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::rename(&tmp, self.path(key))
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Storage<Delete<Key>> for File {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(Error::from(e))),
        }
    }
}
