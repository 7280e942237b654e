//! [`Store`] of the current [`Session`].

use std::sync::Arc;

use common::operations::{By, Delete, Insert, Select};
use parking_lot::RwLock;

use crate::{
    domain::{
        session::{Token, User},
        Session,
    },
    infra::{
        api::Credentials,
        storage::{Entry, Key, KeyValue},
    },
};

/// Owner of the current [`Session`], mirroring it into a durable storage.
///
/// The in-memory [`Session`] is the source of truth: failures of the storage
/// are logged and never propagated.
///
/// Clones share the same [`Session`].
#[derive(Debug)]
pub struct Store<S> {
    /// Shared state of this [`Store`].
    inner: Arc<Inner<S>>,
}

/// Shared state of a [`Store`].
#[derive(Debug)]
struct Inner<S> {
    /// Current [`Session`].
    session: RwLock<Session>,

    /// Storage the [`Session`] is persisted into.
    storage: S,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Store<S> {
    /// Creates a new [`Store`] with an [`Session::Anonymous`] session.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: RwLock::new(Session::Anonymous),
                storage,
            }),
        }
    }

    /// Returns a snapshot of the current [`Session`].
    #[must_use]
    pub fn current(&self) -> Session {
        self.inner.session.read().clone()
    }

    /// Indicates whether the current [`Session`] is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.read().is_authenticated()
    }

    /// Returns the [`Token`] of the current [`Session`], if any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.inner.session.read().token().cloned()
    }

    /// Returns the storage of this [`Store`].
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Replaces the current [`Session`] with the provided one at once.
    fn set(&self, session: Session) {
        *self.inner.session.write() = session;
    }
}

impl<S: KeyValue> Store<S> {
    /// Establishes an authenticated [`Session`] of the provided [`User`] and
    /// persists it.
    pub async fn establish(&self, user: User, token: Token) {
        let json = serde_json::to_string(&user);
        let raw_token = token.as_ref().to_owned();
        self.set(Session::Authenticated { user, token });

        self.persist(Key::TOKEN, raw_token).await;
        match json {
            Ok(json) => self.persist(Key::USER, json).await,
            Err(e) => tracing::error!("failed to encode session user: {e}"),
        }
    }

    /// Clears the current [`Session`] and its persisted copy.
    ///
    /// Never fails and performs no network requests.
    pub async fn clear(&self) {
        self.set(Session::Anonymous);

        for key in [Key::TOKEN, Key::USER] {
            if let Err(e) = self.storage().execute(Delete(key)).await {
                tracing::error!("failed to remove `{key}` from storage: {e}");
            }
        }
    }

    /// Restores the [`Session`] from its persisted copy.
    ///
    /// Leaves the current [`Session`] intact if the persisted copy is absent
    /// or malformed. Returns whether the [`Session`] has been restored.
    pub async fn hydrate(&self) -> bool {
        let token = self.load(Key::TOKEN).await.and_then(Token::new);
        let user = self.load(Key::USER).await.and_then(|json| {
            serde_json::from_str::<User>(&json)
                .inspect_err(|e| {
                    tracing::warn!("ignoring malformed persisted user: {e}");
                })
                .ok()
        });

        let (Some(user), Some(token)) = (user, token) else {
            tracing::debug!("no persisted session to restore");
            return false;
        };
        tracing::debug!(username = %user.username, "session restored");
        self.set(Session::Authenticated { user, token });
        true
    }

    /// Stores the provided `value` under the provided [`Key`], logging any
    /// failure.
    async fn persist(&self, key: Key, value: String) {
        if let Err(e) = self.storage().execute(Insert(Entry { key, value })).await
        {
            tracing::error!("failed to persist `{key}`: {e}");
        }
    }

    /// Loads the value under the provided [`Key`], treating any failure as
    /// an absent value.
    async fn load(&self, key: Key) -> Option<String> {
        self.storage()
            .execute(Select(By::new(key)))
            .await
            .inspect_err(|e| tracing::error!("failed to read `{key}`: {e}"))
            .ok()
            .flatten()
    }
}

impl<S: KeyValue> Credentials for Store<S> {
    fn token(&self) -> Option<Token> {
        Self::token(self)
    }

    async fn invalidate(&self) {
        self.clear().await;
    }
}
