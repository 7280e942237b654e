//! [`Command`] for logging out.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::Session;
use crate::{infra::storage::KeyValue, Service};

use super::Command;

/// [`Command`] for clearing the current [`Session`] along with its persisted
/// copy.
///
/// Performs no network requests and never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logout;

impl<T, St: KeyValue> Command<Logout> for Service<T, St> {
    type Ok = ();
    type Err = Infallible;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, _: Logout) -> Result<Self::Ok, Self::Err> {
        self.session().clear().await;
        tracing::info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use crate::{command::fixture, infra::storage::Key, Command as _};

    use super::Logout;

    #[tokio::test]
    async fn clears_session_and_storage() {
        let (service, transport, storage) = fixture::service();
        fixture::authenticate(&service).await;

        service.execute(Logout).await.unwrap();

        assert!(!service.session().is_authenticated());
        assert!(storage.get(Key::TOKEN).is_none());
        assert!(storage.get(Key::USER).is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn is_idempotent() {
        let (service, ..) = fixture::service();

        service.execute(Logout).await.unwrap();
        service.execute(Logout).await.unwrap();

        assert!(!service.session().is_authenticated());
    }
}
