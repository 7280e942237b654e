//! [`Command`] for restoring a persisted [`Session`].

use std::convert::Infallible;

use crate::{domain::Session, infra::storage::KeyValue, Service};

use super::Command;

/// [`Command`] for restoring the [`Session`] persisted by a previous process.
///
/// Leaves the current [`Session`] intact if there is nothing valid to restore.
/// Idempotent and never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitializeSession;

impl<T, St: KeyValue> Command<InitializeSession> for Service<T, St> {
    type Ok = Session;
    type Err = Infallible;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        _: InitializeSession,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self.session().hydrate().await;
        Ok(self.session().current())
    }
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{fixture, Login, Logout},
        domain::session::{Password, Username},
        infra::storage::Key,
        Command as _, Config, Service,
    };

    use super::InitializeSession;

    #[tokio::test]
    async fn restores_session_after_restart() {
        let (service, transport, storage) = fixture::service();
        _ = transport
            .respond(200, r#"{"token":"t0k3n","email":"alice@example.com"}"#);
        _ = service
            .execute(Login {
                username: Username::new("alice").unwrap(),
                password: SecretBox::init_with(|| Password::from("secret")),
            })
            .await
            .unwrap();

        let restarted =
            Service::new(Config::default(), transport.clone(), storage);
        assert!(!restarted.session().is_authenticated());

        let session = restarted.execute(InitializeSession).await.unwrap();

        assert_eq!(session, service.session().current());
        assert_eq!(restarted.execute(InitializeSession).await.unwrap(), session);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn nothing_to_restore_after_logout() {
        let (service, _, storage) = fixture::service();
        fixture::authenticate(&service).await;
        service.execute(Logout).await.unwrap();

        let session = service.execute(InitializeSession).await.unwrap();

        assert!(!session.is_authenticated());
        assert!(storage.get(Key::USER).is_none());
    }

    #[tokio::test]
    async fn ignores_malformed_user() {
        let (service, _, storage) = fixture::service();
        storage.set(Key::TOKEN, "t0k3n");
        storage.set(Key::USER, "not json");

        let session = service.execute(InitializeSession).await.unwrap();

        assert!(!session.is_authenticated());
        assert!(service.session().token().is_none());
    }
}
