//! [`Command`] for logging in.

use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use serde::Deserialize;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Session;
use crate::{
    domain::session::{Email, Password, Token, User, Username},
    infra::{
        storage::KeyValue,
        transport::{self, Request, Response, Transport},
    },
    Service,
};

use super::Command;

/// [`Command`] for establishing an authenticated [`Session`] by [`User`]
/// credentials.
#[derive(Clone, Debug)]
pub struct Login {
    /// [`Username`] of the [`User`].
    pub username: Username,

    /// [`Password`] of the [`User`].
    pub password: SecretBox<Password>,
}

/// Successful response of the login endpoint.
#[derive(Debug, Deserialize)]
struct Granted {
    /// Issued bearer [`Token`].
    token: Token,

    /// [`Email`] of the logged in [`User`].
    email: Email,
}

impl<T, St> Command<Login> for Service<T, St>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    St: KeyValue,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(username = %cmd.username))]
    async fn execute(&self, cmd: Login) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Login { username, password } = cmd;

        // Login goes around the authorizing `Api`, so that a rejection is
        // never treated as an expired session.
        let body = serde_json::json!({
            "username": AsRef::<str>::as_ref(&username),
            "password": password.expose_secret().as_ref(),
        });
        let resp = self
            .transport()
            .execute(Request::post("/auth/login").with_body(body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !resp.status.is_success() {
            tracing::warn!(status = %resp.status, "login rejected");
            return Err(tracerr::new!(E::AuthenticationFailed(
                resp.server_message()
                    .unwrap_or_else(|| E::REJECTED_MESSAGE.to_owned()),
            )));
        }

        let Granted { token, email } =
            resp.json().map_err(tracerr::from_and_wrap!(=> E))?;
        let user = User { username, email };
        self.session().establish(user.clone(), token).await;

        tracing::info!("logged in");
        Ok(user)
    }
}

/// Error of [`Login`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Server rejected the provided credentials.
    #[display("{_0}")]
    #[from(ignore)]
    AuthenticationFailed(#[error(not(source))] String),

    /// [`Transport`] failed to reach the server.
    #[display("{}", Self::UNEXPECTED_MESSAGE)]
    Transport(transport::Error),

    /// Server responded with an unexpected body.
    #[display("{}", Self::UNEXPECTED_MESSAGE)]
    MalformedResponse(serde_json::Error),
}

impl ExecutionError {
    /// Message of a rejected login the server gave no reason for.
    pub const REJECTED_MESSAGE: &'static str = "An error occurred during login";

    /// Message of a login failed for a reason other than rejection.
    pub const UNEXPECTED_MESSAGE: &'static str = "An unexpected error occurred";
}
