//! [`Api`] adapter authorizing [`Request`]s with the current session.

use std::future::Future;

use common::Handler;
use derive_more::{Display, Error as StdError, From};
use http::StatusCode;
use tracerr::Traced;

use crate::{
    domain::session::Token,
    infra::transport::{self, Request, Response, Transport},
};

/// Capability of reading the current bearer [`Token`] and of forcing the
/// session it belongs to be invalidated.
pub trait Credentials {
    /// Returns the current bearer [`Token`], if any.
    ///
    /// Called on every dispatched [`Request`], so must reflect the live value.
    fn token(&self) -> Option<Token>;

    /// Invalidates the current session after the server refused its
    /// [`Token`].
    fn invalidate(&self) -> impl Future<Output = ()>;
}

/// [`Transport`] adapter injecting the bearer [`Token`] of the current
/// session into every [`Request`], and invalidating the session once the
/// server responds with [`StatusCode::UNAUTHORIZED`].
///
/// Only successful (`2xx`) [`Response`]s are returned as [`Ok`].
#[derive(Clone, Debug)]
pub struct Api<T, C> {
    /// Underlying [`Transport`].
    transport: T,

    /// [`Credentials`] of the current session.
    credentials: C,
}

impl<T, C> Api<T, C> {
    /// Creates a new [`Api`] on top of the provided [`Transport`] and
    /// [`Credentials`].
    #[must_use]
    pub fn new(transport: T, credentials: C) -> Self {
        Self {
            transport,
            credentials,
        }
    }
}

impl<T, C> Handler<Request> for Api<T, C>
where
    T: Transport<
        Request,
        Ok = Response,
        Err = Traced<transport::Error>,
    >,
    C: Credentials,
{
    type Ok = Response;
    type Err = Traced<Error>;

    async fn execute(&self, req: Request) -> Result<Self::Ok, Self::Err> {
        let req = req.with_bearer(self.credentials.token());

        let resp = self
            .transport
            .execute(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        if resp.status.is_success() {
            return Ok(resp);
        }

        let status = resp.status;
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("server refused the session token, logging out");
            self.credentials.invalidate().await;
        }

        Err(tracerr::new!(Error::Status {
            status,
            message: resp.server_message(),
        }))
    }
}

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Transport`] failed to exchange a [`Request`].
    #[display("Request failed: {_0}")]
    Transport(transport::Error),

    /// Server responded with a non-successful status.
    #[display(
        "Server responded with `{status}`{}",
        message.as_ref().map(|m| format!(": {m}")).unwrap_or_default(),
    )]
    #[from(ignore)]
    Status {
        /// Status code of the [`Response`].
        status: StatusCode,

        /// Message provided by the server, if any.
        message: Option<String>,
    },
}

impl Error {
    /// Returns the [`StatusCode`] the server responded with, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// Returns the message provided by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }

    /// Indicates whether the server refused the session credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
