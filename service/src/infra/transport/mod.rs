//! [`Transport`]-related definitions.

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "reqwest")]
pub mod reqwest;

use std::io;

use derive_more::{Debug, Display, Error as StdError, From};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::session::Token;

#[cfg(feature = "reqwest")]
pub use self::reqwest::Reqwest;

/// Raw HTTP exchange with the catalog server.
///
/// Any received response is a success on this level, whatever its status.
pub use common::Handler as Transport;

/// HTTP request to the catalog server.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method of this [`Request`].
    pub method: Method,

    /// Path of this [`Request`], relative to the server base URL.
    pub path: String,

    /// Query parameters of this [`Request`].
    pub query: Vec<(&'static str, String)>,

    /// [`Body`] of this [`Request`].
    pub body: Body,

    /// Bearer [`Token`] to authorize this [`Request`] with, if any.
    pub bearer: Option<Token>,
}

impl Request {
    /// Creates a new [`Request`] without query, [`Body`] and [`Token`].
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
        }
    }

    /// Creates a new `GET` [`Request`].
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a new `POST` [`Request`].
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a new `PUT` [`Request`].
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a new `DELETE` [`Request`].
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends the provided query parameter to this [`Request`].
    #[must_use]
    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Sets the [`Body`] of this [`Request`].
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the bearer [`Token`] of this [`Request`].
    #[must_use]
    pub fn with_bearer(mut self, token: Option<Token>) -> Self {
        self.bearer = token;
        self
    }
}

/// Body of a [`Request`].
#[derive(Clone, Debug, Default, From)]
pub enum Body {
    /// No body.
    #[default]
    #[from(ignore)]
    Empty,

    /// JSON body.
    Json(serde_json::Value),

    /// `multipart/form-data` body.
    Multipart(Vec<Part>),
}

/// Named part of a [`Body::Multipart`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Part {
    /// Name of the form field.
    pub name: &'static str,

    /// Value of the form field.
    pub value: PartValue,
}

impl Part {
    /// Creates a new text [`Part`].
    #[must_use]
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: PartValue::Text(value.into()),
        }
    }
}

/// Value of a [`Part`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartValue {
    /// Plain text value.
    Text(String),

    /// Uploaded file.
    File {
        /// Name of the file.
        file_name: String,

        /// MIME type of the file.
        content_type: &'static str,

        /// Contents of the file.
        #[debug(skip)]
        bytes: Vec<u8>,
    },
}

/// HTTP response of the catalog server.
#[derive(Clone, Debug)]
pub struct Response {
    /// Status code of this [`Response`].
    pub status: StatusCode,

    /// Raw body of this [`Response`].
    pub body: Vec<u8>,
}

impl Response {
    /// Deserializes the JSON body of this [`Response`].
    ///
    /// # Errors
    ///
    /// If the body is not a valid JSON representation of `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Extracts a human-readable message the server put into the body of
    /// this [`Response`], looking at its `error` and `message` fields.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let body = serde_json::from_slice::<serde_json::Value>(&self.body).ok()?;
        ["error", "message"]
            .into_iter()
            .find_map(|field| {
                body.get(field)?.as_str().filter(|msg| !msg.trim().is_empty())
            })
            .map(ToOwned::to_owned)
    }
}

/// [`Transport`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O failure while exchanging a [`Request`].
    #[display("I/O failed: {_0}")]
    Io(io::Error),

    #[cfg(feature = "reqwest")]
    /// [`reqwest`] client error.
    ///
    /// [`reqwest`]: ::reqwest
    #[display("HTTP client failed: {_0}")]
    Reqwest(::reqwest::Error),
}

#[cfg(test)]
mod spec {
    use http::StatusCode;

    use super::Response;

    fn response(body: &str) -> Response {
        Response {
            status: StatusCode::BAD_REQUEST,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn extracts_server_message() {
        assert_eq!(
            response(r#"{"error":"invalid credentials"}"#).server_message(),
            Some("invalid credentials".to_owned()),
        );
        assert_eq!(
            response(r#"{"message":"SKU already exists"}"#).server_message(),
            Some("SKU already exists".to_owned()),
        );
        assert_eq!(
            response(r#"{"error":"first","message":"second"}"#)
                .server_message(),
            Some("first".to_owned()),
        );
    }

    #[test]
    fn falls_back_to_message_on_blank_error() {
        assert_eq!(
            response(r#"{"error":" ","message":"title is required"}"#)
                .server_message(),
            Some("title is required".to_owned()),
        );
        assert_eq!(
            response(r#"{"error":7,"message":"title is required"}"#)
                .server_message(),
            Some("title is required".to_owned()),
        );
    }

    #[test]
    fn ignores_unusable_bodies() {
        assert_eq!(response("").server_message(), None);
        assert_eq!(response("Bad Request").server_message(), None);
        assert_eq!(response(r#"{"error":42}"#).server_message(), None);
        assert_eq!(response(r#"{"error":"  "}"#).server_message(), None);
    }
}
