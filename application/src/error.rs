//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::api};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Error reported to the user of the command-line shell.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// Human-readable [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] with the provided [`Code`] and message.
    #[must_use]
    pub fn new(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

/// Converts the provided [`api::Error`] into an [`Error`], reporting an
/// expired session separately from other failures described by `msg`.
fn api_error(err: &api::Error, code: Code, msg: &impl ToString) -> Error {
    if err.is_unauthorized() {
        Error::new("SESSION_EXPIRED", &"Session expired, log in again")
    } else {
        Error::new(code, msg)
    }
}

impl AsError for command::login::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("AUTHENTICATION_FAILED", self))
    }
}

impl AsError for command::fetch_products::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::fetch_products::ExecutionError as E;

        Some(match self {
            E::Api(e) => api_error(e, "FETCH_FAILED", &E::FAILURE_MESSAGE),
            E::MalformedResponse(_) => {
                Error::new("FETCH_FAILED", &E::FAILURE_MESSAGE)
            }
        })
    }
}

impl AsError for command::create_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_product::ExecutionError as E;

        Some(match self {
            E::Api(e) => api_error(e, "MUTATION_FAILED", self),
            E::MalformedResponse(_) => Error::new("MUTATION_FAILED", self),
        })
    }
}

impl AsError for command::update_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_product::ExecutionError as E;

        Some(match self {
            E::Api(e) => api_error(e, "MUTATION_FAILED", self),
            E::MalformedResponse(_) => Error::new("MUTATION_FAILED", self),
        })
    }
}

impl AsError for command::delete_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let Self::Api(e) = self;
        Some(api_error(e, "MUTATION_FAILED", self))
    }
}

impl AsError for command::import_products::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let Self::Api(e) = self;
        Some(api_error(e, "MUTATION_FAILED", self))
    }
}
