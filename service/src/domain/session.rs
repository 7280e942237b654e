//! [`Session`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Debug, Display, From};
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

/// Authentication state of the client process.
///
/// Either fully [`Anonymous`] or fully [`Authenticated`], so a [`User`] never
/// exists without a [`Token`] and vice versa.
///
/// [`Anonymous`]: Session::Anonymous
/// [`Authenticated`]: Session::Authenticated
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Session {
    /// No identity is established.
    #[default]
    Anonymous,

    /// Identity is established by a successful login or restored from the
    /// persisted copy.
    Authenticated {
        /// [`User`] this [`Session`] belongs to.
        user: User,

        /// Bearer [`Token`] of this [`Session`].
        token: Token,
    },
}

impl Session {
    /// Indicates whether this [`Session`] is [`Session::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the [`User`] of this [`Session`], if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Returns the [`Token`] of this [`Session`], if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Anonymous => None,
        }
    }
}

/// Identity of an authenticated user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// [`Username`] the login was performed with.
    pub username: Username,

    /// [`Email`] reported by the server.
    pub email: Email,
}

/// Name a user logs in with.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Username`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::new(name).ok_or_else(|| {
            serde::de::Error::custom("invalid `Username`")
        })
    }
}

/// Email address of a [`User`], as reported by the server.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Email(String);

/// Password of a [`User`].
#[derive(Clone, Debug, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Opaque bearer credential of a [`Session`].
#[derive(AsRef, Clone, Debug, Eq, PartialEq)]
#[as_ref(str)]
pub struct Token(#[debug(skip)] String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not empty.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Self::new(token)
            .ok_or_else(|| serde::de::Error::custom("empty `Token`"))
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Session, Token, User, Username};

    fn user() -> User {
        User {
            username: Username::new("alice").unwrap(),
            email: Email::from("alice@example.com"),
        }
    }

    #[test]
    fn anonymous_has_neither_user_nor_token() {
        let session = Session::default();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn authenticated_has_both_user_and_token() {
        let session = Session::Authenticated {
            user: user(),
            token: Token::new("t0k3n").unwrap(),
        };

        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(&user()));
        assert_eq!(session.token().map(AsRef::as_ref), Some("t0k3n"));
    }

    #[test]
    fn token_is_not_printed() {
        let token = Token::new("very-secret").unwrap();

        assert!(!format!("{token:?}").contains("very-secret"));
    }

    #[test]
    fn user_roundtrips_through_json() {
        let json = serde_json::to_string(&user()).unwrap();

        assert_eq!(json, r#"{"username":"alice","email":"alice@example.com"}"#);
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), user());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Username::new("").is_none());
        assert!(Username::new(" bob").is_none());
        assert!(Token::new("").is_none());
        assert!(serde_json::from_str::<User>(r#"{"username":""}"#).is_err());
        assert!(serde_json::from_str::<Token>(r#""""#).is_err());
    }
}
