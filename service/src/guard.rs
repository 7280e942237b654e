//! Guard deciding which [`Route`] may be entered with a [`Session`].

use strum::{Display, EnumString, IntoStaticStr};

use crate::domain::Session;

/// Navigable view of the client.
#[derive(
    Clone, Copy, Debug, Display, EnumString, Eq, Hash, IntoStaticStr, PartialEq,
)]
pub enum Route {
    /// Public login view.
    #[strum(serialize = "/login")]
    Login,

    /// Protected listing of the catalog.
    #[strum(serialize = "/products")]
    Products,
}

/// Decision of the [`guard`] about an entered path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// The [`Route`] may be rendered as is.
    Render(Route),

    /// Navigation must be redirected to the provided [`Route`].
    Redirect(Route),
}

impl Decision {
    /// Returns the [`Route`] to be eventually rendered.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Render(r) | Self::Redirect(r) => r,
        }
    }
}

/// Decides whether the provided `path` may be entered with the provided
/// [`Session`].
///
/// Unknown paths lead to [`Route::Products`], which itself requires an
/// authenticated [`Session`].
#[must_use]
pub fn guard(path: &str, session: &Session) -> Decision {
    let authenticated = session.is_authenticated();
    match path.parse::<Route>() {
        Ok(Route::Products) if authenticated => Decision::Render(Route::Products),
        Ok(Route::Products) => Decision::Redirect(Route::Login),
        Ok(Route::Login) if authenticated => Decision::Redirect(Route::Products),
        Ok(Route::Login) => Decision::Render(Route::Login),
        Err(_) => Decision::Redirect(Route::Products),
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        session::{Email, Token, User, Username},
        Session,
    };

    use super::{guard, Decision, Route};

    fn authenticated() -> Session {
        Session::Authenticated {
            user: User {
                username: Username::new("alice").unwrap(),
                email: Email::from("alice@example.com"),
            },
            token: Token::new("t0k3n").unwrap(),
        }
    }

    #[test]
    fn protects_products() {
        assert_eq!(
            guard("/products", &Session::Anonymous),
            Decision::Redirect(Route::Login),
        );
        assert_eq!(
            guard("/products", &authenticated()),
            Decision::Render(Route::Products),
        );
    }

    #[test]
    fn skips_login_when_authenticated() {
        assert_eq!(
            guard("/login", &Session::Anonymous),
            Decision::Render(Route::Login),
        );
        assert_eq!(
            guard("/login", &authenticated()),
            Decision::Redirect(Route::Products),
        );
    }

    #[test]
    fn redirects_unknown_paths() {
        for path in ["/", "", "/unknown", "/products/1"] {
            assert_eq!(
                guard(path, &authenticated()),
                Decision::Redirect(Route::Products),
            );
            assert_eq!(
                guard(path, &Session::Anonymous).route(),
                Route::Products,
            );
        }
    }

    #[test]
    fn routes_display_as_paths() {
        assert_eq!(Route::Login.to_string(), "/login");
        assert_eq!(<&str>::from(Route::Products), "/products");
    }
}
