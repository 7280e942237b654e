//! Command-line shell rendering the catalog state.

mod mutation;
mod query;

use std::fmt;

use service::{
    catalog::Cursor,
    command::{Command as _, InitializeSession},
    domain::{session::User, Product},
    guard::{self, Decision, Route},
};

use crate::{args::Command, define_error, Error, Service};

define_error! {
    enum GuardError {
        #[code = "UNAUTHENTICATED"]
        #[message = "Not logged in, run `catalog login <username>` first"]
        Unauthenticated,

        #[code = "ALREADY_AUTHENTICATED"]
        #[message = "Already logged in, run `catalog logout` first"]
        AlreadyAuthenticated,
    }
}

define_error! {
    enum InputError {
        #[code = "INVALID_TITLE"]
        #[message = "Title must be non-empty and trimmed"]
        Title,

        #[code = "INVALID_SKU"]
        #[message = "SKU must be non-empty and trimmed"]
        Sku,

        #[code = "INVALID_PRICE"]
        #[message = "Price must be a non-negative decimal number"]
        Price,

        #[code = "INVALID_DESCRIPTION"]
        #[message = "Description must be non-empty"]
        Description,

        #[code = "INVALID_IMAGE"]
        #[message = "Image must be a readable JPEG or PNG file"]
        Image,

        #[code = "INVALID_PAGE"]
        #[message = "Page number must be positive"]
        Page,

        #[code = "INVALID_USERNAME"]
        #[message = "Username must be non-empty and trimmed"]
        Username,
    }
}

/// Shell executing [`Command`]s upon a [`Service`].
#[derive(Debug)]
pub struct Shell {
    /// [`Service`] of this [`Shell`].
    service: Service,
}

impl Shell {
    /// Creates a new [`Shell`], restoring the persisted session into the
    /// provided [`Service`].
    pub async fn new(service: Service) -> Self {
        let session = service
            .execute(InitializeSession)
            .await
            .unwrap_or_else(|e| match e {});
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "session initialized",
        );
        Self { service }
    }

    /// Returns [`Service`] of this [`Shell`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Executes the provided [`Command`].
    ///
    /// # Errors
    ///
    /// If the [`Command`] is not allowed with the current session, or its
    /// execution fails.
    pub async fn run(&self, cmd: Command) -> Result<View, Error> {
        match cmd {
            Command::Login { username, password } => {
                self.enter(Route::Login)?;
                self.login(username, password).await
            }
            Command::Logout => self.logout().await,
            Command::Whoami => Ok(self.whoami()),
            Command::List { page, all } => {
                self.enter(Route::Products)?;
                self.list(page, all).await
            }
            Command::Create(product) => {
                self.enter(Route::Products)?;
                self.create(product).await
            }
            Command::Update { id, product } => {
                self.enter(Route::Products)?;
                self.update(id, product).await
            }
            Command::Delete { id } => {
                self.enter(Route::Products)?;
                self.delete(id).await
            }
            Command::Import => {
                self.enter(Route::Products)?;
                self.import().await
            }
        }
    }

    /// Checks whether the provided [`Route`] may be entered with the current
    /// session.
    fn enter(&self, route: Route) -> Result<(), Error> {
        let session = self.service.session().current();
        match guard::guard(route.into(), &session) {
            Decision::Render(_) => Ok(()),
            Decision::Redirect(Route::Login) => {
                Err(GuardError::Unauthenticated.into())
            }
            Decision::Redirect(Route::Products) => {
                Err(GuardError::AlreadyAuthenticated.into())
            }
        }
    }
}

/// Result of a [`Command`] to be shown to the user.
#[derive(Clone, Debug)]
pub enum View {
    /// Plain notice.
    Notice(&'static str),

    /// Current [`User`], if any.
    Whoami(Option<User>),

    /// Loaded [`Product`]s along with the [`Cursor`] over them.
    Products {
        /// Loaded [`Product`]s.
        products: Vec<Product>,

        /// [`Cursor`] over the loaded pages.
        cursor: Cursor,
    },

    /// Single [`Product`] affected by a [`Command`].
    Product(Product),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice(msg) => write!(f, "{msg}"),
            Self::Whoami(None) => write!(f, "Not logged in"),
            Self::Whoami(Some(User { username, email })) => {
                write!(f, "{username} <{email}>")
            }
            Self::Products { products, cursor } => {
                for p in products {
                    writeln!(f, "{}", Row(p))?;
                }
                write!(f, "-- {} product(s), page {cursor}", products.len())
            }
            Self::Product(p) => write!(f, "{}", Row(p)),
        }
    }
}

/// Single-line representation of a [`Product`].
struct Row<'p>(&'p Product);

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Product {
            id,
            title,
            sku,
            image_url: _,
            price,
            description,
        } = self.0;

        write!(f, "#{id} {title} [{sku}] {price}")?;
        if let Some(desc) = description {
            write!(f, " - {desc}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination::Number, Price};
    use service::{
        catalog::Cursor,
        domain::{
            product,
            session::{Email, User, Username},
            Product,
        },
    };

    use super::View;

    fn product(id: i64, description: Option<&str>) -> Product {
        Product {
            id: id.into(),
            title: product::Title::new("Lamp").unwrap(),
            sku: product::Sku::new("LMP").unwrap(),
            image_url: product::ImageUrl::from("/img/lamp.png"),
            price: "19.90".parse::<Price>().unwrap(),
            description: description.and_then(product::Description::new),
        }
    }

    #[test]
    fn renders_user() {
        let user = User {
            username: Username::new("alice").unwrap(),
            email: Email::from("alice@example.com"),
        };

        assert_eq!(
            View::Whoami(Some(user)).to_string(),
            "alice <alice@example.com>",
        );
        assert_eq!(View::Whoami(None).to_string(), "Not logged in");
    }

    #[test]
    fn renders_products_with_cursor() {
        let view = View::Products {
            products: vec![product(1, Some("Bright")), product(2, None)],
            cursor: Cursor::new(Number::FIRST, Number::new(3).unwrap()),
        };

        assert_eq!(
            view.to_string(),
            "#1 Lamp [LMP] 19.9 - Bright\n\
             #2 Lamp [LMP] 19.9\n\
             -- 2 product(s), page 1/3",
        );
    }
}
