//! [`Shell`] commands reading the session or the catalog.

use common::pagination;
use service::command::{Command as _, FetchProducts};

use crate::{AsError, Error};

use super::{InputError, Shell, View};

impl Shell {
    /// Name of the [`tracing::Span`] for the queries.
    const QUERY_SPAN_NAME: &'static str = "Query";

    /// Shows the currently logged in user.
    #[tracing::instrument(
        skip_all,
        fields(cli.name = "whoami", otel.name = Self::QUERY_SPAN_NAME),
    )]
    pub(super) fn whoami(&self) -> View {
        View::Whoami(self.service().session().current().user().cloned())
    }

    /// Lists products starting from the provided `page`, keeping fetching
    /// until the last page if `all` is set.
    ///
    /// Stops at the first empty page, whatever the server reports as the
    /// total number of pages.
    #[tracing::instrument(
        skip_all,
        fields(
            cli.name = "list",
            otel.name = Self::QUERY_SPAN_NAME,
            page = page,
            all = all,
        ),
    )]
    pub(super) async fn list(&self, page: u32, all: bool) -> Result<View, Error> {
        let catalog = self.service().catalog();
        let mut page = pagination::Number::new(page).ok_or(InputError::Page)?;
        loop {
            let before = if page.is_first() {
                0
            } else {
                catalog.products().len()
            };
            _ = self
                .service()
                .execute(FetchProducts { page })
                .await
                .map_err(AsError::into_error)?;

            if catalog.products().len() == before {
                tracing::debug!(page = %page, "empty page, stopping");
                break;
            }
            match catalog.next_page() {
                Some(next) if all => page = next,
                Some(_) | None => break,
            }
        }

        Ok(View::Products {
            products: catalog.products(),
            cursor: catalog.cursor(),
        })
    }
}
