//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line client of the product catalog.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in with the provided credentials.
    Login {
        /// Name of the user.
        username: String,

        /// Password of the user.
        #[arg(long, env = "CATALOG_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Logs out and forgets the persisted session.
    Logout,

    /// Shows the currently logged in user.
    Whoami,

    /// Lists products of the catalog.
    List {
        /// Page to start listing from.
        ///
        /// Requested as is: the total number of pages is only known once a
        /// page has been fetched.
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Keeps fetching pages until the last one.
        #[arg(long)]
        all: bool,
    },

    /// Creates a new product.
    Create(Product),

    /// Updates an existing product.
    Update {
        /// ID of the product to update.
        id: i64,

        /// New values of the product.
        #[command(flatten)]
        product: Product,
    },

    /// Deletes a product.
    Delete {
        /// ID of the product to delete.
        id: i64,
    },

    /// Triggers a bulk import of products on the server.
    Import,
}

/// Values of a product being created or updated.
#[derive(Debug, clap::Args)]
pub struct Product {
    /// Title of the product.
    #[arg(long)]
    pub title: String,

    /// Stock keeping unit of the product.
    #[arg(long)]
    pub sku: String,

    /// Price of the product.
    #[arg(long)]
    pub price: String,

    /// Description of the product.
    #[arg(long)]
    pub description: Option<String>,

    /// Path to a JPEG or PNG image of the product.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::{Args, Command};

    #[test]
    fn parses_listing() {
        let args =
            Args::try_parse_from(["catalog", "list", "--all"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(matches!(args.command, Command::List { page: 1, all: true }));
    }

    #[test]
    fn parses_update() {
        let args = Args::try_parse_from([
            "catalog", "-c", "dev.toml", "update", "7", "--title", "Lamp",
            "--sku", "LMP-7", "--price", "19.99",
        ])
        .unwrap();

        assert_eq!(args.config, "dev.toml");
        let Command::Update { id, product } = args.command else {
            panic!("not an update");
        };
        assert_eq!(id, 7);
        assert_eq!(product.title, "Lamp");
        assert!(product.description.is_none());
        assert!(product.image.is_none());
    }

    #[test]
    fn requires_product_fields() {
        assert!(Args::try_parse_from(["catalog", "create", "--title", "A"])
            .is_err());
    }
}
