use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shop-widget")]
#[command(about = "Product recommendations, a shopping cart and a trending chart in the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (JSON), overrides SHOP_CATALOG_PATH
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive shell driven by typed commands (default)
    Shell,
    /// Guided selection with menus
    Browse,
    /// List catalog products
    Catalog,
    /// Show recommendations for a product
    Recommend {
        /// Product name
        product: String,
    },
    /// Show the best-selling items
    Trending {
        /// Number of items to show
        #[arg(short, long)]
        top: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let args = Args::try_parse_from(["shop-widget"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_recommend_with_global_flags() {
        let args = Args::try_parse_from([
            "shop-widget",
            "recommend",
            "Premia Tea Masala",
            "--config",
            "catalog.json",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("catalog.json")));
        assert_eq!(
            args.command,
            Some(Commands::Recommend { product: "Premia Tea Masala".to_string() })
        );
    }

    #[test]
    fn test_trending_top() {
        let args = Args::try_parse_from(["shop-widget", "trending", "--top", "3"]).unwrap();
        assert_eq!(args.command, Some(Commands::Trending { top: Some(3) }));
    }
}
