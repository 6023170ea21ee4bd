use std::io::Write;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    chart::TerminalBarChart,
    cli::{
        args::Commands,
        shell::{self, EVENT_QUEUE_CAPACITY, HELP},
        CART, CHECKMARK, CROSS, FIRE, INFO,
    },
    models::{catalog::ShopSeed, event::UiEvent},
    services::ShopController,
    utils::{
        config::Config,
        formatting::{
            format_cart_table, format_leaderboard, format_order_summary, format_recommendations,
            CurrencyFormat,
        },
    },
};

pub const CHART_TITLE: &str = "Trending Products";

pub struct CliApp {
    config: Config,
    shop: ShopController<TerminalBarChart>,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let seed = match &config.catalog_path {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                ShopSeed::from_file(path)
                    .with_context(|| format!("Failed to load catalog from {}", path.display()))?
            }
            None => ShopSeed::builtin(),
        };

        let shop = ShopController::new(
            seed,
            TerminalBarChart::new(CHART_TITLE, config.chart_width),
            CurrencyFormat::new(config.currency_symbol.clone()),
        )
        .context("Invalid catalog")?;

        Ok(Self { config, shop })
    }

    pub async fn run(&mut self, command: Option<Commands>) -> Result<()> {
        match command.unwrap_or(Commands::Shell) {
            Commands::Shell => self.handle_shell().await,
            Commands::Browse => self.handle_browse(),
            Commands::Catalog => self.handle_catalog(),
            Commands::Recommend { product } => self.handle_recommend(&product),
            Commands::Trending { top } => self.handle_trending(top),
        }
    }

    pub fn shop(&self) -> &ShopController<TerminalBarChart> {
        &self.shop
    }

    async fn handle_shell(&mut self) -> Result<()> {
        println!("{} {}", CART, style("Shop widget").bold().cyan());
        println!("{}", HELP);
        println!("{}", self.shop.chart().frame());

        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let reader = shell::spawn_stdin_reader(tx);

        let mut stdout = std::io::stdout();
        shell::drive(&mut self.shop, rx, reader, &mut stdout, self.config.trending_top).await?;
        println!("{} Bye!", CHECKMARK);
        Ok(())
    }

    fn handle_browse(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let products: Vec<String> = self
            .shop
            .catalog()
            .products()
            .into_iter()
            .map(String::from)
            .collect();

        if products.is_empty() {
            println!("{} The catalog has no products", INFO);
            return Ok(());
        }

        loop {
            let choice = Select::with_theme(&theme)
                .with_prompt("Select a product")
                .items(&products)
                .default(0)
                .interact()?;

            let records = self.shop.select_product(&products[choice]).records().to_vec();
            if let Some(render) = self.shop.recommendations() {
                println!("{}", format_recommendations(render));
            }

            if !records.is_empty() {
                let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
                let picked = MultiSelect::with_theme(&theme)
                    .with_prompt("Add to cart (space to toggle, enter to confirm)")
                    .items(&labels)
                    .interact()?;

                for index in picked {
                    self.shop.dispatch(records[index].on_add.clone());
                }
            }

            if !self.shop.cart().is_empty() {
                self.edit_cart(&theme)?;
            }

            self.print_cart();
            println!("{}", self.shop.chart().frame());

            if !self.shop.cart().is_empty() {
                self.submit_order(&theme)?;
            }

            let more = Confirm::with_theme(&theme)
                .with_prompt("Keep shopping?")
                .default(true)
                .interact()?;
            if !more {
                break;
            }
        }

        Ok(())
    }

    fn edit_cart(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let edit = Confirm::with_theme(theme)
            .with_prompt("Edit quantities?")
            .default(false)
            .interact()?;

        if edit {
            let records = self.shop.cart_view().records().to_vec();
            for record in records {
                let raw: String = Input::with_theme(theme)
                    .with_prompt(format!("{} quantity", record.name))
                    .default(record.quantity.value.to_string())
                    .interact_text()?;
                self.shop.dispatch(record.quantity.edit(raw));
            }
        }

        let names: Vec<String> = self
            .shop
            .cart()
            .entries()
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        let removed = MultiSelect::with_theme(theme)
            .with_prompt("Remove from cart (space to toggle, enter to skip)")
            .items(&names)
            .interact()?;

        for index in removed {
            self.shop.dispatch(UiEvent::remove(names[index].clone()));
        }

        Ok(())
    }

    fn submit_order(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let submit = Confirm::with_theme(theme)
            .with_prompt("Submit order?")
            .default(false)
            .interact()?;

        if submit && self.shop.dispatch(UiEvent::submit_order()).order {
            if let Some(order) = self.shop.last_order() {
                println!(
                    "{} {}",
                    CHECKMARK,
                    format_order_summary(order, self.shop.currency())
                );
            }
        }
        Ok(())
    }

    fn handle_catalog(&self) -> Result<()> {
        println!("{} {}", INFO, style("Catalog").bold().cyan());
        for product in self.shop.catalog().products() {
            println!("  {}", style(product).green());
        }
        Ok(())
    }

    fn handle_recommend(&mut self, product: &str) -> Result<()> {
        let render = self.shop.select_product(product);
        if render.is_placeholder() {
            println!("{} {}", CROSS, format_recommendations(render));
        } else {
            println!(
                "{} {}",
                INFO,
                style(format!("Recommended for '{}'", product)).bold().cyan()
            );
            println!("{}", format_recommendations(render));
        }
        Ok(())
    }

    fn handle_trending(&self, top: Option<usize>) -> Result<()> {
        let n = top.unwrap_or(self.config.trending_top);
        println!("{} {}", FIRE, style("Top Trending Products").bold().cyan());
        println!("{}", format_leaderboard(&self.shop.trending_top(n)));
        std::io::stdout().flush()?;
        Ok(())
    }

    fn print_cart(&self) {
        println!("{} {}", CART, style("Your Cart").bold().cyan());
        println!(
            "{}",
            format_cart_table(self.shop.cart_view(), self.shop.currency())
        );
    }
}
