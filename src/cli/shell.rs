use std::io::Write;

use anyhow::Result;
use console::style;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    chart::TerminalBarChart,
    cli::{CHECKMARK, CROSS, INFO},
    models::event::UiEvent,
    services::{Refresh, ShopController},
    utils::{
        formatting::{
            format_cart_table, format_leaderboard, format_order_summary, format_recommendations,
        },
        validation::is_valid_price,
    },
};

/// Capacity of the shell's event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 32;

pub const HELP: &str = "\
Commands:
  select <product>       show recommendations for a product
  add <item> <price>     add an item to the cart
  pick <n>               add recommendation #n from the last selection
  remove <item>          remove an item from the cart
  qty <item> <value>     set an item's quantity
  checkout               submit the order and empty the cart
  cart                   show the cart
  chart                  show the trending chart
  tooltip <label>        hover a bar of the trending chart
  top [n]                show the best-selling items
  products               list catalog products
  help                   show this help
  quit                   leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Event(UiEvent),
    Pick(usize),
    ShowCart,
    ShowChart,
    Tooltip(String),
    Top(Option<usize>),
    Products,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShellError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid price '{0}'")]
    InvalidPrice(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("No recommendation #{0} on screen")]
    NoSuchRecommendation(usize),
}

/// What the shell reader puts on the event queue.
pub type ShellInput = Result<ShellCommand, ShellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Item names may contain spaces; for `add` and `qty` the last word is
/// the price or quantity and everything before it is the name.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(keyword) => keyword.to_lowercase(),
        None => return Ok(None),
    };
    let rest: Vec<&str> = words.collect();

    let command = match keyword.as_str() {
        "select" => {
            require_name(&rest, "select <product>")?;
            ShellCommand::Event(UiEvent::select(rest.join(" ")))
        }
        "add" => {
            let (name, raw_price) = split_last(&rest, "add <item> <price>")?;
            let price = raw_price
                .parse::<f64>()
                .ok()
                .filter(|p| is_valid_price(*p))
                .ok_or_else(|| ShellError::InvalidPrice(raw_price.to_string()))?;
            ShellCommand::Event(UiEvent::add(name, price))
        }
        "pick" => match rest.as_slice() {
            [index] => ShellCommand::Pick(
                index
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i >= 1)
                    .ok_or_else(|| ShellError::InvalidNumber(index.to_string()))?,
            ),
            _ => return Err(ShellError::Usage("pick <n>")),
        },
        "remove" | "rm" => {
            require_name(&rest, "remove <item>")?;
            ShellCommand::Event(UiEvent::remove(rest.join(" ")))
        }
        "qty" | "quantity" => {
            let (name, raw) = split_last(&rest, "qty <item> <value>")?;
            ShellCommand::Event(UiEvent::update_quantity(name, raw))
        }
        "checkout" | "submit" => ShellCommand::Event(UiEvent::submit_order()),
        "cart" => ShellCommand::ShowCart,
        "chart" => ShellCommand::ShowChart,
        "tooltip" | "hover" => {
            require_name(&rest, "tooltip <label>")?;
            ShellCommand::Tooltip(rest.join(" "))
        }
        "top" => match rest.as_slice() {
            [] => ShellCommand::Top(None),
            [n] => ShellCommand::Top(Some(
                n.parse::<usize>()
                    .map_err(|_| ShellError::InvalidNumber(n.to_string()))?,
            )),
            _ => return Err(ShellError::Usage("top [n]")),
        },
        "products" | "catalog" => ShellCommand::Products,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn require_name(rest: &[&str], usage: &'static str) -> Result<(), ShellError> {
    if rest.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    Ok(())
}

fn split_last(rest: &[&str], usage: &'static str) -> Result<(String, String), ShellError> {
    match rest.split_last() {
        Some((last, name)) if !name.is_empty() => Ok((name.join(" "), last.to_string())),
        _ => Err(ShellError::Usage(usage)),
    }
}

/// Read stdin lines, parse them and queue the results.
///
/// Stops at end of input, after queueing `quit`, or once the receiver
/// is gone.
pub fn spawn_stdin_reader(tx: mpsc::Sender<ShellInput>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let input = match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => Ok(command),
                Err(e) => Err(e),
            };
            let quit = matches!(input, Ok(ShellCommand::Quit));

            if tx.send(input).await.is_err() || quit {
                break;
            }
        }
        debug!("Shell reader finished");
    })
}

/// Consume the event queue until `quit` or until every sender is dropped.
///
/// Events are handled one at a time; each one's view output is written
/// before the next is taken off the queue. Returns the number of inputs
/// handled.
pub async fn run_event_loop<W: Write>(
    shop: &mut ShopController<TerminalBarChart>,
    rx: &mut mpsc::Receiver<ShellInput>,
    out: &mut W,
    top_n: usize,
) -> Result<usize> {
    let mut handled = 0;

    while let Some(input) = rx.recv().await {
        handled += 1;
        let flow = match input {
            Ok(command) => handle_command(shop, command, out, top_n)?,
            Err(e) => {
                writeln!(out, "{} {}", CROSS, style(&e).red())?;
                Flow::Continue
            }
        };
        out.flush()?;

        if flow == Flow::Quit {
            break;
        }
    }

    info!("Shell closed after {} inputs", handled);
    Ok(handled)
}

/// Run the event loop against `reader`, then shut the reader down.
///
/// On a clean exit the queue is closed and the reader awaited; if the
/// loop fails the reader is aborted so a pending stdin read cannot hold
/// up shutdown.
pub async fn drive<W: Write>(
    shop: &mut ShopController<TerminalBarChart>,
    mut rx: mpsc::Receiver<ShellInput>,
    reader: JoinHandle<()>,
    out: &mut W,
    top_n: usize,
) -> Result<usize> {
    let handled = match run_event_loop(shop, &mut rx, out, top_n).await {
        Ok(handled) => handled,
        Err(e) => {
            reader.abort();
            return Err(e.context("Shell event loop failed"));
        }
    };

    // the reader exits on quit or end of input
    drop(rx);
    if let Err(e) = reader.await {
        warn!("Shell reader ended abnormally: {}", e);
    }
    Ok(handled)
}

/// Apply one shell command and print the views it refreshed.
pub fn handle_command<W: Write>(
    shop: &mut ShopController<TerminalBarChart>,
    command: ShellCommand,
    out: &mut W,
    top_n: usize,
) -> Result<Flow> {
    match command {
        ShellCommand::Event(event) => {
            let refresh = shop.dispatch(event);
            write_refresh(shop, refresh, out)?;
        }
        ShellCommand::Pick(index) => {
            let on_add = shop
                .recommendations()
                .and_then(|render| {
                    index
                        .checked_sub(1)
                        .and_then(|position| render.records().get(position))
                })
                .map(|record| record.on_add.clone());

            match on_add {
                Some(event) => {
                    let refresh = shop.dispatch(event);
                    write_refresh(shop, refresh, out)?;
                }
                None => {
                    let e = ShellError::NoSuchRecommendation(index);
                    writeln!(out, "{} {}", CROSS, style(&e).red())?;
                }
            }
        }
        ShellCommand::ShowCart => write_cart(shop, out)?,
        ShellCommand::ShowChart => writeln!(out, "{}", shop.chart().frame())?,
        ShellCommand::Tooltip(label) => {
            let text = shop.chart().tooltip(&label).unwrap_or_default();
            writeln!(out, "{} {}: {}", INFO, style(&label).bold(), text)?;
        }
        ShellCommand::Top(n) => {
            writeln!(out, "{}", format_leaderboard(&shop.trending_top(n.unwrap_or(top_n))))?;
        }
        ShellCommand::Products => {
            for product in shop.catalog().products() {
                writeln!(out, "  {}", product)?;
            }
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn write_refresh<W: Write>(
    shop: &ShopController<TerminalBarChart>,
    refresh: Refresh,
    out: &mut W,
) -> Result<()> {
    if refresh.recommendations {
        if let Some(render) = shop.recommendations() {
            writeln!(
                out,
                "{} {}",
                INFO,
                style(format!("Recommended for '{}'", render.product())).bold().cyan()
            )?;
            writeln!(out, "{}", format_recommendations(render))?;
        }
    }
    if refresh.order {
        if let Some(order) = shop.last_order() {
            writeln!(out, "{} {}", CHECKMARK, format_order_summary(order, shop.currency()))?;
        }
    }
    if refresh.cart {
        write_cart(shop, out)?;
    }
    if refresh.chart {
        writeln!(out, "{}", shop.chart().frame())?;
    }
    Ok(())
}

fn write_cart<W: Write>(shop: &ShopController<TerminalBarChart>, out: &mut W) -> Result<()> {
    writeln!(out, "{}", format_cart_table(shop.cart_view(), shop.currency()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ShopSeed;
    use crate::utils::formatting::CurrencyFormat;

    #[test]
    fn test_parse_multi_word_names() {
        assert_eq!(
            parse_line("select Premia Tea Masala").unwrap(),
            Some(ShellCommand::Event(UiEvent::select("Premia Tea Masala")))
        );
        assert_eq!(
            parse_line("add Sugar Cubes 50").unwrap(),
            Some(ShellCommand::Event(UiEvent::add("Sugar Cubes", 50.0)))
        );
        assert_eq!(
            parse_line("qty Cooling Pad abc").unwrap(),
            Some(ShellCommand::Event(UiEvent::update_quantity("Cooling Pad", "abc")))
        );
        assert_eq!(
            parse_line("remove Cooling  Pad").unwrap(),
            Some(ShellCommand::Event(UiEvent::remove("Cooling Pad")))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("CART").unwrap(), Some(ShellCommand::ShowCart));
        assert_eq!(parse_line("top").unwrap(), Some(ShellCommand::Top(None)));
        assert_eq!(parse_line("top 3").unwrap(), Some(ShellCommand::Top(Some(3))));
        assert_eq!(parse_line("pick 2").unwrap(), Some(ShellCommand::Pick(2)));
        assert_eq!(parse_line("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(parse_line("products").unwrap(), Some(ShellCommand::Products));
        assert_eq!(
            parse_line("checkout").unwrap(),
            Some(ShellCommand::Event(UiEvent::submit_order()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_line("buy Mouse"),
            Err(ShellError::UnknownCommand("buy".to_string()))
        );
        assert_eq!(parse_line("add 50"), Err(ShellError::Usage("add <item> <price>")));
        assert_eq!(
            parse_line("add Mouse cheap"),
            Err(ShellError::InvalidPrice("cheap".to_string()))
        );
        assert_eq!(
            parse_line("add Mouse -1"),
            Err(ShellError::InvalidPrice("-1".to_string()))
        );
        assert_eq!(parse_line("pick 0"), Err(ShellError::InvalidNumber("0".to_string())));
        assert_eq!(parse_line("select"), Err(ShellError::Usage("select <product>")));
        assert_eq!(parse_line("qty Mouse"), Err(ShellError::Usage("qty <item> <value>")));
    }

    #[test]
    fn test_pick_zero_reports_missing_recommendation() {
        let mut shop = ShopController::new(
            ShopSeed::builtin(),
            TerminalBarChart::new("Trending Products", 20),
            CurrencyFormat::default(),
        )
        .unwrap();
        shop.select_product("Laptop");

        let mut out = Vec::new();
        let flow = handle_command(&mut shop, ShellCommand::Pick(0), &mut out, 5).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(String::from_utf8(out).unwrap().contains("No recommendation #0 on screen"));
        assert!(shop.cart().is_empty());
    }
}
