//! Interactive storefront session.
//!
//! Reads one command per line from stdin, turns it into a UI event, and
//! prints whatever fragment the controller replaced plus any alerts.

use shopfront_core::ProductId;
use shopfront_storefront::{
    CartStore, HeadlessPage, HttpShopApi, StorefrontController, UiEvent, WidgetConfig,
    delegated_events,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "\
commands:
  search <text>      set the search box and reload the catalog
  category <name>    pick a category (empty for all) and reload
  add <id>           add one unit of a product to the cart
  remove <id>        drop a product from the cart
  checkout           place the order
  grid               show the product grid and its buttons
  cart               show the cart panel
  help               show this text
  quit               leave";

/// A parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Category(String),
    Add(ProductId),
    Remove(ProductId),
    Checkout,
    Grid,
    Cart,
    Help,
    Quit,
}

/// Errors parsing a session line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs a product id")]
    MissingId(&'static str),
    #[error("invalid product id: {0:?}")]
    InvalidId(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns `ParseCommandError` for unknown verbs and bad product ids.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_lowercase().as_str() {
        "search" | "s" => SessionCommand::Search(rest.to_string()),
        "category" | "c" => SessionCommand::Category(rest.to_string()),
        "add" | "a" => SessionCommand::Add(parse_id("add", rest)?),
        "remove" | "rm" => SessionCommand::Remove(parse_id("remove", rest)?),
        "checkout" => SessionCommand::Checkout,
        "grid" => SessionCommand::Grid,
        "cart" => SessionCommand::Cart,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(ParseCommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(verb: &'static str, raw: &str) -> Result<ProductId, ParseCommandError> {
    if raw.is_empty() {
        return Err(ParseCommandError::MissingId(verb));
    }
    raw.parse()
        .map_err(|_| ParseCommandError::InvalidId(raw.to_string()))
}

/// Run the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or stdin fails.
#[allow(clippy::print_stdout)]
pub async fn run(config: &WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpShopApi::new(config)?;
    info!(api = %api.base_url(), "Starting storefront session");

    let controller = StorefrontController::new(api, HeadlessPage::new(), CartStore::new());
    if let Err(e) = controller.ready().await {
        warn!(error = %e, "Initial render failed");
    }
    print_grid(controller.page());
    println!("{}", controller.page().cart_content());
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let page = controller.page();
        let event = match command {
            SessionCommand::Search(text) => {
                page.set_search_text(text);
                UiEvent::Search
            }
            SessionCommand::Category(category) => {
                page.set_category(category);
                UiEvent::CategoryChanged
            }
            SessionCommand::Add(id) => UiEvent::AddToCart(id),
            SessionCommand::Remove(id) => UiEvent::RemoveFromCart(id),
            SessionCommand::Checkout => UiEvent::Checkout,
            SessionCommand::Grid => {
                print_grid(page);
                continue;
            }
            SessionCommand::Cart => {
                println!("{}", page.cart_content());
                continue;
            }
            SessionCommand::Help => {
                println!("{HELP}");
                continue;
            }
            SessionCommand::Quit => break,
        };

        let (grids, carts) = (page.grid_renders(), page.cart_renders());
        if let Err(e) = controller.dispatch(event).await {
            println!("request failed: {e}");
        }
        for alert in page.take_alerts() {
            println!("! {alert}");
        }
        if page.grid_renders() > grids {
            print_grid(page);
        }
        if page.cart_renders() > carts {
            println!("{}", page.cart_content());
        }
    }

    info!(lines = controller.cart().len(), "Session ended");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_grid(page: &HeadlessPage) {
    let grid = page.product_grid();
    println!("{grid}");
    let buttons = delegated_events(&grid);
    if !buttons.is_empty() {
        println!("({} add-to-cart buttons)", buttons.len());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn test_search_keeps_inner_spaces() {
        assert_eq!(
            parse_line("search  the hobbit "),
            Ok(Some(SessionCommand::Search("the hobbit".to_string())))
        );
    }

    #[test]
    fn test_bare_category_clears_filter() {
        assert_eq!(
            parse_line("category"),
            Ok(Some(SessionCommand::Category(String::new())))
        );
    }

    #[test]
    fn test_add_and_remove_ids() {
        assert_eq!(
            parse_line("add 3"),
            Ok(Some(SessionCommand::Add(ProductId::new(3))))
        );
        assert_eq!(
            parse_line("RM 12"),
            Ok(Some(SessionCommand::Remove(ProductId::new(12))))
        );
    }

    #[test]
    fn test_id_errors() {
        assert_eq!(
            parse_line("add"),
            Err(ParseCommandError::MissingId("add"))
        );
        assert_eq!(
            parse_line("remove x1"),
            Err(ParseCommandError::InvalidId("x1".to_string()))
        );
    }

    #[test]
    fn test_unknown_verb() {
        let err = parse_line("buy 1").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: buy");
    }

    #[test]
    fn test_quit_aliases() {
        for line in ["quit", "exit", "q"] {
            assert_eq!(parse_line(line), Ok(Some(SessionCommand::Quit)));
        }
    }
}
