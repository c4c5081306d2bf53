//! Interactive browsing and cart session.
//!
//! Each input line is one committed command. The session owns the single
//! [`ViewState`] and [`CartState`] and replaces them only when a command
//! succeeds; a rejected command is reported and the state is kept.
//!
//! # Commands
//!
//! ```text
//! search <text>          category <name|any>    price <min> <max>
//! brands [a, b, ...]     rating <min>           reset
//! sort <key> [asc|desc]  page <n>               size <n>
//! show                   options                detail <id>
//! add <id> [qty]         remove <id>            qty <id> <n>
//! clear                  cart                   help | quit
//! ```

use std::io::{BufRead, Write};

use catalog_browser_core::{ProductId, SortDirection, SortKey};
use catalog_browser_storefront::{
    CartError, CartState, FilterCriteria, ProductLookup, ViewError, ViewState,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use super::load_catalog;
use crate::CatalogSource;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;

const SORT_KEYS_USAGE: &str = "sort <default|price|rating|sales|createdAt> [asc|desc]";

const HELP: &str = "\
search <text>          filter by name (empty clears)
category <name|any>    filter by category
price <min> <max>      filter by inclusive price range
brands [a, b, ...]     accepted brands, comma separated (empty accepts all)
rating <min>           minimum rating 0-5
reset                  restore default filters
sort <key> [asc|desc]  default | price | rating | sales | createdAt
page <n>               go to page n
size <n>               products per page
show                   show the current page
options                list categories and brands
detail <id>            show one product
add <id> [qty]         add to cart (default 1)
remove <id>            remove from cart
qty <id> <n>           set quantity (minimum 1)
clear                  empty the cart
cart                   show the cart
quit                   leave the session";

/// Errors from a single session command. None of them end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(Option<String>),
    Price(Decimal, Decimal),
    Brands(Vec<String>),
    Rating(Decimal),
    Reset,
    Sort(SortKey, SortDirection),
    Page(usize),
    Size(usize),
    Show,
    Options,
    Detail(ProductId),
    Add(ProductId, i64),
    Remove(ProductId),
    Quantity(ProductId, i64),
    Clear,
    Cart,
    Help,
    Quit,
}

fn number<T: std::str::FromStr>(
    token: Option<&str>,
    usage: &'static str,
) -> Result<T, SessionError> {
    let token = token.ok_or(SessionError::Usage(usage))?;
    token
        .parse()
        .map_err(|_| SessionError::InvalidNumber(token.to_string()))
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands and malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, SessionError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "search" => Self::Search(rest.to_string()),
            "category" => match rest {
                "" => return Err(SessionError::Usage("category <name|any>")),
                "any" => Self::Category(None),
                name => Self::Category(Some(name.to_string())),
            },
            "price" => Self::Price(
                number(args.next(), "price <min> <max>")?,
                number(args.next(), "price <min> <max>")?,
            ),
            "brands" => Self::Brands(
                rest.split(',')
                    .map(str::trim)
                    .filter(|brand| !brand.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "rating" => Self::Rating(number(args.next(), "rating <min>")?),
            "reset" => Self::Reset,
            "sort" => {
                let key = args
                    .next()
                    .ok_or(SessionError::Usage("sort <key> [asc|desc]"))?
                    .parse()
                    .map_err(|_| SessionError::Usage(SORT_KEYS_USAGE))?;
                let direction = args
                    .next()
                    .map_or(Ok(SortDirection::Asc), str::parse)
                    .map_err(|_| SessionError::Usage("sort <key> [asc|desc]"))?;
                Self::Sort(key, direction)
            }
            "page" => Self::Page(number(args.next(), "page <n>")?),
            "size" => Self::Size(number(args.next(), "size <n>")?),
            "show" => Self::Show,
            "options" => Self::Options,
            "detail" => Self::Detail(number(args.next(), "detail <id>")?),
            "add" => {
                let id = number(args.next(), "add <id> [qty]")?;
                let quantity = match args.next() {
                    Some(token) => number(Some(token), "add <id> [qty]")?,
                    None => 1,
                };
                Self::Add(id, quantity)
            }
            "remove" => Self::Remove(number(args.next(), "remove <id>")?),
            "qty" => Self::Quantity(
                number(args.next(), "qty <id> <n>")?,
                number(args.next(), "qty <id> <n>")?,
            ),
            "clear" => Self::Clear,
            "cart" => Self::Cart,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Single owner of the view and cart for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    view: ViewState,
    cart: CartState,
}

impl Session {
    #[must_use]
    pub const fn new(view: ViewState) -> Self {
        Self {
            view,
            cart: CartState::new(),
        }
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    fn update_filters(
        &self,
        edit: impl FnOnce(FilterCriteria) -> FilterCriteria,
    ) -> Result<ViewState, ViewError> {
        self.view.set_filters(edit(self.view.criteria().clone()))
    }

    /// Apply one command and return the text to show.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected; the session is unchanged.
    pub fn apply(&mut self, command: Command) -> Result<String, SessionError> {
        debug!(?command, "Applying command");

        let text = match command {
            Command::Search(term) => {
                self.view = self.update_filters(|c| c.with_search_term(term))?;
                render::page(&self.view)
            }
            Command::Category(category) => {
                self.view = self.update_filters(|c| c.with_category(category))?;
                render::page(&self.view)
            }
            Command::Price(min, max) => {
                self.view = self.update_filters(|c| c.with_price_range(min, max))?;
                render::page(&self.view)
            }
            Command::Brands(brands) => {
                self.view = self.update_filters(|c| c.with_brands(brands))?;
                render::page(&self.view)
            }
            Command::Rating(min) => {
                self.view = self.update_filters(|c| c.with_min_rating(min))?;
                render::page(&self.view)
            }
            Command::Reset => {
                self.view = self.view.reset_filters();
                render::page(&self.view)
            }
            Command::Sort(key, direction) => {
                self.view = self.view.set_sort(key, direction);
                render::page(&self.view)
            }
            Command::Page(page) => {
                self.view = self.view.set_page(page)?;
                render::page(&self.view)
            }
            Command::Size(size) => {
                self.view = self.view.set_page_size(size)?;
                render::page(&self.view)
            }
            Command::Show => format!(
                "{}\n{}",
                render::criteria(&self.view),
                render::page(&self.view)
            ),
            Command::Options => render::filter_options(&self.view.filter_options()),
            Command::Detail(id) => self
                .view
                .catalog()
                .find_product_by_id(id)
                .map(render::product_detail)
                .ok_or(SessionError::ProductNotFound(id))?,
            Command::Add(id, quantity) => {
                if self.view.catalog().find_product_by_id(id).is_none() {
                    return Err(SessionError::ProductNotFound(id));
                }
                self.cart = self.cart.add_item(id, quantity)?;
                self.cart_text()
            }
            Command::Remove(id) => {
                self.cart = self.cart.remove_item(id);
                self.cart_text()
            }
            Command::Quantity(id, quantity) => {
                self.cart = self.cart.set_quantity(id, quantity);
                self.cart_text()
            }
            Command::Clear => {
                self.cart = self.cart.clear();
                self.cart_text()
            }
            Command::Cart => self.cart_text(),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        };
        Ok(text)
    }

    fn cart_text(&self) -> String {
        render::cart(&self.cart.summary(self.view.catalog()))
    }

    /// Read commands from `input` until EOF or `quit`, writing results to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run_loop<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> std::io::Result<()> {
        writeln!(output, "{}", render::page(&self.view))?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => match self.apply(command) {
                    Ok(text) => writeln!(output, "{text}")?,
                    Err(e) => writeln!(output, "error: {e}")?,
                },
                Err(e) => writeln!(output, "error: {e}")?,
            }
        }
        Ok(())
    }
}

/// Run the `session` command on stdin and stdout.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the terminal fails.
pub fn run(source: &CatalogSource, config: &CliConfig) -> Result<(), CliError> {
    let catalog = load_catalog(source, config)?;
    let view = ViewState::new(catalog).set_page_size(config.page_size)?;
    let mut session = Session::new(view);

    info!("Session started");
    session.run_loop(std::io::stdin().lock(), std::io::stdout().lock())?;
    info!(
        items = session.cart().item_count(),
        matches = session.view().total_match_count(),
        "Session ended"
    );
    Ok(())
}
