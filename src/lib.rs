//! A tiny interactive movie catalog.
//!
//! The catalog keeps an ordered, in-memory list of movies for the lifetime of
//! the process and is driven by single-letter commands typed at a prompt:
//! `a` adds a movie, `l` lists them, `f` searches by name and `q` quits.
//! Nothing is persisted between runs.
//!
//! The main entry point is [`CatalogLoop`], which reads lines from any
//! [`LineSource`] and writes results to any `std::io::Write`. The public
//! modules [`command`] and [`env`] expose the traits and state needed to plug
//! in your own commands.

mod builtin;
pub mod catalog;
pub mod command;
pub mod env;
pub mod error;
mod interpreter;
pub mod io_adapters;
pub mod logger;

/// Just a convenient re-export of the interactive catalog loop.
///
/// See [`CatalogLoop`] for the high-level API and examples.
pub use interpreter::{CatalogLoop, MENU_PROMPT, UNKNOWN_COMMAND};
pub use io_adapters::{BufferedLines, LineSource, Readline};
