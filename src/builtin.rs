use crate::catalog::{Movie, parse_year, render};
use crate::command::{CatalogCommand, CommandFactory};
use crate::env::Session;
use crate::error::{CatalogError, Result};
use crate::interpreter::{Factory, UNKNOWN_COMMAND};
use crate::io_adapters::LineSource;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use tracing::{debug, info, warn};

pub(crate) const NAME_PROMPT: &str = "Enter the movie name: ";
pub(crate) const DIRECTOR_PROMPT: &str = "Enter the movie director:";
pub(crate) const YEAR_PROMPT: &str = "Enter the movie release year: ";
pub(crate) const FIND_PROMPT: &str = "Enter the movie name to find: ";

/// Commands known to the catalog at compile time.
///
/// Inline arguments are parsed with [`argh`] (`FromArgs`), so every command
/// gets `--help` and argument validation for free.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Token that selects the command at the menu prompt, e.g. "a".
    fn key() -> &'static str;

    fn execute(
        self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()>;
}

impl<T: BuiltinCommand> CatalogCommand for T {
    fn execute(
        self: Box<Self>,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> anyhow::Result<()> {
        match <T as BuiltinCommand>::execute(*self, input, out, session) {
            Ok(()) => Ok(()),
            // Bad user input ends the command, never the session.
            Err(e @ (CatalogError::InvalidYear { .. } | CatalogError::YearOutOfRange { .. })) => {
                warn!(command = T::key(), "{}", e);
                writeln!(out, "{}", e)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl CatalogCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _input: &mut dyn LineSource,
        out: &mut dyn Write,
        _session: &mut Session,
    ) -> anyhow::Result<()> {
        // `--help` output is shown as-is, anything argh rejects reads as an unknown command.
        if self.is_error {
            warn!("rejected command arguments: {}", self.output.trim_end());
            writeln!(out, "{}", UNKNOWN_COMMAND)?;
        } else {
            writeln!(out, "{}", self.output.trim_end())?;
        }
        Ok(())
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, token: &str, args: &[&str]) -> Option<Box<dyn CatalogCommand>> {
        if token == T::key() {
            Some(match T::from_args(&[token], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Add a movie. Prompts for its name, director and release year.
pub struct AddMovie {}

impl BuiltinCommand for AddMovie {
    fn key() -> &'static str {
        "a"
    }

    fn execute(
        self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        let Some(name) = input.read_line(NAME_PROMPT, out)? else {
            debug!("input ended while reading movie name");
            return Ok(());
        };
        let Some(director) = input.read_line(DIRECTOR_PROMPT, out)? else {
            debug!("input ended while reading movie director");
            return Ok(());
        };
        let Some(year) = input.read_line(YEAR_PROMPT, out)? else {
            debug!("input ended while reading movie year");
            return Ok(());
        };
        let year = parse_year(&year)?;

        info!(name = %name, director = %director, year, "movie added");
        session.catalog.push(Movie {
            name,
            director,
            year,
        });
        Ok(())
    }
}

#[derive(FromArgs)]
/// List every movie in the order it was added.
pub struct ShowMovies {}

impl BuiltinCommand for ShowMovies {
    fn key() -> &'static str {
        "l"
    }

    fn execute(
        self,
        _input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        writeln!(out, "{}", render(session.catalog.movies(), session.pretty)?)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Find movies whose name contains the query, ignoring case.
/// Prompts for the query when none is given.
pub struct FindMovie {
    #[argh(positional, greedy)]
    /// words to search for in movie names.
    pub query: Vec<String>,
}

impl BuiltinCommand for FindMovie {
    fn key() -> &'static str {
        "f"
    }

    fn execute(
        self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        let query = if self.query.is_empty() {
            match input.read_line(FIND_PROMPT, out)? {
                Some(q) => q.trim().to_string(),
                None => return Ok(()),
            }
        } else {
            self.query.join(" ")
        };

        let found = session.catalog.find_by_name(&query);
        debug!(query = %query, matches = found.len(), "find");
        if found.is_empty() {
            writeln!(out, "No movies found matching '{}'.", query)?;
        } else {
            writeln!(out, "{}", render(found, session.pretty)?)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Stop accepting commands and print the catalog.
pub struct Quit {}

impl BuiltinCommand for Quit {
    fn key() -> &'static str {
        "q"
    }

    fn execute(
        self,
        _input: &mut dyn LineSource,
        _out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        session.stop();
        Ok(())
    }
}
