use crate::env::Session;
use crate::io_adapters::LineSource;
use anyhow::Result;
use std::io::Write;

/// Object-safe trait for any command the catalog loop can run.
///
/// Commands may prompt for more input through `input`, write results to `out`
/// and change the `session` (append movies, stop the loop).
pub trait CatalogCommand {
    /// Executes the command.
    fn execute(
        self: Box<Self>,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()>;
}

/// Factory that tries to create a command from a token and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `token`.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided token and arguments.
    fn try_create(&self, token: &str, args: &[&str]) -> Option<Box<dyn CatalogCommand>>;
}
