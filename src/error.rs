use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures a catalog command can run into.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid year '{input}' - please enter a whole number.")]
    InvalidYear {
        input: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Year '{input}' is out of range.")]
    YearOutOfRange { input: String },

    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render catalog: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
