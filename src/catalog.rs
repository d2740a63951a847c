use crate::error::{CatalogError, Result};
use serde::Serialize;
use std::num::IntErrorKind;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub name: String,
    pub director: String,
    pub year: i64,
}

impl Movie {
    pub fn new(name: impl Into<String>, director: impl Into<String>, year: i64) -> Self {
        Self {
            name: name.into(),
            director: director.into(),
            year,
        }
    }
}

/// Parse a release year typed by the user. Surrounding whitespace is ignored.
pub fn parse_year(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|source| match source.kind().clone() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                CatalogError::YearOutOfRange {
                    input: input.to_string(),
                }
            }
            _ => CatalogError::InvalidYear {
                input: input.to_string(),
                source,
            },
        })
}

/// Ordered, append-only collection of movies.
///
/// Insertion order is preserved and duplicates are allowed. There is no way
/// to remove or edit an entry, so the length never decreases.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Linear scan for movies whose name contains `query`, ignoring case.
    ///
    /// An empty query matches every movie.
    pub fn find_by_name(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Render movies as a JSON array, compact or indented.
pub fn render<'a, I>(movies: I, pretty: bool) -> Result<String>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let movies: Vec<&Movie> = movies.into_iter().collect();
    let s = if pretty {
        serde_json::to_string_pretty(&movies)?
    } else {
        serde_json::to_string(&movies)?
    };
    Ok(s)
}
