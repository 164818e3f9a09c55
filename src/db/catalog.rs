use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Read-only movie catalog indexed by position
///
/// Positions are shared with the similarity matrix: the movie at position `i`
/// owns row `i` and column `i`.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<Movie>,
    positions_by_title: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog and its title index
    ///
    /// When several movies share a title, the lowest position is the one
    /// `resolve` returns.
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut positions_by_title = HashMap::with_capacity(movies.len());
        let mut duplicates = 0usize;

        for (position, movie) in movies.iter().enumerate() {
            if positions_by_title.contains_key(&movie.title) {
                duplicates += 1;
                tracing::debug!(
                    title = %movie.title,
                    position = position,
                    "Duplicate title shadowed by lower position"
                );
                continue;
            }
            positions_by_title.insert(movie.title.clone(), position);
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates = duplicates,
                "Catalog contains duplicate titles; lookups resolve to the lowest position"
            );
        }

        Self {
            movies,
            positions_by_title,
        }
    }

    /// Position of the movie with exactly this title
    pub fn resolve(&self, title: &str) -> AppResult<usize> {
        self.positions_by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("No movie titled '{}'", title)))
    }

    /// Stored fields for the movie at `position`
    pub fn fields(&self, position: usize) -> AppResult<&Movie> {
        self.movies.get(position).ok_or(AppError::IndexOutOfRange {
            position,
            len: self.movies.len(),
        })
    }

    /// All titles in position order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|movie| movie.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
