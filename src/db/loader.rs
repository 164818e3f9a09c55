//! Start-up loading of the catalog and similarity matrix from JSON files
//!
//! The catalog is accepted in two shapes:
//! 1. Column-oriented, as dumped by a dataframe: `{"title": {"0": "Avatar", ...}, ...}`
//! 2. Record-oriented: `[{"movie_id": 19995, "title": "Avatar", ...}, ...]`
//!
//! The similarity file is an array of rows; `null` cells become NaN.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::{
    db::{Catalog, SimilarityMatrix},
    error::{AppError, AppResult},
    models::{ExternalId, Movie},
};

#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(alias = "id", alias = "external_id")]
    movie_id: ExternalId,
    title: String,
    #[serde(default, alias = "original_overview")]
    overview: Option<String>,
    #[serde(alias = "rating")]
    vote_average: f64,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie {
            external_id: record.movie_id,
            title: record.title,
            overview: record.overview.unwrap_or_default(),
            rating: record.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieColumns {
    movie_id: BTreeMap<usize, ExternalId>,
    title: BTreeMap<usize, String>,
    #[serde(alias = "overview")]
    original_overview: BTreeMap<usize, Option<String>>,
    vote_average: BTreeMap<usize, f64>,
}

impl MovieColumns {
    /// Zips the columns into rows, requiring every column to cover exactly `0..len`
    fn into_movies(self) -> AppResult<Vec<Movie>> {
        let len = self.title.len();

        check_column("movie_id", self.movie_id.keys(), len)?;
        check_column("title", self.title.keys(), len)?;
        check_column("original_overview", self.original_overview.keys(), len)?;
        check_column("vote_average", self.vote_average.keys(), len)?;

        let movies = self
            .movie_id
            .into_values()
            .zip(self.title.into_values())
            .zip(self.original_overview.into_values())
            .zip(self.vote_average.into_values())
            .map(|(((external_id, title), overview), rating)| Movie {
                external_id,
                title,
                overview: overview.unwrap_or_default(),
                rating,
            })
            .collect();

        Ok(movies)
    }
}

fn check_column<'a>(
    name: &str,
    indices: impl ExactSizeIterator<Item = &'a usize>,
    len: usize,
) -> AppResult<()> {
    if indices.len() != len {
        return Err(AppError::InvalidData(format!(
            "Catalog column '{}' has {} entries, expected {}",
            name,
            indices.len(),
            len
        )));
    }
    // BTreeMap keys are sorted and unique, so matching 0..len one by one is enough
    for (expected, &index) in indices.enumerate() {
        if index != expected {
            return Err(AppError::InvalidData(format!(
                "Catalog column '{}' is missing row {}",
                name, expected
            )));
        }
    }
    Ok(())
}

/// Parses catalog JSON in either supported shape
pub fn parse_catalog(json: &str) -> AppResult<Catalog> {
    // Dispatch on the outer shape; integer column keys don't survive an untagged enum
    let movies = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<MovieRecord>>(json)?
            .into_iter()
            .map(Movie::from)
            .collect()
    } else {
        serde_json::from_str::<MovieColumns>(json)?.into_movies()?
    };
    Ok(Catalog::new(movies))
}

/// Parses similarity JSON, mapping `null` scores to NaN
pub fn parse_similarity(json: &str) -> AppResult<SimilarityMatrix> {
    let rows: Vec<Vec<Option<f64>>> = serde_json::from_str(json)?;
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(|s| s.unwrap_or(f64::NAN)).collect())
        .collect();
    SimilarityMatrix::from_rows(rows)
}

/// Checks that catalog and matrix describe the same positions
pub fn check_aligned(catalog: &Catalog, similarity: &SimilarityMatrix) -> AppResult<()> {
    if catalog.len() != similarity.size() {
        return Err(AppError::InvalidData(format!(
            "Catalog has {} movies but similarity matrix is {}x{}",
            catalog.len(),
            similarity.size(),
            similarity.size()
        )));
    }
    Ok(())
}

/// Loads and validates both data files
pub fn load_data(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<(Catalog, SimilarityMatrix)> {
    let catalog_path = catalog_path.as_ref();
    let similarity_path = similarity_path.as_ref();

    let catalog = parse_catalog(&std::fs::read_to_string(catalog_path)?)?;
    tracing::info!(
        path = %catalog_path.display(),
        movies = catalog.len(),
        "Loaded movie catalog"
    );

    let similarity = parse_similarity(&std::fs::read_to_string(similarity_path)?)?;
    tracing::info!(
        path = %similarity_path.display(),
        size = similarity.size(),
        "Loaded similarity matrix"
    );

    check_aligned(&catalog, &similarity)?;

    Ok((catalog, similarity))
}
