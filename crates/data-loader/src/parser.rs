//! CSV parsing for the catalog and ratings files.
//!
//! Both files carry a header row naming their columns:
//! - catalog: `movieId,fetched_title,poster_url,overview` (extra columns
//!   are ignored)
//! - ratings: `userId,movieId,rating` (extra columns are ignored)
//!
//! Rows whose join key (`movieId`, or `userId` for ratings) is missing or
//! unparseable are skipped with a warning rather than failing the whole
//! load; missing display fields fall back to sentinel values.

use crate::error::{DataLoadError, Result};
use crate::types::{Catalog, Interactions, Movie, Rating, PLACEHOLDER_POSTER, UNKNOWN_TITLE};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Read a file as a lossy UTF-8 string.
///
/// Scraped metadata is not guaranteed to be clean UTF-8; invalid bytes are
/// replaced rather than rejected.
fn read_to_string_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split CSV content into records, honoring RFC-4180 quoting.
///
/// Quoted fields may contain commas, doubled quotes, and line breaks (movie
/// overviews regularly do), so this cannot be a per-line split.
fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {} // swallowed; records end at '\n'
            '\n' => {
                record.push(std::mem::take(&mut field));
                // Skip blank lines
                if record.len() > 1 || !record[0].is_empty() {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(c),
        }
    }
    // Final record without trailing newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Resolve a required column name to its index in the header row.
fn column_index(header: &[String], file: &str, column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| DataLoadError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        })
}

fn field<'a>(record: &'a [String], idx: usize) -> &'a str {
    record.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Parse the movie catalog CSV into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let file = path.display().to_string();
    let content = read_to_string_lossy(path)?;
    parse_catalog_content(&file, &content)
}

fn parse_catalog_content(file: &str, content: &str) -> Result<Catalog> {
    let records = parse_records(content);

    let mut rows = records.into_iter();
    let header = rows.next().ok_or_else(|| DataLoadError::EmptyFile {
        file: file.to_string(),
    })?;

    let id_col = column_index(&header, file, "movieId")?;
    let title_col = column_index(&header, file, "fetched_title")?;
    let poster_col = column_index(&header, file, "poster_url")?;
    let overview_col = column_index(&header, file, "overview")?;

    let mut catalog = Catalog::new();
    let mut skipped = 0usize;
    for (row_no, record) in rows.enumerate() {
        // Header is row 1; data starts at row 2
        let line = row_no + 2;
        let id = match field(&record, id_col).parse() {
            Ok(id) => id,
            Err(_) => {
                warn!(file = %file, line, "skipping catalog row with bad movieId");
                skipped += 1;
                continue;
            }
        };

        let title = field(&record, title_col);
        let poster_url = field(&record, poster_col);
        catalog.insert(Movie {
            id,
            title: if title.is_empty() {
                UNKNOWN_TITLE.to_string()
            } else {
                title.to_string()
            },
            poster_url: if poster_url.is_empty() {
                PLACEHOLDER_POSTER.to_string()
            } else {
                poster_url.to_string()
            },
            overview: field(&record, overview_col).to_string(),
        });
    }

    if skipped > 0 {
        warn!(file = %file, skipped, "dropped malformed catalog rows");
    }
    Ok(catalog)
}

/// Parse the ratings CSV into an `Interactions` store.
pub fn parse_ratings(path: &Path) -> Result<Interactions> {
    let file = path.display().to_string();
    let content = read_to_string_lossy(path)?;
    parse_ratings_content(&file, &content)
}

fn parse_ratings_content(file: &str, content: &str) -> Result<Interactions> {
    let records = parse_records(content);

    let mut rows = records.into_iter();
    let header = rows.next().ok_or_else(|| DataLoadError::EmptyFile {
        file: file.to_string(),
    })?;

    let user_col = column_index(&header, file, "userId")?;
    let movie_col = column_index(&header, file, "movieId")?;
    let rating_col = column_index(&header, file, "rating")?;

    let mut interactions = Interactions::new();
    let mut skipped = 0usize;
    for (row_no, record) in rows.enumerate() {
        let line = row_no + 2;
        let parsed = (
            field(&record, user_col).parse(),
            field(&record, movie_col).parse(),
            field(&record, rating_col).parse(),
        );
        match parsed {
            (Ok(user_id), Ok(movie_id), Ok(rating)) => interactions.insert(Rating {
                user_id,
                movie_id,
                rating,
            }),
            _ => {
                warn!(file = %file, line, "skipping malformed rating row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(file = %file, skipped, "dropped malformed rating rows");
    }
    Ok(interactions)
}
