//! Media catalog model
//!
//! This module holds the in-memory catalog: a [`TvShow`] owns its [`Season`]s,
//! and each season owns its [`Episode`]s. All mutation goes through the owning
//! parent so the ordering and uniqueness rules are enforced in one place.
//!
//! The model performs no I/O. Errors are returned as [`CatalogError`] and it is
//! up to the caller to turn them into user-facing messages.

mod episode;
mod flat;
mod movie;
mod season;
mod show;

pub use episode::Episode;
pub use flat::FlatTvShow;
pub use movie::Movie;
pub use season::Season;
pub use show::TvShow;

use thiserror::Error;

/// Errors raised by the catalog model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required field is missing or malformed
    #[error("Invalid value: {0}")]
    Validation(String),

    /// An entry with the same identity key already exists
    #[error("Already exists: {0}")]
    Duplicate(String),

    /// A lookup by identity key found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// An optional attribute was read before being set
    #[error("Not set: {0}")]
    NotSet(String),
}

/// Common behaviour of anything that can be watched.
pub trait Media {
    /// The display title.
    fn title(&self) -> &str;

    /// Running time in seconds, if known.
    fn duration_seconds(&self) -> Option<u32>;

    /// Running time split into `(hours, minutes)`.
    ///
    /// Returns `None` when no duration is known. Leftover seconds are
    /// truncated.
    fn hm_duration(&self) -> Option<(u32, u32)> {
        self.duration_seconds()
            .map(|seconds| (seconds / 3600, seconds % 3600 / 60))
    }
}

/// Checks that a title holds something other than whitespace.
pub(crate) fn validate_title(title: &str) -> Result<(), CatalogError> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation(
            "title must not be empty or whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Checks that an identity number is positive.
pub(crate) fn validate_number(what: &str, number: u32) -> Result<(), CatalogError> {
    if number == 0 {
        return Err(CatalogError::Validation(format!(
            "{what} number must be a positive integer"
        )));
    }
    Ok(())
}

/// Coerces user or storage input into a positive integer.
pub(crate) fn parse_number(what: &str, raw: &str) -> Result<u32, CatalogError> {
    let number = raw.trim().parse::<u32>().map_err(|_| {
        CatalogError::Validation(format!("{what} number is not an integer: '{raw}'"))
    })?;
    validate_number(what, number)?;
    Ok(number)
}

/// Coerces an optional field. Blank or zero means "not provided".
pub(crate) fn parse_optional(what: &str, raw: Option<&str>) -> Result<Option<u32>, CatalogError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let value = raw.parse::<u32>().map_err(|_| {
        CatalogError::Validation(format!("{what} is not an integer: '{raw}'"))
    })?;

    Ok((value != 0).then_some(value))
}
