//! Persistence for the media catalog
//!
//! The catalog model itself never touches storage. This module provides the
//! [`MediaRepository`] trait that collaborators program against, a JSON file
//! backed implementation, and [`ShowSession`], a handle bound to one show.

mod json;

pub use json::JsonStore;

use crate::catalog::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog rejected the data (validation, duplicate, missing entry)
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Failed to determine the platform data directory
    #[error("Failed to determine data directory location")]
    DataDirectoryNotFound,

    /// Failed to create or access the data directory
    #[error("Failed to create data directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a show document or the data directory
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a show document
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A show document is not valid JSON
    #[error("Failed to deserialize {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A show document parsed but holds data the catalog rejects
    #[error("Invalid show document {path}: {source}")]
    InvalidDocument { path: PathBuf, source: CatalogError },

    /// Failed to serialize a show document
    #[error("Failed to serialize data: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// No show with this name has been registered
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    /// Two different show names map to the same document
    #[error("Show '{name}' conflicts with existing show '{existing}'")]
    NameConflict { name: String, existing: String },
}

impl StoreError {
    /// Whether the store refused this one request while staying usable.
    ///
    /// Catalog rejections and show lookups or name clashes depend on the
    /// input only. Everything else is an I/O or document failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StoreError::Catalog(_) | StoreError::ShowNotFound(_) | StoreError::NameConflict { .. }
        )
    }
}

/// A stored episode as seen by collaborators: title, season and number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub title: String,
    pub season: u32,
    pub number: u32,
}

impl EpisodeRecord {
    pub fn new(title: impl Into<String>, season: u32, number: u32) -> Self {
        Self {
            title: title.into(),
            season,
            number,
        }
    }
}

/// Storage of shows and their episodes.
///
/// Implementors translate between their storage representation and the
/// catalog model, so everything they accept has passed the model's checks.
pub trait MediaRepository {
    /// Names of all registered shows, sorted case-insensitively.
    fn shows(&self) -> Result<Vec<String>, StoreError>;

    /// Registers a show. Registering an existing show is a no-op.
    fn create_show(&self, name: &str) -> Result<(), StoreError>;

    /// Episodes of a show, ordered by season and then number.
    fn episodes(&self, show: &str) -> Result<Vec<EpisodeRecord>, StoreError>;

    /// Adds an episode to a registered show.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] wrapping [`CatalogError::Duplicate`]
    /// when the show already has that season/number pair.
    fn add_episode(&self, show: &str, episode: &EpisodeRecord) -> Result<(), StoreError>;
}

/// A repository handle bound to a single show.
pub struct ShowSession<'r, R: MediaRepository + ?Sized> {
    repository: &'r R,
    show: String,
}

impl<'r, R: MediaRepository + ?Sized> ShowSession<'r, R> {
    /// Binds to `show`, registering it if it does not exist yet.
    pub fn open(repository: &'r R, show: &str) -> Result<Self, StoreError> {
        repository.create_show(show)?;
        Ok(Self {
            repository,
            show: show.to_string(),
        })
    }

    pub fn show(&self) -> &str {
        &self.show
    }

    pub fn get_episodes(&self) -> Result<Vec<EpisodeRecord>, StoreError> {
        self.repository.episodes(&self.show)
    }

    pub fn add_episode(&self, title: &str, season: u32, number: u32) -> Result<(), StoreError> {
        self.repository
            .add_episode(&self.show, &EpisodeRecord::new(title, season, number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_resolver::tests::scratch_dir;
    use std::fs;

    #[test]
    fn test_session_registers_show() {
        let dir = scratch_dir("session_open");
        let store = JsonStore::open(&dir).unwrap();

        let session = ShowSession::open(&store, "Silicon Valley").unwrap();
        assert_eq!(session.show(), "Silicon Valley");
        assert!(session.get_episodes().unwrap().is_empty());
        assert_eq!(store.shows().unwrap(), vec!["Silicon Valley"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_session_lists_by_season_then_number() {
        let dir = scratch_dir("session_order");
        let store = JsonStore::open(&dir).unwrap();
        let session = ShowSession::open(&store, "Show").unwrap();

        session.add_episode("Opener", 2, 1).unwrap();
        session.add_episode("Second", 1, 2).unwrap();
        session.add_episode("Pilot", 1, 1).unwrap();

        assert_eq!(
            session.get_episodes().unwrap(),
            vec![
                EpisodeRecord::new("Pilot", 1, 1),
                EpisodeRecord::new("Second", 1, 2),
                EpisodeRecord::new("Opener", 2, 1),
            ]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_session_duplicate() {
        let dir = scratch_dir("session_duplicate");
        let store = JsonStore::open(&dir).unwrap();
        let session = ShowSession::open(&store, "Show").unwrap();

        session.add_episode("Pilot", 1, 1).unwrap();
        assert!(matches!(
            session.add_episode("Pilot", 1, 1),
            Err(StoreError::Catalog(CatalogError::Duplicate(_)))
        ));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejections_are_told_apart_from_failures() {
        assert!(StoreError::Catalog(CatalogError::Validation("blank".into())).is_rejection());
        assert!(StoreError::ShowNotFound("Show".into()).is_rejection());
        assert!(
            StoreError::NameConflict {
                name: "the wire".into(),
                existing: "The Wire".into(),
            }
            .is_rejection()
        );
        assert!(!StoreError::DataDirectoryNotFound.is_rejection());
        assert!(
            !StoreError::ReadFailed {
                path: PathBuf::from("show.json"),
                source: std::io::Error::other("denied"),
            }
            .is_rejection()
        );
    }
}
