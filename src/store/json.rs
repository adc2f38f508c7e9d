//! JSON file store
//!
//! Each show is kept in its own pretty-printed JSON document inside the data
//! directory. Documents are rebuilt into a [`TvShow`] on every read so stored
//! data goes through the same checks as data entered by hand.

use super::{EpisodeRecord, MediaRepository, StoreError};
use crate::catalog::{CatalogError, Episode, TvShow};
use crate::temp::create_temp_file;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of a show
#[derive(Debug, Serialize, Deserialize)]
struct ShowDocument {
    name: String,
    #[serde(default)]
    episodes: Vec<StoredEpisode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEpisode {
    title: String,
    season: u32,
    number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
}

/// A [`MediaRepository`] keeping one JSON document per show
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// The directory where show documents are stored
    data_dir: PathBuf,
}

impl JsonStore {
    /// Opens the store in the platform's data directory
    ///
    /// On Linux this resolves to `~/.local/share/media_manager/shows`.
    pub fn open_default() -> Result<Self, StoreError> {
        let proj_dirs = directories::ProjectDirs::from("org", "media-manager", "media_manager")
            .ok_or(StoreError::DataDirectoryNotFound)?;

        Self::open(&proj_dirs.data_dir().join("shows"))
    }

    /// Opens or creates a store in the given directory
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::DirectoryCreationFailed {
            path: data_dir.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %data_dir.display(), "Opened show store");

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Returns the path to the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads a show with all of its seasons and episodes
    ///
    /// Returns `None` if the show was never registered.
    pub fn load_show(&self, name: &str) -> Result<Option<TvShow>, StoreError> {
        let path = self.document_path(name);
        let Some(document) = self.read_document(&path)? else {
            return Ok(None);
        };
        if document.name != name {
            return Err(StoreError::NameConflict {
                name: name.to_string(),
                existing: document.name,
            });
        }

        let show = build_show(&document).map_err(|e| StoreError::InvalidDocument {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(show = %name, episodes = show.episode_count(), "Loaded show");
        Ok(Some(show))
    }

    /// Writes a show, replacing any previous document
    pub fn save_show(&self, show: &TvShow) -> Result<(), StoreError> {
        let path = self.document_path(show.name());
        let document = ShowDocument {
            name: show.name().to_string(),
            episodes: show
                .seasons()
                .iter()
                .flat_map(|season| {
                    season.iter().map(move |episode| StoredEpisode {
                        title: episode.title().to_string(),
                        season: season.number(),
                        number: episode.number(),
                        duration: episode.duration().ok(),
                    })
                })
                .collect(),
        };

        let content = serde_json::to_string_pretty(&document)?;

        let temp = create_temp_file(&self.data_dir, "show", "tmp").map_err(|e| {
            StoreError::WriteFailed {
                path: self.data_dir.clone(),
                source: e,
            }
        })?;
        fs::write(temp.path(), content).map_err(|e| StoreError::WriteFailed {
            path: temp.path().to_path_buf(),
            source: e,
        })?;
        temp.persist(&path).map_err(|e| StoreError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(show = %show.name(), path = %path.display(), "Saved show");
        Ok(())
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_name(name)))
    }

    fn read_document(&self, path: &Path) -> Result<Option<ShowDocument>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| StoreError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document =
            serde_json::from_str(&content).map_err(|e| StoreError::DeserializationFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Some(document))
    }

    fn require_show(&self, name: &str) -> Result<TvShow, StoreError> {
        self.load_show(name)?
            .ok_or_else(|| StoreError::ShowNotFound(name.to_string()))
    }
}

impl MediaRepository for JsonStore {
    fn shows(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|e| StoreError::ReadFailed {
            path: self.data_dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::ReadFailed {
                    path: self.data_dir.clone(),
                    source: e,
                })?
                .path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_document(&path) {
                Ok(Some(document)) => names.push(document.name),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable show document");
                }
            }
        }

        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        Ok(names)
    }

    fn create_show(&self, name: &str) -> Result<(), StoreError> {
        if self.load_show(name)?.is_some() {
            return Ok(());
        }

        let show = TvShow::new(name)?;
        self.save_show(&show)?;
        tracing::info!(show = %name, "Registered new show");
        Ok(())
    }

    fn episodes(&self, show: &str) -> Result<Vec<EpisodeRecord>, StoreError> {
        let show = self.require_show(show)?;

        Ok(show
            .seasons()
            .iter()
            .flat_map(|season| {
                season
                    .iter()
                    .map(move |episode| EpisodeRecord::new(episode.title(), season.number(), episode.number()))
            })
            .collect())
    }

    fn add_episode(&self, show: &str, episode: &EpisodeRecord) -> Result<(), StoreError> {
        let mut tv_show = self.require_show(show)?;

        tv_show.add_episode(Episode::new(episode.title.as_str(), episode.number)?, episode.season)?;
        self.save_show(&tv_show)?;

        tracing::debug!(
            show = %show,
            season = episode.season,
            number = episode.number,
            "Added episode"
        );
        Ok(())
    }
}

fn build_show(document: &ShowDocument) -> Result<TvShow, CatalogError> {
    let mut show = TvShow::new(document.name.as_str())?;

    for stored in &document.episodes {
        let mut episode = Episode::new(stored.title.as_str(), stored.number)?;
        if let Some(duration) = stored.duration {
            episode.set_duration(duration)?;
        }
        show.add_episode(episode, stored.season)?;
    }

    Ok(show)
}

/// Sanitizes a name for use in file paths
///
/// Converts to lowercase and replaces all characters that are not
/// a-z, 0-9, or hyphen with underscores.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
