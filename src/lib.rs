//! media_manager - Catalog TV shows, seasons and episodes
//!
//! This library provides the in-memory media catalog, a parser for media file
//! names, a JSON file store, and the glue to import a directory of video files
//! into that store.

pub mod catalog;
pub mod cli;
pub mod config;
mod file_resolver;
mod filename;
pub mod store;
mod temp;

pub use catalog::{CatalogError, Episode, FlatTvShow, Media, Movie, Season, TvShow};
pub use config::{ConfigError, Settings};
pub use file_resolver::{FileResolverError, VideoFile, scan_for_videos};
pub use filename::{
    FilenameError, ParsedFilename, listing_entries, load_listing, media_filename, parse_listing,
    parse_media_filename, read_listing, sanitize_filename,
};
pub use store::{EpisodeRecord, JsonStore, MediaRepository, ShowSession, StoreError};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Progress event emitted during a directory import
///
/// These events allow library users to track progress and provide feedback
/// while files are being imported.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Import started
    Started { directory: PathBuf },

    /// Scanning directory for video files
    ScanningVideos,

    /// Video files found
    VideosFound { count: usize },

    /// An episode was added to the store
    Imported {
        path: PathBuf,
        show_name: String,
        season: u32,
        number: u32,
    },

    /// The file name does not follow the `<show>-sNNeNN-<title>` convention
    SkippedUnrecognized { path: PathBuf },

    /// The file name parsed but its values or show name were rejected
    SkippedInvalid { path: PathBuf, reason: String },

    /// The episode is already in the store
    SkippedDuplicate { path: PathBuf },

    /// Import complete
    Complete { summary: ImportSummary },
}

/// Counts of what happened during an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub unrecognized: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

/// Top-level error type for media_manager operations
#[derive(Debug, Error)]
pub enum MediaManagerError {
    /// Error in the catalog model
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error during file resolution
    #[error("File resolution error: {0}")]
    FileResolver(#[from] FileResolverError),

    /// Error while reading a filename listing
    #[error("Listing error: {0}")]
    Filename(#[from] FilenameError),

    /// Error in the show store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error in the settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while prompting the user
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Imports a directory of video files into a repository
///
/// This function scans the given directory recursively for video files,
/// parses each file name, registers the show it names, and adds the episode.
/// Files with unrecognized names, values the catalog rejects, show names that
/// clash with a stored show, or episodes already present are skipped and
/// reported through the callback. Storage failures abort the import.
///
/// # Arguments
///
/// * `directory` - The directory path to import
/// * `repository` - Where shows and episodes are stored
/// * `progress_callback` - Closure called with progress events (can be empty for silent operation)
///
/// # Examples
///
/// ```no_run
/// use media_manager::{JsonStore, ProgressEvent, import_directory};
/// use std::path::Path;
///
/// let store = JsonStore::open_default().unwrap();
/// let summary = import_directory(Path::new("/path/to/videos"), &store, |event| {
///     if let ProgressEvent::Imported { show_name, season, number, .. } = event {
///         println!("{show_name} s{season:02}e{number:02}");
///     }
/// })
/// .unwrap();
/// println!("Imported {} episode(s)", summary.imported);
/// ```
pub fn import_directory<R, F>(
    directory: &Path,
    repository: &R,
    mut progress_callback: F,
) -> Result<ImportSummary, MediaManagerError>
where
    R: MediaRepository + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Started {
        directory: directory.to_path_buf(),
    });

    progress_callback(ProgressEvent::ScanningVideos);
    let videos = scan_for_videos(directory)?;
    progress_callback(ProgressEvent::VideosFound {
        count: videos.len(),
    });
    tracing::info!(directory = %directory.display(), count = videos.len(), "Scanned for videos");

    let mut summary = ImportSummary::default();

    for video in &videos {
        let path = video.path.clone();

        let Some(parsed) = video.file_name().and_then(parse_media_filename) else {
            tracing::debug!(path = %path.display(), "Unrecognized file name");
            summary.unrecognized += 1;
            progress_callback(ProgressEvent::SkippedUnrecognized { path });
            continue;
        };

        match import_one(repository, &parsed) {
            Ok((season, number)) => {
                summary.imported += 1;
                progress_callback(ProgressEvent::Imported {
                    path,
                    show_name: parsed.show_name,
                    season,
                    number,
                });
            }
            Err(StoreError::Catalog(CatalogError::Duplicate(_))) => {
                summary.duplicates += 1;
                progress_callback(ProgressEvent::SkippedDuplicate { path });
            }
            Err(e) if e.is_rejection() => {
                tracing::warn!(path = %path.display(), error = %e, "Rejected file");
                summary.invalid += 1;
                progress_callback(ProgressEvent::SkippedInvalid {
                    path,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        imported = summary.imported,
        unrecognized = summary.unrecognized,
        invalid = summary.invalid,
        duplicates = summary.duplicates,
        "Import complete"
    );
    progress_callback(ProgressEvent::Complete { summary });

    Ok(summary)
}

/// Adds a single parsed file to the repository, returning its season and number.
fn import_one<R>(repository: &R, parsed: &ParsedFilename) -> Result<(u32, u32), StoreError>
where
    R: MediaRepository + ?Sized,
{
    let episode = parsed.to_episode()?;
    let season = parsed.season_number()?;

    repository.create_show(&parsed.show_name)?;
    repository.add_episode(
        &parsed.show_name,
        &EpisodeRecord::new(episode.title(), season, episode.number()),
    )?;

    Ok((season, episode.number()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_resolver::tests::{AVI_HEADER, scratch_dir, write_file};
    use std::fs;

    #[test]
    fn test_import_directory() {
        let videos = scratch_dir("import_videos");
        let data = scratch_dir("import_data");

        write_file(&videos.join("Silicon_Valley-s01e02-The_Cap_Table.avi"), AVI_HEADER);
        write_file(&videos.join("Silicon_Valley-s01e01-Minimum_Viable_Product.avi"), AVI_HEADER);
        write_file(&videos.join("holiday.avi"), AVI_HEADER);
        write_file(&videos.join("Silicon_Valley-s01e00-Unaired.avi"), AVI_HEADER);
        write_file(&videos.join("readme.txt"), b"plain text");

        let store = JsonStore::open(&data).unwrap();
        let mut events = Vec::new();
        let summary = import_directory(&videos, &store, |event| events.push(event)).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                unrecognized: 1,
                invalid: 1,
                duplicates: 0,
            }
        );
        assert_eq!(events.first(), Some(&ProgressEvent::Started { directory: videos.clone() }));
        assert_eq!(events.last(), Some(&ProgressEvent::Complete { summary }));
        assert!(events.contains(&ProgressEvent::VideosFound { count: 4 }));

        assert_eq!(store.shows().unwrap(), vec!["Silicon Valley"]);
        assert_eq!(
            store.episodes("Silicon Valley").unwrap(),
            vec![
                EpisodeRecord::new("Minimum Viable Product", 1, 1),
                EpisodeRecord::new("The Cap Table", 1, 2),
            ]
        );

        // A second run finds everything already imported.
        let summary = import_directory(&videos, &store, |_| {}).unwrap();
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.duplicates, 2);

        fs::remove_dir_all(&videos).ok();
        fs::remove_dir_all(&data).ok();
    }

    #[test]
    fn test_import_continues_past_name_conflict() {
        let videos = scratch_dir("import_conflict_videos");
        let data = scratch_dir("import_conflict_data");

        write_file(&videos.join("The_Wire-s01e01-Pilot.avi"), AVI_HEADER);
        write_file(&videos.join("the_wire-s01e02-Second.avi"), AVI_HEADER);
        write_file(&videos.join("zzz_Show-s01e01-Later.avi"), AVI_HEADER);

        let store = JsonStore::open(&data).unwrap();
        let mut events = Vec::new();
        let summary = import_directory(&videos, &store, |event| events.push(event)).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.invalid, 1);
        assert_eq!(events.last(), Some(&ProgressEvent::Complete { summary }));
        assert!(events.iter().any(|event| matches!(
            event,
            ProgressEvent::SkippedInvalid { path, reason }
                if path.ends_with("the_wire-s01e02-Second.avi") && reason.contains("The Wire")
        )));

        assert_eq!(store.shows().unwrap(), vec!["The Wire", "zzz Show"]);
        assert_eq!(
            store.episodes("The Wire").unwrap(),
            vec![EpisodeRecord::new("Pilot", 1, 1)]
        );

        fs::remove_dir_all(&videos).ok();
        fs::remove_dir_all(&data).ok();
    }

    #[test]
    fn test_import_missing_directory() {
        let data = scratch_dir("import_missing");
        let store = JsonStore::open(&data).unwrap();

        let result = import_directory(Path::new("/nonexistent/videos"), &store, |_| {});
        assert!(matches!(result, Err(MediaManagerError::FileResolver(_))));

        fs::remove_dir_all(&data).ok();
    }
}
