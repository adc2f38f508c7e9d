//! Media filename handling
//!
//! Media files are expected to follow the `<show>-s<NN>e<NN>-<title>.<ext>`
//! convention, with underscores standing in for spaces. This module extracts
//! the show, season, episode and title from such names, composes names in the
//! same convention, and reads listing files with one filename per line.

use crate::catalog::{CatalogError, Episode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Season/episode marker, e.g. `-s01e03-`
static EPISODE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-s([0-9]{2})e([0-9]{2})-").expect("Invalid episode marker"));

/// Errors that can occur while reading filename listings
#[derive(Debug, Error)]
pub enum FilenameError {
    /// Failed to read the listing file
    #[error("Failed to read listing {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Metadata extracted from a media filename
///
/// Season and episode are kept as the two-digit text found in the name;
/// [`ParsedFilename::to_episode`] turns them into numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFilename {
    /// Show name, underscores replaced by spaces
    pub show_name: String,
    /// Season number as written, e.g. `"01"`
    pub season: String,
    /// Episode number as written, e.g. `"03"`
    pub episode: String,
    /// Episode title, underscores replaced by spaces
    pub title: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
}

impl ParsedFilename {
    /// Builds a catalog episode filed under the parsed season.
    pub fn to_episode(&self) -> Result<Episode, CatalogError> {
        Episode::from_fields(&self.title, &self.episode, Some(&self.season), None)
    }

    /// Season as a number.
    pub fn season_number(&self) -> Result<u32, CatalogError> {
        crate::catalog::parse_number("season", &self.season)
    }
}

/// Extracts show, season, episode, title and extension from a filename
///
/// Only the final path component is considered. Returns `None` when the name
/// does not carry a `-sNNeNN-` marker.
///
/// # Examples
///
/// ```
/// use media_manager::parse_media_filename;
///
/// let parsed = parse_media_filename("Silicon_Valley-s01e03-Articles_Of_Incorporation.avi").unwrap();
/// assert_eq!(parsed.show_name, "Silicon Valley");
/// assert_eq!(parsed.season, "01");
/// assert_eq!(parsed.episode, "03");
/// assert_eq!(parsed.title, "Articles Of Incorporation");
/// assert_eq!(parsed.extension, ".avi");
/// ```
pub fn parse_media_filename(filename: &str) -> Option<ParsedFilename> {
    let file_name = filename
        .rfind(['/', '\\'])
        .map_or(filename, |index| &filename[index + 1..]);
    let (stem, extension) = split_extension(file_name);

    let captures = EPISODE_MARKER.captures(stem)?;
    let marker = captures.get(0)?;

    Some(ParsedFilename {
        show_name: stem[..marker.start()].replace('_', " "),
        season: captures[1].to_string(),
        episode: captures[2].to_string(),
        title: stem[marker.end()..].replace('_', " "),
        extension: extension.to_string(),
    })
}

/// Splits `name.ext` into `("name", ".ext")`
///
/// Leading dots do not start an extension, so `.hidden` has none.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if file_name[..dot].chars().any(|c| c != '.') => {
            (&file_name[..dot], &file_name[dot..])
        }
        _ => (file_name, ""),
    }
}

/// Non-empty lines of a listing, trailing whitespace removed
pub fn listing_entries(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses every non-empty line of a listing
pub fn parse_listing(listing: &str) -> Vec<Option<ParsedFilename>> {
    listing_entries(listing)
        .into_iter()
        .map(parse_media_filename)
        .collect()
}

/// Reads the non-empty lines of a listing file
pub fn read_listing(path: &Path) -> Result<Vec<String>, FilenameError> {
    let content = fs::read_to_string(path).map_err(|e| FilenameError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(listing_entries(&content)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Reads a listing file and parses each line
pub fn load_listing(path: &Path) -> Result<Vec<Option<ParsedFilename>>, FilenameError> {
    Ok(read_listing(path)?
        .iter()
        .map(|line| parse_media_filename(line))
        .collect())
}

/// Sanitizes a string for use in filenames by replacing problematic characters
///
/// Replaces characters that are invalid or problematic in filenames across platforms:
/// - Path separators: / \
/// - Reserved characters: : * ? " < > |
/// - Control characters
/// - Trim leading/trailing whitespace and dots
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    sanitized
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Composes a filename in the `<show>-s<NN>e<NN>-<title>.<ext>` convention
///
/// The extension may be given with or without its leading dot.
///
/// # Examples
///
/// ```
/// use media_manager::media_filename;
///
/// assert_eq!(
///     media_filename("Silicon Valley", 1, 3, "Articles Of Incorporation", "avi"),
///     "Silicon_Valley-s01e03-Articles_Of_Incorporation.avi"
/// );
/// ```
pub fn media_filename(show: &str, season: u32, episode: u32, title: &str, extension: &str) -> String {
    let show = sanitize_filename(show).replace(' ', "_");
    let title = sanitize_filename(title).replace(' ', "_");
    let extension = extension.trim_start_matches('.');

    let mut name = format!("{show}-s{season:02}e{episode:02}-{title}");
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }
    name
}
