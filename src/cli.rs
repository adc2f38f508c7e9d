//! Helpers for the interactive episode manager
//!
//! Everything here is free of terminal I/O: functions take the text the user
//! typed and return the lines to print. The binary handles prompting.

use crate::catalog::CatalogError;
use crate::filename::parse_media_filename;
use crate::store::{EpisodeRecord, MediaRepository, ShowSession, StoreError};

/// Menu shown between actions
pub const MENU: &str = "
    [a] add an episode
    [e] list episodes
    [q] quit
";

/// An entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddEpisode,
    ListEpisodes,
    Quit,
}

impl MenuChoice {
    /// Maps the user's answer to a menu entry, `None` if it matches nothing.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "a" => Some(Self::AddEpisode),
            "e" => Some(Self::ListEpisodes),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Formats one listing line, e.g. `s01e03 Articles Of Incorporation`.
pub fn episode_line(record: &EpisodeRecord) -> String {
    format!("s{:02}e{:02} {}", record.season, record.number, record.title)
}

/// Lines describing all episodes of the session's show
pub fn list_episodes<R>(session: &ShowSession<'_, R>) -> Result<Vec<String>, StoreError>
where
    R: MediaRepository + ?Sized,
{
    let episodes = session.get_episodes()?;
    if episodes.is_empty() {
        return Ok(vec!["No episodes".to_string()]);
    }

    Ok(episodes.iter().map(episode_line).collect())
}

/// Adds an episode from raw user input and returns the message to show
///
/// Bad numbers, blank titles and duplicates are reported in the message and
/// leave the store untouched. Only storage failures are returned as errors.
/// See [`rejection_message`] for the wording.
pub fn add_episode<R>(
    session: &ShowSession<'_, R>,
    title: &str,
    season: &str,
    number: &str,
) -> Result<String, StoreError>
where
    R: MediaRepository + ?Sized,
{
    let (Some(season), Some(number)) = (coerce_number(season), coerce_number(number)) else {
        return Ok("Season and episode numbers must be whole numbers.".to_string());
    };

    match session.add_episode(title.trim(), season, number) {
        Ok(()) => Ok(format!(
            "Added {}",
            episode_line(&EpisodeRecord::new(title.trim(), season, number))
        )),
        Err(StoreError::Catalog(CatalogError::Duplicate(_))) => Ok(format!(
            "Episode {number} of season {season} already exists"
        )),
        Err(e) => rejection_message(&e).ok_or(e),
    }
}

/// Outcome of choosing a show to manage
pub enum SessionStart<'r, R: MediaRepository + ?Sized> {
    Opened(ShowSession<'r, R>),
    /// The name was refused; the message explains why
    Rejected(String),
}

/// Opens a session for the show name the user typed
///
/// Blank names and names clashing with a stored show come back as
/// [`SessionStart::Rejected`] so the caller can ask again.
pub fn open_session<'r, R>(repository: &'r R, name: &str) -> Result<SessionStart<'r, R>, StoreError>
where
    R: MediaRepository + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Ok(SessionStart::Rejected("Please enter a show name.".to_string()));
    }

    match ShowSession::open(repository, name) {
        Ok(session) => Ok(SessionStart::Opened(session)),
        Err(e) => rejection_message(&e).map(SessionStart::Rejected).ok_or(e),
    }
}

/// Wording shown to the user when the store refuses a request
///
/// Returns `None` for storage failures, which are not the user's to fix.
pub fn rejection_message(error: &StoreError) -> Option<String> {
    let message = match error {
        StoreError::Catalog(CatalogError::Validation(reason)) => {
            format!("Please check your input: {reason}.")
        }
        StoreError::Catalog(CatalogError::Duplicate(what)) => {
            format!("Nothing added, {what} already exists.")
        }
        StoreError::Catalog(CatalogError::NotFound(what)) => format!("Could not find {what}."),
        StoreError::Catalog(CatalogError::NotSet(what)) => format!("No {what} has been set."),
        StoreError::ShowNotFound(name) => format!("There is no show named '{name}'."),
        StoreError::NameConflict { name, existing } => format!(
            "'{name}' would share storage with the existing show '{existing}'. \
             Use '{existing}' or pick another name."
        ),
        _ => return None,
    };
    Some(message)
}

/// One line of `parse` output: tab-separated fields, or a note that the
/// name does not follow the `<show>-sNNeNN-<title>` convention.
pub fn parse_report(filename: &str) -> String {
    match parse_media_filename(filename) {
        Some(parsed) => format!(
            "{}\t{}\t{}\t{}\t{}",
            parsed.show_name, parsed.season, parsed.episode, parsed.title, parsed.extension
        ),
        None => format!("{filename}\tnot recognized"),
    }
}

/// Parses a number typed by the user.
pub fn coerce_number(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// Lines for the list of known shows
pub fn show_lines(shows: &[String]) -> Vec<String> {
    if shows.is_empty() {
        return vec!["No show in database".to_string()];
    }

    let mut lines = vec!["Available shows:".to_string()];
    lines.extend(shows.iter().cloned());
    lines
}
