use super::{CatalogError, Media, parse_number, parse_optional, validate_number, validate_title};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single episode of a TV show.
///
/// The number and title cannot be changed through an `Episode` directly. Once
/// the episode belongs to a [`Season`](super::Season), the season is the only
/// place that may retitle or renumber it, because it has to keep its episode
/// list unique and sorted.
///
/// Two episodes compare equal when they share `(number, season)`, regardless
/// of their titles.
#[derive(Debug, Clone)]
pub struct Episode {
    title: String,
    number: u32,
    season: Option<u32>,
    duration: Option<u32>,
}

impl Episode {
    /// Creates an episode with no season and no duration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the title is blank or the
    /// number is zero.
    pub fn new(title: impl Into<String>, number: u32) -> Result<Self, CatalogError> {
        let title = title.into();
        validate_title(&title)?;
        validate_number("episode", number)?;

        Ok(Self {
            title,
            number,
            season: None,
            duration: None,
        })
    }

    /// Builds an episode from raw text fields, the shape used by storage
    /// rows and interactive input.
    ///
    /// `number` must parse as a positive integer. `season` and `duration` are
    /// stored as absent when missing, blank or zero; any other non-integer
    /// text is a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use media_manager::Episode;
    ///
    /// let episode = Episode::from_fields("Pilot", "1", Some("01"), None).unwrap();
    /// assert_eq!(episode.number(), 1);
    /// assert_eq!(episode.season(), Some(1));
    /// assert!(episode.duration().is_err());
    /// ```
    pub fn from_fields(
        title: &str,
        number: &str,
        season: Option<&str>,
        duration: Option<&str>,
    ) -> Result<Self, CatalogError> {
        validate_title(title)?;
        let number = parse_number("episode", number)?;
        let season = parse_optional("season", season)?;
        let duration = parse_optional("duration", duration)?;

        Ok(Self {
            title: title.to_string(),
            number,
            season,
            duration,
        })
    }

    /// Returns the episode with its season set.
    pub fn with_season(mut self, season: u32) -> Result<Self, CatalogError> {
        validate_number("season", season)?;
        self.season = Some(season);
        Ok(self)
    }

    /// Returns the episode with its duration set, in seconds.
    pub fn with_duration(mut self, seconds: u32) -> Result<Self, CatalogError> {
        self.set_duration(seconds)?;
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// The season this episode was filed under, if any.
    pub fn season(&self) -> Option<u32> {
        self.season
    }

    /// Duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotSet`] if no duration was ever set, or if it
    /// was cleared since.
    pub fn duration(&self) -> Result<u32, CatalogError> {
        self.duration
            .ok_or_else(|| CatalogError::NotSet(format!("duration of episode {}", self.number)))
    }

    /// Stores a duration in seconds. Zero is rejected; use
    /// [`clear_duration`](Self::clear_duration) to unset it.
    pub fn set_duration(&mut self, seconds: u32) -> Result<(), CatalogError> {
        if seconds == 0 {
            return Err(CatalogError::Validation(
                "duration must be a positive number of seconds".to_string(),
            ));
        }
        self.duration = Some(seconds);
        Ok(())
    }

    pub fn clear_duration(&mut self) {
        self.duration = None;
    }

    pub(super) fn assign_season(&mut self, season: u32) {
        self.season = Some(season);
    }

    pub(super) fn assign_title(&mut self, title: String) {
        self.title = title;
    }

    pub(super) fn assign_number(&mut self, number: u32) {
        self.number = number;
    }
}

impl Media for Episode {
    fn title(&self) -> &str {
        &self.title
    }

    fn duration_seconds(&self) -> Option<u32> {
        self.duration
    }
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.season == other.season
    }
}

impl Eq for Episode {}

impl Hash for Episode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
        self.season.hash(state);
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ep.{} - {}", self.number, self.title)
    }
}
