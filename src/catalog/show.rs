use super::{CatalogError, Episode, Season, parse_number, validate_number};
use std::fmt;

/// A TV show and its seasons.
///
/// Seasons are unique by number and always kept in ascending order. Callers
/// never get mutable access to the season list itself: episodes are added
/// through [`TvShow::add_episode`], which creates seasons on demand.
#[derive(Debug, Clone)]
pub struct TvShow {
    name: String,
    seasons: Vec<Season>,
}

impl TvShow {
    /// Creates a show with no seasons.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "show name must not be empty or whitespace".to_string(),
            ));
        }

        Ok(Self {
            name,
            seasons: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an episode to the given season, creating the season if needed.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::Validation`] if `season_number` is zero
    /// * [`CatalogError::Duplicate`] if the season already has an episode
    ///   with that number
    ///
    /// # Examples
    ///
    /// ```
    /// use media_manager::{Episode, TvShow};
    ///
    /// let mut show = TvShow::new("Show").unwrap();
    /// show.add_episode(Episode::new("Pilot", 1).unwrap(), 1).unwrap();
    ///
    /// assert_eq!(show.episode(1, 1).unwrap().title(), "Pilot");
    /// ```
    pub fn add_episode(&mut self, episode: Episode, season_number: u32) -> Result<(), CatalogError> {
        validate_number("season", season_number)?;

        if let Some(season) = self.seasons.iter_mut().find(|s| s.number() == season_number) {
            return season.add(episode);
        }

        let mut season = Season::new(season_number)?;
        season.add(episode)?;
        self.insert_season(season)
    }

    /// Same as [`add_episode`](Self::add_episode), from raw text fields.
    pub fn add_episode_fields(
        &mut self,
        title: &str,
        number: &str,
        season_number: &str,
    ) -> Result<(), CatalogError> {
        let season_number = parse_number("season", season_number)?;
        self.add_episode(Episode::from_fields(title, number, None, None)?, season_number)
    }

    fn insert_season(&mut self, season: Season) -> Result<(), CatalogError> {
        if self.contains(&season) {
            return Err(CatalogError::Duplicate(format!(
                "season {} of {}",
                season.number(),
                self.name
            )));
        }

        self.seasons.push(season);
        self.seasons.sort();
        Ok(())
    }

    /// Returns a copy of the seasons, in ascending number order.
    pub fn seasons(&self) -> Vec<Season> {
        self.seasons.clone()
    }

    pub fn season(&self, number: u32) -> Result<&Season, CatalogError> {
        self.seasons
            .iter()
            .find(|s| s.number() == number)
            .ok_or_else(|| self.missing_season(number))
    }

    fn season_mut(&mut self, number: u32) -> Result<&mut Season, CatalogError> {
        let missing = self.missing_season(number);
        self.seasons
            .iter_mut()
            .find(|s| s.number() == number)
            .ok_or(missing)
    }

    pub fn contains(&self, season: &Season) -> bool {
        self.contains_season(season.number())
    }

    pub fn contains_season(&self, number: u32) -> bool {
        self.seasons.iter().any(|s| s.number() == number)
    }

    /// Number of seasons.
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(Season::len).sum()
    }

    pub fn episode(&self, season: u32, number: u32) -> Result<&Episode, CatalogError> {
        self.season(season)?.episode(number)
    }

    pub fn episode_mut(&mut self, season: u32, number: u32) -> Result<&mut Episode, CatalogError> {
        self.season_mut(season)?.episode_mut(number)
    }

    pub fn retitle_episode(
        &mut self,
        season: u32,
        number: u32,
        title: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.season_mut(season)?.retitle_episode(number, title)
    }

    pub fn renumber_episode(&mut self, season: u32, from: u32, to: u32) -> Result<(), CatalogError> {
        self.season_mut(season)?.renumber_episode(from, to)
    }

    /// Removes a whole season, returning it with its episodes.
    pub fn remove_season(&mut self, number: u32) -> Result<Season, CatalogError> {
        let index = self
            .seasons
            .iter()
            .position(|s| s.number() == number)
            .ok_or_else(|| self.missing_season(number))?;
        Ok(self.seasons.remove(index))
    }

    fn missing_season(&self, number: u32) -> CatalogError {
        CatalogError::NotFound(format!("season {} of {}", number, self.name))
    }
}

impl fmt::Display for TvShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{} seasons, {} episodes>",
            self.name,
            self.seasons.len(),
            self.episode_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, number: u32) -> Episode {
        Episode::new(title, number).unwrap()
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(TvShow::new(""), Err(CatalogError::Validation(_))));
        assert!(matches!(TvShow::new("   "), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_add_then_query() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();

        let found = show.season(1).unwrap().episode(1).unwrap();
        assert_eq!(found.title(), "Pilot");
        assert_eq!(found.season(), Some(1));
    }

    #[test]
    fn test_seasons_are_sorted() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Second season opener", 1), 2).unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();

        let numbers: Vec<u32> = show.seasons().iter().map(Season::number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_existing_season_is_reused() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();
        show.add_episode(episode("Second", 2), 1).unwrap();

        assert_eq!(show.len(), 1);
        assert_eq!(show.season(1).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_propagates() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();

        let result = show.add_episode(episode("Pilot again", 1), 1);
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));
        assert_eq!(show.episode_count(), 1);
    }

    #[test]
    fn test_add_episode_fields() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode_fields("Pilot", "01", "02").unwrap();

        assert_eq!(show.episode(2, 1).unwrap().title(), "Pilot");
        assert!(matches!(
            show.add_episode_fields("Pilot", "1", "two"),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            show.add_episode_fields("Pilot", "1", "2"),
            Err(CatalogError::Duplicate(_))
        ));
    }

    #[test]
    fn test_zero_season_is_rejected() {
        let mut show = TvShow::new("Show").unwrap();
        assert!(matches!(
            show.add_episode(episode("Pilot", 1), 0),
            Err(CatalogError::Validation(_))
        ));
        assert!(show.is_empty());
    }

    #[test]
    fn test_insert_season_rejects_existing_number() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();

        let result = show.insert_season(Season::new(1).unwrap());
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));
        assert_eq!(show.len(), 1);
    }

    #[test]
    fn test_seasons_snapshot_is_independent() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();

        let mut snapshot = show.seasons();
        snapshot.clear();

        assert_eq!(show.seasons().len(), 1);
    }

    #[test]
    fn test_containment() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 3).unwrap();

        assert!(show.contains_season(3));
        assert!(show.contains(&Season::new(3).unwrap()));
        assert!(!show.contains_season(1));
        assert!(matches!(show.season(1), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_edits_through_show() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();
        show.add_episode(episode("Second", 2), 1).unwrap();

        show.episode_mut(1, 2).unwrap().set_duration(1320).unwrap();
        show.retitle_episode(1, 1, "The Pilot").unwrap();
        show.renumber_episode(1, 1, 3).unwrap();

        let numbers: Vec<u32> = show.season(1).unwrap().iter().map(Episode::number).collect();
        assert_eq!(numbers, vec![2, 3]);
        assert_eq!(show.episode(1, 3).unwrap().title(), "The Pilot");
        assert_eq!(show.episode(1, 2).unwrap().duration(), Ok(1320));
        assert!(matches!(
            show.episode_mut(2, 1),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_season() {
        let mut show = TvShow::new("Show").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();
        show.add_episode(episode("Opener", 1), 2).unwrap();

        let removed = show.remove_season(1).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(show.len(), 1);
        assert!(!show.contains_season(1));
        assert!(show.remove_season(1).is_err());
    }

    #[test]
    fn test_display() {
        let mut show = TvShow::new("Silicon Valley").unwrap();
        show.add_episode(episode("Pilot", 1), 1).unwrap();
        show.add_episode(episode("Second", 2), 1).unwrap();
        show.add_episode(episode("Opener", 1), 2).unwrap();

        assert_eq!(show.to_string(), "Silicon Valley <2 seasons, 3 episodes>");
    }
}
