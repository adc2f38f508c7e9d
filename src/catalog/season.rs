use super::{CatalogError, Episode, parse_number, validate_number, validate_title};
use std::cmp::Ordering;
use std::fmt;

/// A numbered season holding its episodes.
///
/// Episodes are unique by number and always kept in ascending number order.
#[derive(Debug, Clone)]
pub struct Season {
    number: u32,
    episodes: Vec<Episode>,
}

impl Season {
    /// Creates an empty season.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `number` is zero.
    pub fn new(number: u32) -> Result<Self, CatalogError> {
        validate_number("season", number)?;
        Ok(Self {
            number,
            episodes: Vec::new(),
        })
    }

    /// Creates an empty season from text such as `"02"`.
    pub fn parse(number: &str) -> Result<Self, CatalogError> {
        Self::new(parse_number("season", number)?)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Adds an episode, taking ownership of it.
    ///
    /// The episode is filed under this season's number and the episode list
    /// is re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if an episode with the same number
    /// is already part of this season.
    pub fn add(&mut self, mut episode: Episode) -> Result<(), CatalogError> {
        if self.contains(&episode) {
            return Err(CatalogError::Duplicate(format!(
                "episode {} of season {}",
                episode.number(),
                self.number
            )));
        }

        episode.assign_season(self.number);
        self.episodes.push(episode);
        self.sort();
        Ok(())
    }

    /// Looks up an episode by its number.
    pub fn episode(&self, number: u32) -> Result<&Episode, CatalogError> {
        self.position(number)
            .map(|index| &self.episodes[index])
            .ok_or_else(|| self.missing(number))
    }

    /// Mutable access to an episode. Only the duration can be changed through
    /// it; number and title edits go through the season.
    pub fn episode_mut(&mut self, number: u32) -> Result<&mut Episode, CatalogError> {
        match self.position(number) {
            Some(index) => Ok(&mut self.episodes[index]),
            None => Err(self.missing(number)),
        }
    }

    /// Returns a copy of the episode list, in ascending number order.
    pub fn episodes(&self) -> Vec<Episode> {
        self.episodes.clone()
    }

    /// Whether an episode with the same number is part of this season.
    pub fn contains(&self, episode: &Episode) -> bool {
        self.contains_number(episode.number())
    }

    pub fn contains_number(&self, number: u32) -> bool {
        self.position(number).is_some()
    }

    /// Iterates over the episodes in ascending number order.
    pub fn iter(&self) -> std::slice::Iter<'_, Episode> {
        self.episodes.iter()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Changes the title of an existing episode.
    pub fn retitle_episode(
        &mut self,
        number: u32,
        title: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let title = title.into();
        validate_title(&title)?;
        self.episode_mut(number)?.assign_title(title);
        Ok(())
    }

    /// Moves an episode to a new number, keeping the list unique and sorted.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::Validation`] if `to` is zero
    /// * [`CatalogError::NotFound`] if no episode is numbered `from`
    /// * [`CatalogError::Duplicate`] if another episode already uses `to`
    pub fn renumber_episode(&mut self, from: u32, to: u32) -> Result<(), CatalogError> {
        validate_number("episode", to)?;
        let index = self.position(from).ok_or_else(|| self.missing(from))?;

        if from == to {
            return Ok(());
        }
        if self.contains_number(to) {
            return Err(CatalogError::Duplicate(format!(
                "episode {} of season {}",
                to, self.number
            )));
        }

        self.episodes[index].assign_number(to);
        self.sort();
        Ok(())
    }

    /// Removes an episode and hands it back to the caller.
    pub fn remove_episode(&mut self, number: u32) -> Result<Episode, CatalogError> {
        let index = self.position(number).ok_or_else(|| self.missing(number))?;
        Ok(self.episodes.remove(index))
    }

    fn position(&self, number: u32) -> Option<usize> {
        self.episodes.iter().position(|e| e.number() == number)
    }

    fn missing(&self, number: u32) -> CatalogError {
        CatalogError::NotFound(format!("episode {} of season {}", number, self.number))
    }

    fn sort(&mut self) {
        self.episodes.sort_by_key(Episode::number);
    }
}

impl<'a> IntoIterator for &'a Season {
    type Item = &'a Episode;
    type IntoIter = std::slice::Iter<'a, Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Seasons are identified by their number alone.
impl PartialEq for Season {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Season {}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Season {} <{}>", self.number, self.episodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, number: u32) -> Episode {
        Episode::new(title, number).unwrap()
    }

    fn numbers(season: &Season) -> Vec<u32> {
        season.iter().map(Episode::number).collect()
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(Season::new(0), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Season::parse("02").unwrap().number(), 2);
        assert!(matches!(
            Season::parse("second"),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_number_is_rejected() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        let result = season.add(episode("Another pilot", 1));
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));
        assert_eq!(season.len(), 1);
        assert_eq!(season.episode(1).unwrap().title(), "Pilot");
    }

    #[test]
    fn test_episodes_are_sorted() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Three", 3)).unwrap();
        season.add(episode("One", 1)).unwrap();
        season.add(episode("Two", 2)).unwrap();

        let snapshot: Vec<u32> = season.episodes().iter().map(Episode::number).collect();
        assert_eq!(snapshot, vec![1, 2, 3]);
    }

    #[test]
    fn test_add_files_episode_under_season() {
        let mut season = Season::new(4).unwrap();
        season.add(episode("Pilot", 1)).unwrap();
        assert_eq!(season.episode(1).unwrap().season(), Some(4));
    }

    #[test]
    fn test_missing_episode() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();
        assert!(matches!(season.episode(99), Err(CatalogError::NotFound(_))));
        assert!(matches!(
            season.episode_mut(99),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        let mut snapshot = season.episodes();
        snapshot.clear();
        snapshot.push(episode("Intruder", 7));

        assert_eq!(numbers(&season), vec![1]);
        assert_eq!(season.episodes().len(), 1);
    }

    #[test]
    fn test_contains() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        assert!(season.contains(&episode("Different title", 1)));
        assert!(season.contains_number(1));
        assert!(!season.contains_number(2));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Two", 2)).unwrap();
        season.add(episode("One", 1)).unwrap();

        assert_eq!(numbers(&season), vec![1, 2]);
        assert_eq!(numbers(&season), vec![1, 2]);

        let mut titles = Vec::new();
        for episode in &season {
            titles.push(episode.title().to_string());
        }
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_duration_through_episode_mut() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        season.episode_mut(1).unwrap().set_duration(1500).unwrap();
        assert_eq!(season.episode(1).unwrap().duration(), Ok(1500));
    }

    #[test]
    fn test_retitle_episode() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        season.retitle_episode(1, "Renamed").unwrap();
        assert_eq!(season.episode(1).unwrap().title(), "Renamed");
        assert!(season.retitle_episode(1, "  ").is_err());
        assert!(matches!(
            season.retitle_episode(2, "Nope"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_renumber_episode_keeps_order() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("One", 1)).unwrap();
        season.add(episode("Two", 2)).unwrap();
        season.add(episode("Three", 3)).unwrap();

        season.renumber_episode(1, 5).unwrap();
        assert_eq!(numbers(&season), vec![2, 3, 5]);
        assert_eq!(season.episode(5).unwrap().title(), "One");

        assert!(matches!(
            season.renumber_episode(2, 3),
            Err(CatalogError::Duplicate(_))
        ));
        assert!(matches!(
            season.renumber_episode(2, 0),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            season.renumber_episode(9, 10),
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(numbers(&season), vec![2, 3, 5]);
    }

    #[test]
    fn test_remove_episode() {
        let mut season = Season::new(1).unwrap();
        season.add(episode("Pilot", 1)).unwrap();

        let removed = season.remove_episode(1).unwrap();
        assert_eq!(removed.title(), "Pilot");
        assert!(season.is_empty());
        assert!(season.remove_episode(1).is_err());
    }

    #[test]
    fn test_ordering_and_display() {
        let mut first = Season::new(1).unwrap();
        let second = Season::new(2).unwrap();
        assert!(first < second);

        first.add(episode("Pilot", 1)).unwrap();
        assert_eq!(first.to_string(), "Season 1 <1>");
    }
}
