use super::{CatalogError, Episode};

/// A show that keeps its episodes in one flat list.
///
/// Seasons are not entities here, only a field on each episode used for
/// filtering. Episodes stay in insertion order; unlike [`TvShow`](super::TvShow)
/// nothing is sorted.
#[derive(Debug, Clone)]
pub struct FlatTvShow {
    name: String,
    episodes: Vec<Episode>,
}

impl FlatTvShow {
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "show name must not be empty or whitespace".to_string(),
            ));
        }

        Ok(Self {
            name,
            episodes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds an episode from its basic fields and appends it.
    ///
    /// A season of `Some(0)` files the episode under no season, the same as
    /// [`Episode::from_fields`] does for a `"0"` season.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::Validation`] for a blank title or a zero number
    /// * [`CatalogError::Duplicate`] if an episode with the same number and
    ///   season is already stored
    pub fn add_episode(
        &mut self,
        title: &str,
        number: u32,
        season: Option<u32>,
    ) -> Result<(), CatalogError> {
        let episode = Episode::new(title, number)?;
        let episode = match season.filter(|&season| season != 0) {
            Some(season) => episode.with_season(season)?,
            None => episode,
        };
        self.add(episode)
    }

    /// Appends an already built episode.
    pub fn add(&mut self, episode: Episode) -> Result<(), CatalogError> {
        if self.episodes.contains(&episode) {
            let season = episode
                .season()
                .map_or_else(|| "no season".to_string(), |s| format!("season {s}"));
            return Err(CatalogError::Duplicate(format!(
                "episode {} ({})",
                episode.number(),
                season
            )));
        }

        self.episodes.push(episode);
        Ok(())
    }

    /// Returns a copy of the episodes in insertion order, optionally only
    /// those filed under `season`.
    pub fn get_episodes(&self, season: Option<u32>) -> Vec<Episode> {
        match season {
            Some(season) => self
                .episodes
                .iter()
                .filter(|e| e.season() == Some(season))
                .cloned()
                .collect(),
            None => self.episodes.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}
