use super::{CatalogError, Media, validate_title};

/// A standalone film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    title: String,
    duration: Option<u32>,
    director: Option<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Result<Self, CatalogError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            title,
            duration: None,
            director: None,
        })
    }

    /// Sets the running time in seconds. Zero leaves it unknown.
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = (seconds != 0).then_some(seconds);
        self
    }

    /// Sets the director. An empty string means "unknown"; a string made only
    /// of whitespace is rejected.
    pub fn with_director(mut self, director: impl Into<String>) -> Result<Self, CatalogError> {
        let director = director.into();
        if director.is_empty() {
            self.director = None;
            return Ok(self);
        }
        if director.trim().is_empty() {
            return Err(CatalogError::Validation(
                "director must not be whitespace".to_string(),
            ));
        }

        self.director = Some(director);
        Ok(self)
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }
}

impl Media for Movie {
    fn title(&self) -> &str {
        &self.title
    }

    fn duration_seconds(&self) -> Option<u32> {
        self.duration
    }
}
