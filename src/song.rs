use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single song of the catalog. Immutable once built.
///
/// Two songs are the same entry iff name, album and duration all match.
/// Durations are compared by their bit pattern, so there is no tolerance.
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    name: String,
    album: Option<String>,
    duration: f64,
}

impl Song {
    pub fn new(name: impl Into<String>, album: Option<String>, duration: f64) -> Self {
        Song {
            name: name.into(),
            album,
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_in_album(&self, album: &str) -> bool {
        self.album.as_deref() == Some(album)
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.album == other.album
            && self.duration.to_bits() == other.duration.to_bits()
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.album.hash(state);
        self.duration.to_bits().hash(state);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}s)",
            self.name,
            self.album.as_deref().unwrap_or("no album"),
            self.duration
        )
    }
}
