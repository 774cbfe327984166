use crate::error::{CatalogError, Result};
use crate::song::Song;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// In-memory music catalog: albums keyed by name with their release year,
/// plus a set of songs optionally tied to one of those albums.
///
/// The catalog is append-only. Every query derives its answer from the
/// current state without touching it.
#[derive(Debug, Default)]
pub struct Catalog {
    albums: HashMap<String, i32>,
    songs: HashSet<Song>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the album, replacing the year if the name already exists.
    pub fn add_album(&mut self, name: impl Into<String>, year: i32) {
        let name = name.into();
        if let Some(previous) = self.albums.insert(name.clone(), year) {
            debug!("Album '{}' year replaced: {} -> {}", name, previous, year);
        } else {
            debug!("Album added: '{}' ({})", name, year);
        }
    }

    /// Adds a song. Fails without touching the catalog if `album` names an
    /// album that is not known. Exact duplicates are a no-op.
    pub fn add_song(
        &mut self,
        name: impl Into<String>,
        album: Option<&str>,
        duration: f64,
    ) -> Result<()> {
        let name = name.into();

        if let Some(album) = album
            && !self.albums.contains_key(album)
        {
            warn!("Rejecting song '{}': unknown album '{}'", name, album);
            return Err(CatalogError::InvalidReference {
                song: name,
                album: album.to_string(),
            });
        }

        let song = Song::new(name, album.map(str::to_string), duration);
        debug!("Song added: {}", song);
        if !self.songs.insert(song) {
            debug!("Duplicate song ignored");
        }
        Ok(())
    }

    /// Song names in ascending order, duplicates included.
    pub fn ordered_song_names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self.songs.iter().map(Song::name).collect();
        names.sort_unstable();
        names.into_iter()
    }

    pub fn album_names(&self) -> impl Iterator<Item = &str> {
        self.albums.keys().map(String::as_str)
    }

    pub fn album_in_year(&self, year: i32) -> impl Iterator<Item = &str> {
        self.albums
            .iter()
            .filter(move |(_, album_year)| **album_year == year)
            .map(|(name, _)| name.as_str())
    }

    /// Number of songs in `album`. Unknown albums simply count zero.
    pub fn count_songs(&self, album: &str) -> usize {
        self.songs_in(album).count()
    }

    pub fn count_songs_in_no_album(&self) -> usize {
        self.songs.iter().filter(|s| s.album().is_none()).count()
    }

    /// Mean duration of the songs in `album`, `None` when it has no songs.
    pub fn average_duration_of_songs(&self, album: &str) -> Option<f64> {
        let (count, total) = self
            .songs_in(album)
            .fold((0usize, 0.0f64), |(count, total), song| {
                (count + 1, total + song.duration())
            });

        if count == 0 {
            None
        } else {
            Some(total / count as f64)
        }
    }

    /// Name of the song with the greatest duration. Ties pick any of them.
    pub fn longest_song(&self) -> Option<&str> {
        self.songs
            .iter()
            .max_by(|a, b| a.duration().total_cmp(&b.duration()))
            .map(Song::name)
    }

    /// Name of the album whose songs add up to the greatest duration.
    /// Albums without songs never qualify. Ties pick any of them.
    pub fn longest_album(&self) -> Option<&str> {
        self.album_durations()
            .into_iter()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(name, _)| name)
    }

    /// Total duration per album, built only from songs that have one.
    pub fn album_durations(&self) -> HashMap<&str, f64> {
        self.songs
            .iter()
            .filter_map(|song| song.album().map(|album| (album, song.duration())))
            .fold(HashMap::new(), |mut acc, (album, duration)| {
                *acc.entry(album).or_insert(0.0) += duration;
                acc
            })
    }

    pub fn album_year(&self, album: &str) -> Option<i32> {
        self.albums.get(album).copied()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    fn songs_in<'a>(&'a self, album: &'a str) -> impl Iterator<Item = &'a Song> {
        self.songs.iter().filter(move |song| song.is_in_album(album))
    }
}
