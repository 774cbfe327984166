use serde::Serialize;

use crate::catalog::Catalog;
use crate::song::Song;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumSummary {
    pub name: String,
    pub year: i32,
    pub songs: usize,
    pub average_duration: Option<f64>,
    pub total_duration: f64,
}

/// Snapshot of every aggregate the catalog can answer, ready to be printed
/// or dumped as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub album_count: usize,
    pub song_count: usize,
    pub songs_in_no_album: usize,
    pub longest_song: Option<String>,
    pub longest_album: Option<String>,
    pub albums: Vec<AlbumSummary>,
    pub songs: Vec<Song>,
}

impl From<&Catalog> for CatalogReport {
    fn from(catalog: &Catalog) -> Self {
        let totals = catalog.album_durations();

        let mut albums: Vec<AlbumSummary> = catalog
            .album_names()
            .map(|name| AlbumSummary {
                name: name.to_string(),
                year: catalog.album_year(name).unwrap_or_default(),
                songs: catalog.count_songs(name),
                average_duration: catalog.average_duration_of_songs(name),
                total_duration: totals.get(name).copied().unwrap_or(0.0),
            })
            .collect();
        albums.sort_by(|a, b| a.name.cmp(&b.name));

        let mut songs: Vec<Song> = catalog.songs().cloned().collect();
        songs.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.album().cmp(&b.album()))
                .then_with(|| a.duration().total_cmp(&b.duration()))
        });

        CatalogReport {
            album_count: catalog.album_count(),
            song_count: catalog.song_count(),
            songs_in_no_album: catalog.count_songs_in_no_album(),
            longest_song: catalog.longest_song().map(str::to_string),
            longest_album: catalog.longest_album().map(str::to_string),
            albums,
            songs,
        }
    }
}
