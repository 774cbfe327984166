use csv::ReaderBuilder;
use log::{info, warn};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// What to do with a song row that names an album the catalog doesn't know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Log the row and keep going.
    #[default]
    Skip,
    /// Stop the import and hand the error back.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportStats {
    pub added: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
pub struct AlbumRecord {
    #[serde(rename = "Album Name")]
    pub album_name: String,

    #[serde(rename = "Year")]
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "Track Name")]
    pub track_name: String,

    /// Empty means the song belongs to no album.
    #[serde(rename = "Album Name", default)]
    pub album_name: String,

    #[serde(rename = "Duration")]
    pub duration: f64,
}

impl SongRecord {
    fn album(&self) -> Option<&str> {
        let album = self.album_name.trim();
        (!album.is_empty()).then_some(album)
    }
}

/// Errors confined to a single record. Anything else (I/O, seeking) means
/// the reader cannot go on.
fn is_row_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::Deserialize { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Utf8 { .. }
    )
}

/// Reads album rows into `catalog`. Malformed rows are skipped.
pub fn load_albums<R: Read>(reader: R, catalog: &mut Catalog) -> Result<ImportStats> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut stats = ImportStats::default();

    for result in reader.deserialize::<AlbumRecord>() {
        match result {
            Ok(record) => {
                catalog.add_album(record.album_name, record.year);
                stats.added += 1;
            }
            Err(e) if is_row_error(&e) => {
                warn!("Skipping invalid album row: {}", e);
                stats.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(stats)
}

/// Reads song rows into `catalog`. Albums must be loaded first, since a
/// song naming an unknown album is handled according to `policy`.
pub fn load_songs<R: Read>(
    reader: R,
    catalog: &mut Catalog,
    policy: ReferencePolicy,
) -> Result<ImportStats> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut stats = ImportStats::default();

    for result in reader.deserialize::<SongRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) if is_row_error(&e) => {
                warn!("Skipping invalid song row: {}", e);
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match catalog.add_song(record.track_name.as_str(), record.album(), record.duration) {
            Ok(()) => stats.added += 1,
            Err(e @ CatalogError::InvalidReference { .. }) => match policy {
                ReferencePolicy::Skip => {
                    warn!("Skipping song row: {}", e);
                    stats.skipped += 1;
                }
                ReferencePolicy::Abort => return Err(e),
            },
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}

impl Catalog {
    /// Builds a catalog from an albums CSV and an optional songs CSV.
    pub fn from_csv_paths(
        albums: Option<&Path>,
        songs: Option<&Path>,
        policy: ReferencePolicy,
    ) -> Result<Self> {
        let mut catalog = Catalog::new();

        if let Some(path) = albums {
            let stats = load_albums(std::fs::File::open(path)?, &mut catalog)?;
            info!(
                "Loaded {} albums from {:?} ({} skipped)",
                stats.added, path, stats.skipped
            );
        }

        if let Some(path) = songs {
            let stats = load_songs(std::fs::File::open(path)?, &mut catalog, policy)?;
            info!(
                "Loaded {} songs from {:?} ({} skipped)",
                stats.added, path, stats.skipped
            );
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUMS: &str = "Album Name,Year\nA,2000\nB,2001\n";

    #[test]
    fn test_load_albums() {
        let mut catalog = Catalog::new();

        let stats = load_albums(ALBUMS.as_bytes(), &mut catalog).unwrap();

        assert_eq!(stats, ImportStats { added: 2, skipped: 0 });
        assert_eq!(catalog.album_year("A"), Some(2000));
        assert_eq!(catalog.album_year("B"), Some(2001));
    }

    #[test]
    fn test_load_albums_skips_bad_year() {
        let mut catalog = Catalog::new();
        let csv = "Album Name,Year\nA,2000\nB,soon\n";

        let stats = load_albums(csv.as_bytes(), &mut catalog).unwrap();

        assert_eq!(stats, ImportStats { added: 1, skipped: 1 });
        assert_eq!(catalog.album_count(), 1);
    }

    #[test]
    fn test_load_songs_empty_album_means_none() {
        let mut catalog = Catalog::new();
        load_albums(ALBUMS.as_bytes(), &mut catalog).unwrap();
        let csv = "Track Name,Album Name,Duration\ns1,A,180\ns4,,50\n";

        let stats = load_songs(csv.as_bytes(), &mut catalog, ReferencePolicy::Skip).unwrap();

        assert_eq!(stats.added, 2);
        assert_eq!(catalog.count_songs("A"), 1);
        assert_eq!(catalog.count_songs_in_no_album(), 1);
    }

    #[test]
    fn test_load_songs_skip_policy() {
        let mut catalog = Catalog::new();
        load_albums(ALBUMS.as_bytes(), &mut catalog).unwrap();
        let csv = "Track Name,Album Name,Duration\ns1,A,180\nx,Nope,10\ns3,B,100\n";

        let stats = load_songs(csv.as_bytes(), &mut catalog, ReferencePolicy::Skip).unwrap();

        assert_eq!(stats, ImportStats { added: 2, skipped: 1 });
        assert_eq!(catalog.song_count(), 2);
    }

    #[test]
    fn test_load_songs_abort_policy() {
        let mut catalog = Catalog::new();
        load_albums(ALBUMS.as_bytes(), &mut catalog).unwrap();
        let csv = "Track Name,Album Name,Duration\ns1,A,180\nx,Nope,10\ns3,B,100\n";

        let result = load_songs(csv.as_bytes(), &mut catalog, ReferencePolicy::Abort);

        assert!(matches!(
            result,
            Err(CatalogError::InvalidReference { ref album, .. }) if album == "Nope"
        ));
        assert_eq!(catalog.song_count(), 1);
    }

    #[test]
    fn test_load_songs_skips_bad_duration() {
        let mut catalog = Catalog::new();
        let csv = "Track Name,Album Name,Duration\ns1,,long\ns2,,12.5\n";

        let stats = load_songs(csv.as_bytes(), &mut catalog, ReferencePolicy::Abort).unwrap();

        assert_eq!(stats, ImportStats { added: 1, skipped: 1 });
        assert_eq!(catalog.longest_song(), Some("s2"));
    }

    /// Hands out `data` up to `fail_after` bytes, then fails.
    struct FailingReader {
        data: &'static [u8],
        pos: usize,
        fail_after: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.fail_after {
                return Err(std::io::Error::other("disk gone"));
            }
            let end = self.data.len().min(self.fail_after).min(self.pos + buf.len());
            let n = end - self.pos;
            buf[..n].copy_from_slice(&self.data[self.pos..end]);
            self.pos = end;
            Ok(n)
        }
    }

    #[test]
    fn test_load_songs_read_failure_is_error() {
        let mut catalog = Catalog::new();
        let reader = FailingReader {
            data: b"Track Name,Album Name,Duration\ns1,,1\ns2,,2\ns3,,3\ns4,,4\ns5,,5\n",
            pos: 0,
            fail_after: 40,
        };

        let result = load_songs(reader, &mut catalog, ReferencePolicy::Skip);

        match result {
            Err(CatalogError::Csv(e)) => assert!(matches!(e.kind(), csv::ErrorKind::Io(_))),
            other => panic!("Expected CSV I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_albums_read_failure_is_error() {
        let mut catalog = Catalog::new();
        let reader = FailingReader {
            data: b"Album Name,Year\nA,2000\nB,2001\nC,2002\n",
            pos: 0,
            fail_after: 20,
        };

        let result = load_albums(reader, &mut catalog);

        assert!(matches!(result, Err(CatalogError::Csv(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Catalog::from_csv_paths(
            Some(Path::new("./does/not/exist.csv")),
            None,
            ReferencePolicy::Skip,
        );

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
