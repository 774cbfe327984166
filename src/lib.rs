mod catalog;
mod error;
mod import;
mod report;
mod song;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use import::{ImportStats, ReferencePolicy, load_albums, load_songs};
pub use report::{AlbumSummary, CatalogReport};
pub use song::Song;
