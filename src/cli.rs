// Clap definitions in derive style

use std::path::PathBuf;

#[derive(clap::Parser)]
#[command(name = "muscat", version, about)]
pub struct Cli {
    /// Set the level of verbosity
    /// -v for info, -vv for debug, -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Albums CSV file (columns: "Album Name", "Year")
    #[arg(short = 'a', long = "albums", global = true)]
    pub albums: Option<PathBuf>,

    /// Songs CSV file (columns: "Track Name", "Album Name", "Duration")
    #[arg(short = 's', long = "songs", global = true)]
    pub songs: Option<PathBuf>,

    /// Abort the import when a song names an unknown album
    #[arg(long = "strict", default_value_t = false, global = true)]
    pub strict: bool,

    /// Print results as JSON
    #[arg(long = "json", default_value_t = false, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// List song names in ascending order
    Songs,

    /// List album names
    Albums,

    /// List albums released in the given year
    Year {
        #[arg(value_name = "YEAR", allow_negative_numbers = true)]
        year: i32,
    },

    /// Count the songs of an album, or the songs in no album if omitted
    Count {
        #[arg(value_name = "ALBUM")]
        album: Option<String>,
    },

    /// Average song duration of an album
    Average {
        #[arg(value_name = "ALBUM")]
        album: String,
    },

    /// Name of the longest song
    LongestSong,

    /// Name of the album with the greatest total duration
    LongestAlbum,

    /// Summary of every aggregate
    Report,
}
