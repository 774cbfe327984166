#![allow(clippy::uninlined_format_args)]

mod cli;

use clap::Parser;
use log::LevelFilter;
use muscat::{Catalog, CatalogReport, ReferencePolicy};
use serde::Serialize;

use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let policy = if cli.strict {
        ReferencePolicy::Abort
    } else {
        ReferencePolicy::Skip
    };

    let catalog =
        match Catalog::from_csv_paths(cli.albums.as_deref(), cli.songs.as_deref(), policy) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

    match cli.command {
        Commands::Songs => print_list(catalog.ordered_song_names(), cli.json),
        Commands::Albums => print_list(catalog.album_names(), cli.json),
        Commands::Year { year } => print_list(catalog.album_in_year(year), cli.json),
        Commands::Count { album } => {
            let count = match album {
                Some(ref album) => catalog.count_songs(album),
                None => catalog.count_songs_in_no_album(),
            };
            print_value(&count, cli.json);
        }
        Commands::Average { album } => {
            print_optional(catalog.average_duration_of_songs(&album), cli.json)
        }
        Commands::LongestSong => print_optional(catalog.longest_song(), cli.json),
        Commands::LongestAlbum => print_optional(catalog.longest_album(), cli.json),
        Commands::Report => {
            let report = CatalogReport::from(&catalog);
            if cli.json {
                print_json(&report);
            } else {
                print_report(&report);
            }
        }
    }
}

fn print_list<'a>(items: impl Iterator<Item = &'a str>, json: bool) {
    if json {
        print_json(&items.collect::<Vec<&str>>());
    } else {
        for item in items {
            println!("{}", item);
        }
    }
}

fn print_value<T: Serialize + std::fmt::Display>(value: &T, json: bool) {
    if json {
        print_json(value);
    } else {
        println!("{}", value);
    }
}

fn print_optional<T: Serialize + std::fmt::Display>(value: Option<T>, json: bool) {
    match value {
        Some(ref v) => print_value(v, json),
        None if json => println!("null"),
        None => println!("none"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_report(report: &CatalogReport) {
    println!("Albums: {}", report.album_count);
    println!("Songs: {}", report.song_count);
    println!("Songs in no album: {}", report.songs_in_no_album);
    println!(
        "Longest song: {}",
        report.longest_song.as_deref().unwrap_or("none")
    );
    println!(
        "Longest album: {}",
        report.longest_album.as_deref().unwrap_or("none")
    );

    for album in &report.albums {
        let average = album
            .average_duration
            .map_or_else(|| "none".to_string(), |avg| format!("{:.1}s", avg));
        println!(
            "  {} ({}): {} songs, {:.1}s total, {} average",
            album.name, album.year, album.songs, album.total_duration, average
        );
    }

    println!("Song list:");
    for song in &report.songs {
        println!("  {}", song);
    }
}
