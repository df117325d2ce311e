use std::io::Write;

use clap::Parser;
use mediashelf::catalog::MediaKind;
use mediashelf::cli::{Cli, Commands, music_name};
use mediashelf::commands::{self, Exported};
use mediashelf::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    let file = cli.file.as_deref();

    match cli.command {
        Some(Commands::List { kind, filters }) => {
            let listing = commands::list(file, kind, &filters)?;

            if listing.entries.is_empty() {
                println!("No {kind} entries match the filters");
            }
            for (row, entry) in listing.entries.iter().enumerate() {
                println!("{:>4}. {entry}", row + 1);
            }
            println!("{}", listing.tally);
            Ok(())
        }
        Some(Commands::Facets { kind }) => {
            let facets = commands::facets(file)?;

            match kind {
                MediaKind::Music => {
                    println!("Formats: {}", facets.music_formats.join(", "));
                    println!("Years: {}", facets.music_years.join(", "));
                }
                MediaKind::Movies => {
                    println!("Formats: {}", facets.movie_formats.join(", "));
                }
            }
            Ok(())
        }
        Some(Commands::Stats { kind, filters }) => {
            let report = commands::stats(file, kind, &filters)?;

            println!("{}", report.tally);
            println!("By format:");
            for (format, count) in &report.formats {
                let label = if format.is_empty() { "(none)" } else { format };
                println!("  {label}: {count}");
            }
            if let Some(years) = &report.years {
                println!("By year:");
                for bucket in years {
                    println!("  {}: {}", bucket.label, bucket.count);
                }
            }
            Ok(())
        }
        Some(Commands::AddMusic {
            performer,
            album,
            track,
            year,
            format,
        }) => {
            let (entry_type, name) = music_name(album, track)?;
            let added = commands::add_music(
                file,
                &performer,
                entry_type,
                &name,
                year,
                format.as_deref(),
            )?;

            println!("Added {entry_type}: {}", added.entry);
            println!("Music entries: {}", added.len);
            Ok(())
        }
        Some(Commands::AddMovie {
            title,
            director,
            format,
        }) => {
            let added = commands::add_movie(file, &title, &director, format.as_deref())?;

            println!("Added movie: {}", added.entry);
            println!("Movie entries: {}", added.len);
            Ok(())
        }
        Some(Commands::Delete { kind, row, filters }) => {
            let removed = commands::delete(file, kind, row, &filters)?;
            println!("Deleted: {removed}");
            Ok(())
        }
        Some(Commands::Export { output }) => {
            match commands::export(file, output.as_deref())? {
                Exported::Stdout(bytes) => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.write_all(b"\n")?;
                }
                Exported::File(path) => println!("Exported to {}", path.display()),
            }
            Ok(())
        }
        None => {
            Cli::parse_from(["mediashelf", "--help"]);
            Ok(())
        }
    }
}
