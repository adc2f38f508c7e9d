use clap::{Parser, Subcommand};
use dialoguer::Input;
use media_manager::cli::{self, MENU, MenuChoice, SessionStart};
use media_manager::{
    JsonStore, MediaManagerError, MediaRepository, ProgressEvent, Settings, import_directory,
    read_listing,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Manage a catalog of TV shows and their episodes
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the show store (defaults to the platform data directory)
    #[arg(short = 'p', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the shows in the store
    Shows,
    /// Extract show, season, episode and title from media file names
    Parse {
        /// File names to parse
        #[arg(required_unless_present = "file")]
        filenames: Vec<String>,
        /// Read file names from a listing, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Add every recognized video file below a directory to the store
    Import {
        /// Directory to scan
        directory: PathBuf,
    },
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Started { directory } => {
            println!("Importing from {}...", directory.display());
        }
        ProgressEvent::ScanningVideos => {
            println!("Scanning for video files...");
        }
        ProgressEvent::VideosFound { count } => {
            if count == 0 {
                println!("No video files found.");
            } else {
                println!("Found {} video file(s)\n", count);
            }
        }
        ProgressEvent::Imported {
            show_name,
            season,
            number,
            ..
        } => {
            println!("  Added {} s{:02}e{:02}", show_name, season, number);
        }
        ProgressEvent::SkippedUnrecognized { path } => {
            println!("  Skipped {}: name not recognized", path.display());
        }
        ProgressEvent::SkippedInvalid { path, reason } => {
            println!("  Skipped {}: {}", path.display(), reason);
        }
        ProgressEvent::SkippedDuplicate { path } => {
            println!("  Skipped {}: already in the store", path.display());
        }
        ProgressEvent::Complete { summary } => {
            println!(
                "\nImport complete! Added {} episode(s), skipped {}.",
                summary.imported,
                summary.unrecognized + summary.invalid + summary.duplicates
            );
        }
    }
}

fn print_shows(store: &JsonStore) -> Result<(), MediaManagerError> {
    for line in cli::show_lines(&store.shows()?) {
        println!("{}", line);
    }
    Ok(())
}

fn prompt(text: &str) -> Result<String, MediaManagerError> {
    Ok(Input::<String>::new()
        .with_prompt(text)
        .allow_empty(true)
        .interact_text()?)
}

/// Runs the menu loop for one show until the user quits
fn manage_show(store: &JsonStore) -> Result<(), MediaManagerError> {
    print_shows(store)?;
    println!();

    let session = loop {
        match cli::open_session(store, &prompt("Which show")?)? {
            SessionStart::Opened(session) => break session,
            SessionStart::Rejected(message) => println!("{}", message),
        }
    };
    println!("Managing {}", session.show());

    loop {
        println!("{}", MENU);
        let choice = prompt("Choice")?;

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::AddEpisode) => {
                let title = prompt("Episode title")?;
                let season = prompt("Season")?;
                let number = prompt("Episode number")?;
                println!("{}", cli::add_episode(&session, &title, &season, &number)?);
            }
            Some(MenuChoice::ListEpisodes) => {
                println!("Episodes");
                for line in cli::list_episodes(&session)? {
                    println!("{}", line);
                }
            }
            Some(MenuChoice::Quit) => break,
            None => println!("Invalid choice"),
        }
    }

    println!("Bye");
    Ok(())
}

fn run(args: Args, settings: &Settings) -> Result<(), MediaManagerError> {
    match args.command {
        Some(Command::Parse { filenames, file }) => {
            let mut names = match file {
                Some(listing) => read_listing(&listing)?,
                None => Vec::new(),
            };
            names.extend(filenames);
            for name in &names {
                println!("{}", cli::parse_report(name));
            }
            Ok(())
        }
        Some(Command::Shows) => print_shows(&settings.open_store()?),
        Some(Command::Import { directory }) => {
            let store = settings.open_store()?;
            import_directory(&directory, &store, handle_progress_event)?;
            Ok(())
        }
        None => manage_show(&settings.open_store()?),
    }
}

fn main() {
    let args = Args::parse();
    let settings = Settings::from_env(args.data_dir.clone(), args.verbose);

    let filter = match settings.env_filter() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(?settings, "Resolved settings");

    if let Err(e) = run(args, &settings) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
