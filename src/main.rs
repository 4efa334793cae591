mod content;
mod core;
mod movement;
mod organizer;

use std::path::PathBuf;
use std::process::ExitCode;

use avian3d::prelude::*;
use bevy::prelude::*;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::organizer::{OrganizerSettings, PrefsStore};

#[derive(Parser, Debug)]
#[command(name = "plataformer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the game (default).
    Play,
    /// Move project assets into folders according to the saved mappings.
    Organize {
        #[arg(long)]
        project: PathBuf,
        /// Settings file; defaults to the prefs file inside the project.
        #[arg(long)]
        prefs: Option<PathBuf>,
        /// Print the planned moves without touching any file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Create the standard asset folders and save the starter mappings.
    InitProject {
        #[arg(long)]
        project: PathBuf,
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(),
        Command::Organize {
            project,
            prefs,
            dry_run,
        } => {
            init_cli_logging();
            report(run_organize(&project, prefs, dry_run))
        }
        Command::InitProject { project, prefs } => {
            init_cli_logging();
            report(run_init_project(&project, prefs))
        }
    }
}

fn play() -> ExitCode {
    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Plataformer".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        // Content inserts the tuning resources the movement plugin would otherwise default.
        .add_plugins((
            content::ContentPlugin::default(),
            core::CorePlugin,
            movement::MovementPlugin,
        ))
        .run();

    match exit {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}

fn init_cli_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn report(result: Result<(), Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn prefs_store(project: &std::path::Path, prefs: Option<PathBuf>) -> PrefsStore {
    match prefs {
        Some(path) => PrefsStore::open(path),
        None => PrefsStore::for_project(project),
    }
}

fn run_organize(
    project: &std::path::Path,
    prefs: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = OrganizerSettings::load(&prefs_store(project, prefs));
    if settings.mappings.is_empty() {
        warn!("No folder mappings configured; only particle prefabs can move");
    }

    if dry_run {
        let moves = organizer::plan(project, &settings)?;
        for planned in &moves {
            println!(
                "{} -> {} ({})",
                planned.source,
                planned.destination(),
                planned.reason
            );
        }
        println!("{} move(s) planned", moves.len());
        return Ok(());
    }

    let summary = organizer::organize(project, &settings)?;
    println!(
        "moved={} skipped={} planned={}",
        summary.moved, summary.skipped, summary.planned
    );
    Ok(())
}

fn run_init_project(
    project: &std::path::Path,
    prefs: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let created = organizer::create_project_folders(project)?;
    info!("Created {} project folder(s) under {}", created, project.display());

    let store = prefs_store(project, prefs);
    if store.get_string(organizer::SETTINGS_KEY).is_some() {
        info!("Keeping existing organizer settings in {}", store.path().display());
    } else {
        OrganizerSettings::template().save(&store)?;
        info!("Saved starter organizer settings to {}", store.path().display());
    }
    Ok(())
}
