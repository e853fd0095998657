//! Moor
//!
//! A full-screen project navigator: pick a project, browse its tree, keep
//! todos, and jump into your editor, or exit straight into the project
//! directory with a wrapping shell function:
//!
//! ```bash
//! m() { local dir; dir=$(moor) && [ -n "$dir" ] && cd "$dir"; }
//! ```

use std::process::ExitCode;

use clap::Parser;
use moor::app::{App, ExitAction};
use moor::collab::{CommandEditor, FsTree, GitStatus};
use moor::config::{CliArgs, Config};
use moor::discover;
use moor::terminal::VtTerminal;
use moor_input::ByteSource;
use moor_store::SqliteStore;
use moor_tty::TtyInput;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("moor: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("db at {}, scanning {}", config.db_path.display(), config.projects_dir.display());

    // the store opens before the terminal is touched, so an open failure
    // never leaves the terminal in raw mode
    let mut store = match SqliteStore::open(&config.db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("moor: cannot open project store: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = discover::discover_projects(&config.projects_dir, &mut store) {
        eprintln!("moor: project discovery failed: {e}");
        return ExitCode::FAILURE;
    }

    let term = match VtTerminal::new() {
        Ok(term) => term,
        Err(e) => {
            eprintln!("moor: cannot set up terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = App::new(
        Box::new(store),
        Box::new(GitStatus::new()),
        Box::new(FsTree::new()),
        Box::new(CommandEditor::new(&config.editor)),
        Box::new(term),
        Box::new(TtyInput::new()) as Box<dyn ByteSource>,
        config.scroll_threshold,
    );
    let mut app = match app {
        Ok(app) => app,
        Err(e) => {
            eprintln!("moor: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = app.run();
    // dropping the app restores the terminal before anything is printed
    drop(app);

    match outcome {
        Ok(ExitAction::Quit) => ExitCode::SUCCESS,
        Ok(ExitAction::ChangeDir(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("moor: {e}");
            ExitCode::FAILURE
        }
    }
}
