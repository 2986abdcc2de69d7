//! QuickNote command-line front end.
//!
//! # Responsibility
//! - Map one command to one manager operation.
//! - Render the outcome and the resulting note list to stdout.

use crate::cli::{CliConfig, Command};
use clap::Parser;
use log::error;
use quicknote_core::db::open_db;
use quicknote_core::search::filter::preview;
use quicknote_core::{
    init_logging, CoreConfig, KvNoteStore, Note, NoteId, NoteManager, NoteStore, SqliteKvStore,
    SubmitOutcome,
};
use std::error::Error;
use std::process::ExitCode;

mod cli;

const PREVIEW_CHARS: usize = 72;

fn main() -> ExitCode {
    let cli_config = CliConfig::parse();
    match run(cli_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("quicknote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli_config: CliConfig) -> Result<(), Box<dyn Error>> {
    if let Command::Ping = cli_config.command {
        println!("quicknote_core ping={}", quicknote_core::ping());
        println!("quicknote_core version={}", quicknote_core::core_version());
        return Ok(());
    }

    let mut config = CoreConfig::default()
        .with_db_path(cli_config.db)
        .with_storage_key(cli_config.storage_key)
        .with_log_dir(cli_config.log_dir);
    if let Some(level) = cli_config.log_level {
        config = config.with_log_level(level);
    }
    let config = config.validate()?;

    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let store = KvNoteStore::with_key(SqliteKvStore::new(&conn), config.storage_key.as_str());
    let mut manager = NoteManager::load(store);

    match cli_config.command {
        Command::Add { title, content } => {
            manager.set_draft_title(title);
            manager.set_draft_content(content);
            match manager.submit()? {
                SubmitOutcome::Created(id) => println!("created {id}"),
                _ => println!("nothing to save: title and content are both empty"),
            }
        }
        Command::Edit { id, title, content } => {
            let id = NoteId::from(id);
            if !manager.begin_edit(&id) {
                println!("no note with id {id}");
                return Ok(());
            }
            if let Some(title) = title {
                manager.set_draft_title(title);
            }
            if let Some(content) = content {
                manager.set_draft_content(content);
            }
            match manager.submit()? {
                SubmitOutcome::Updated(id) => println!("updated {id}"),
                _ => println!("nothing to save: title and content are both empty"),
            }
        }
        Command::Delete { id } => {
            let id = NoteId::from(id);
            if manager.delete(&id)? {
                println!("deleted {id}");
            } else {
                println!("no note with id {id}");
            }
        }
        Command::Star { id } => {
            let id = NoteId::from(id);
            match manager.toggle_star(&id)? {
                Some(true) => println!("starred {id}"),
                Some(false) => println!("unstarred {id}"),
                None => println!("no note with id {id}"),
            }
        }
        Command::List { search, filter } => {
            manager.set_search_term(search);
            manager.set_filter(filter);
            render_list(&manager);
        }
        Command::Stats => {
            let stats = manager.stats();
            println!("{} total, {} starred", stats.total, stats.starred);
        }
        Command::Ping => {}
    }

    Ok(())
}

fn render_list<S: NoteStore>(manager: &NoteManager<S>) {
    let visible = manager.visible_notes();
    let state = manager.state();
    if visible.is_empty() {
        if state.search_term.is_empty() {
            println!("No notes yet. Create your first note with `quicknote add`.");
        } else {
            println!("No notes found matching \"{}\"", state.search_term);
        }
        return;
    }

    for note in visible {
        render_note(note);
    }
}

fn render_note(note: &Note) {
    let star = if note.starred { '*' } else { ' ' };
    println!(
        "{star} {}  {}  [{}]",
        note.id,
        note.display_title(),
        note.updated_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    );
    let body = preview(&note.content, PREVIEW_CHARS);
    if !body.is_empty() {
        println!("    {body}");
    }
}
