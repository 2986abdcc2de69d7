use clap::{Parser, Subcommand};
use quicknote_core::config::DEFAULT_DB_FILE_NAME;
use quicknote_core::repo::note_store::DEFAULT_STORAGE_KEY;
use quicknote_core::NoteFilter;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "quicknote", version, about = "Create, star, search and filter short notes")]
pub struct CliConfig {
    /// SQLite database holding the note collection.
    #[arg(long, env = "QUICKNOTE_DB", default_value = DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// Key-value entry the collection is stored under.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(long, env = "QUICKNOTE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging is off when unset.
    #[arg(long, env = "QUICKNOTE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create a note.
    Add {
        #[arg(long, short, default_value = "")]
        title: String,
        #[arg(long, short, default_value = "")]
        content: String,
    },
    /// Edit a note; omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        content: Option<String>,
    },
    /// Delete a note.
    Delete { id: String },
    /// Toggle the star on a note.
    Star { id: String },
    /// List notes matching a search term and filter.
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, short, default_value_t = NoteFilter::All)]
        filter: NoteFilter,
    },
    /// Show total and starred counts.
    Stats,
    /// Check core linkage.
    Ping,
}
