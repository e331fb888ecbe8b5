//! CLI definition for the promptdeck command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::template::Locale;
use crate::models::view::SortOrder;

/// promptdeck - a local prompt library with Gemini-assisted editing.
///
/// Prompts and templates live in ~/.promptdeck/data.db; configuration in
/// ~/.promptdeck/config.json. Set RUST_LOG to change log verbosity.
#[derive(Parser, Debug)]
#[command(name = "promptdeck")]
#[command(version)]
#[command(about = "Manage, search and refine reusable AI prompts")]
pub struct Cli {
    /// Print the raw JSON response envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this config file instead of ~/.promptdeck/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List prompts, newest first by default
    List {
        /// Case-insensitive title search
        #[arg(short, long)]
        query: Option<String>,
        /// Exact category, or "All"
        #[arg(short, long)]
        category: Option<String>,
        /// date-desc, date-asc, title-asc, title-desc, category-asc, category-desc
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },

    /// Add a prompt
    Add {
        title: String,
        text: String,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit a prompt; omitted fields are kept
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a prompt. Press Ctrl-C during the undo window to restore it.
    Delete {
        id: String,
        /// Undo window for this run, overriding the configured one
        #[arg(long, value_name = "MS")]
        undo_window_ms: Option<u64>,
    },

    /// Show one prompt
    Show {
        id: String,
    },

    /// List categories
    Categories,

    /// Manage templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Export all prompts to a JSON file
    Export {
        file: PathBuf,
    },

    /// Merge prompts from a JSON export file
    Import {
        file: PathBuf,
    },

    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Show or change the interface language
    Locale {
        /// en or fr; omit to show the current language
        locale: Option<Locale>,
    },

    /// Generate text with Gemini
    Generate {
        prompt: String,
        /// Attach an image file
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
        /// MIME type of the image; guessed from the extension when omitted
        #[arg(long, requires = "image")]
        mime: Option<String>,
    },

    /// Fix grammar and tighten the wording of a prompt
    Improve {
        id: String,
    },

    /// Rewrite a prompt using prompt-engineering patterns
    Engineer {
        id: String,
    },

    /// Show or change application configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage the saved new-prompt draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Show or save the window size restored on open
    Window {
        #[command(subcommand)]
        action: WindowAction,
    },

    /// Show backend health
    Health,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// List templates
    List,
    /// Add a user template
    Add { title: String, text: String },
    /// Remove a template
    Remove { id: String },
    /// Restore the default templates for the current language
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Save the API key
    Set { key: String },
    /// Remove the API key
    Clear,
    /// Show whether a key is set
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Change configuration values. Takes effect on the next run.
    Set {
        #[arg(long)]
        model: Option<String>,
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        #[arg(long, value_name = "MS")]
        undo_window_ms: Option<u64>,
        #[arg(long, value_name = "PATH")]
        database_path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DraftAction {
    /// Print the saved draft
    Show,
    /// Save a draft; saving only empty fields clears it
    Save {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Discard the saved draft
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum WindowAction {
    /// Print the saved size
    Show,
    /// Save a size; values above 790x600 are clamped
    Set { width: u32, height: u32 },
}
