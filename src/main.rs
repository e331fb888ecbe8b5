// promptdeck - command-line entry point

use std::fmt::Display;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptdeck::cli::{Cli, Commands, ConfigAction, DraftAction, KeyAction, TemplateAction, WindowAction};
use promptdeck::commands;
use promptdeck::models::prompt::{Prompt, PromptInput};
use promptdeck::models::settings::{AppConfig, PromptDraft, SettingsUpdate, WindowSize};
use promptdeck::models::template::{Template, TemplateInput};
use promptdeck::models::CommandResponse;
use promptdeck::state::AppState;
use promptdeck::storage::ConfigService;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand; `Ok(false)` means the command itself reported failure
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => ConfigService::open(path.clone()),
        None => ConfigService::new(),
    }
    .context("failed to load configuration")?;
    if let Commands::Delete {
        undo_window_ms: Some(ms),
        ..
    } = &cli.command
    {
        config
            .apply_transient(SettingsUpdate {
                undo_window_ms: Some(*ms),
                ..Default::default()
            })
            .context("invalid --undo-window-ms")?;
    }
    let state = AppState::from_config(config)
        .await
        .context("failed to start session")?;
    let json = cli.json;

    let ok = match cli.command {
        Commands::List {
            query,
            category,
            sort,
        } => emit(
            json,
            commands::list_prompts(&state, query, category, sort).await,
            |prompts| prompts.iter().for_each(print_prompt_line),
        ),
        Commands::Add {
            title,
            text,
            category,
        } => emit(
            json,
            commands::add_prompt(&state, PromptInput::new(title, text, category)).await,
            |p| println!("Added {}", p.id),
        ),
        Commands::Edit {
            id,
            title,
            text,
            category,
        } => emit(
            json,
            commands::edit_prompt(&state, id, title, text, category).await,
            |p| println!("Updated {}", p.id),
        ),
        Commands::Delete { id, .. } => delete(&state, json, id).await,
        Commands::Show { id } => emit(json, commands::get_prompt(&state, id).await, print_prompt),
        Commands::Categories => emit(json, commands::list_categories(&state).await, |cats| {
            cats.iter().for_each(|c| println!("{}", c))
        }),
        Commands::Templates { action } => match action {
            TemplateAction::List => emit(json, commands::list_templates(&state).await, |ts| {
                ts.iter().for_each(print_template)
            }),
            TemplateAction::Add { title, text } => emit(
                json,
                commands::add_template(&state, TemplateInput { title, text }).await,
                |t| println!("Added {}", t.id),
            ),
            TemplateAction::Remove { id } => emit(
                json,
                commands::remove_template(&state, id.clone()).await,
                |_| println!("Removed {}", id),
            ),
            TemplateAction::Sync => emit(json, commands::sync_templates(&state).await, |ts| {
                ts.iter().for_each(print_template)
            }),
        },
        Commands::Export { file } => emit(
            json,
            commands::export_prompts(&state, file.clone()).await,
            |n| println!("Exported {} prompts to {}", n, file.display()),
        ),
        Commands::Import { file } => emit(
            json,
            commands::import_prompts(&state, file).await,
            |n| println!("Imported {} new prompts", n),
        ),
        Commands::Key { action } => match action {
            KeyAction::Set { key } => emit(json, commands::set_api_key(&state, key).await, |_| {
                println!("API key saved")
            }),
            KeyAction::Clear => emit(json, commands::clear_api_key(&state).await, |_| {
                println!("API key cleared")
            }),
            KeyAction::Show => emit(json, commands::get_api_key_status(&state).await, |key| {
                match key {
                    Some(masked) => println!("{}", masked),
                    None => println!("No API key set"),
                }
            }),
        },
        Commands::Locale { locale } => match locale {
            Some(locale) => emit(json, commands::set_locale(&state, locale).await, |_| {
                println!("Language set to {}", locale)
            }),
            None => emit(json, commands::get_locale(&state).await, |l| println!("{}", l)),
        },
        Commands::Generate {
            prompt,
            image,
            mime,
        } => {
            let response = match image {
                Some(image) => commands::generate_with_image(&state, prompt, image, mime).await,
                None => commands::generate(&state, prompt).await,
            };
            emit(json, response, print_text)
        }
        Commands::Improve { id } => emit(json, commands::improve_prompt(&state, id).await, print_text),
        Commands::Engineer { id } => {
            emit(json, commands::engineer_prompt(&state, id).await, print_text)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => emit(json, commands::get_settings(&state).await, print_config),
            ConfigAction::Set {
                model,
                api_base_url,
                undo_window_ms,
                database_path,
            } => {
                let update = SettingsUpdate {
                    model,
                    api_base_url,
                    undo_window_ms,
                    database_path,
                    proxy: None,
                };
                emit(json, commands::update_settings(&state, update).await, print_config)
            }
        },
        Commands::Draft { action } => match action {
            DraftAction::Show => emit(json, commands::get_draft(&state).await, |draft| match draft {
                Some(d) => println!("{}\n[{}]\n\n{}", d.title, d.category, d.text),
                None => println!("No draft saved"),
            }),
            DraftAction::Save {
                title,
                text,
                category,
            } => {
                let draft = PromptDraft {
                    title,
                    category,
                    text,
                    image: None,
                };
                emit(json, commands::save_draft(&state, draft).await, |_| {
                    println!("Draft saved")
                })
            }
            DraftAction::Clear => emit(json, commands::clear_draft(&state).await, |_| {
                println!("Draft cleared")
            }),
        },
        Commands::Window { action } => match action {
            WindowAction::Show => emit(json, commands::get_window_size(&state).await, |size| {
                match size {
                    Some(s) => println!("{}x{}", s.width, s.height),
                    None => println!("No window size saved"),
                }
            }),
            WindowAction::Set { width, height } => emit(
                json,
                commands::set_window_size(&state, WindowSize { width, height }).await,
                |s| println!("Saved {}x{}", s.width, s.height),
            ),
        },
        Commands::Health => emit(json, commands::get_health(&state).await, |h| {
            println!("{} (store: {}, config: {}, api key: {})", h.status, h.store, h.config, h.api_key)
        }),
    };

    Ok(ok)
}

/// Confirm the delete, then hold the undo window open. Ctrl-C restores.
async fn delete(state: &AppState, json: bool, id: String) -> bool {
    let response = commands::delete_prompt(state, id).await;
    let Some(Some(deleted)) = response.data.clone() else {
        return emit(json, response, |_| {});
    };

    let window = state.session().undo_window();
    if !json {
        println!(
            "Deleted \"{}\". Press Ctrl-C within {}s to undo.",
            deleted.title,
            window.as_secs_f32()
        );
    }

    tokio::select! {
        _ = tokio::time::sleep(window) => {
            let flushed = commands::flush_delete(state).await;
            emit(json, flushed, |_| println!("Delete finalized"))
        }
        _ = tokio::signal::ctrl_c() => {
            let restored = commands::undo_delete(state).await;
            emit(json, restored, |p| {
                if let Some(p) = p {
                    println!("Restored \"{}\"", p.title);
                }
            })
        }
    }
}

fn emit<T: Serialize>(json: bool, response: CommandResponse<T>, render: impl FnOnce(&T)) -> bool {
    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(out) => println!("{}", out),
            Err(e) => eprintln!("error: {}", e),
        }
        return response.success;
    }

    match (&response.data, &response.error) {
        (Some(data), _) if response.success => {
            render(data);
            true
        }
        (_, Some(error)) => {
            eprintln!("error: {}", error);
            false
        }
        _ => false,
    }
}

fn print_text<T: Display>(text: &T) {
    println!("{}", text);
}

fn print_config(config: &AppConfig) {
    println!("model: {}", config.model);
    if let Some(url) = &config.api_base_url {
        println!("api base url: {}", url);
    }
    println!("undo window: {} ms", config.undo_window_ms);
    if let Some(path) = &config.database_path {
        println!("database: {}", path.display());
    }
}

fn print_prompt_line(p: &Prompt) {
    println!("{}  [{}]  {}", p.id, p.category, p.title);
}

fn print_prompt(p: &Prompt) {
    println!("{}\n[{}]  {}\n\n{}", p.title, p.category, p.id, p.text);
}

fn print_template(t: &Template) {
    let marker = if t.is_default { " (default)" } else { "" };
    println!("{}  {}{}", t.id, t.title, marker);
    let placeholders = t.placeholders();
    if !placeholders.is_empty() {
        println!("    placeholders: {}", placeholders.join(", "));
    }
}
