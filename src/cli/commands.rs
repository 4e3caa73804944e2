use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use crate::{
    app::{get_config_dir, init_config, local_config_path, Config, Credentials},
    gateway::{render, render_outcome},
    models::{ChatTurn, InferenceResult, Language},
    service::AiService,
};

use super::{Commands, LangArg};

/// Handle CLI subcommands
pub async fn handle_command(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Init => {
            let (path, created) = init_config()?;
            if created {
                println!("Created default configuration at: {}", path.display());
            } else {
                println!("Configuration already exists at: {}", path.display());
            }
            Ok(())
        }
        Commands::Models { json } => list_models(config, *json).await,
        Commands::Chat {
            model,
            lang,
            json,
            message,
        } => chat(config, model, message, *lang, *json).await,
        Commands::Summarize {
            history,
            lang,
            json,
        } => summarize(config, history, *lang, *json).await,
        Commands::Status => show_status(config).await,
    }
}

async fn build_service(config: &Config) -> Result<AiService> {
    AiService::from_config(config)
        .await
        .context("Failed to initialize AI service")
}

/// List available models
pub async fn list_models(config: &Config, json: bool) -> Result<()> {
    let service = build_service(config).await?;
    let models = service.get_available_models();

    if json {
        println!("{}", serde_json::to_string_pretty(models)?);
        return Ok(());
    }

    println!("Available models:");
    for model in models {
        println!("  • {} ({})", model.display_name.green(), model.id);
        println!("      provider: {}", model.provider);
        if let Some(repo) = &model.secondary_provider_ref {
            println!("      fallback: {}", repo);
        }
        if !model.description.is_empty() {
            println!("      {}", model.description.dimmed());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    text: String,
    degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

fn print_result(result: &InferenceResult, json: bool) -> Result<()> {
    if json {
        let output = JsonOutput {
            text: result.text().to_string(),
            degraded: result.is_degraded(),
            reason: result.reason().map(|r| r.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if result.is_degraded() {
        println!("{}", render(result).yellow());
    } else {
        println!("{}", render(result));
    }
    Ok(())
}

/// Send a single message
pub async fn chat(
    config: &Config,
    model: &str,
    message: &str,
    lang: LangArg,
    json: bool,
) -> Result<()> {
    let service = build_service(config).await?;
    let result = service
        .complete(model, message, Language::from(lang))
        .await;
    print_result(&result, json)
}

/// Read a conversation log export
pub fn read_history(path: &Path) -> Result<Vec<ChatTurn>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid history file {}", path.display()))
}

/// Summarize a history file
pub async fn summarize(config: &Config, history: &Path, lang: LangArg, json: bool) -> Result<()> {
    let turns = read_history(history)?;
    let service = build_service(config).await?;
    let outcome = service
        .summarize(&turns, Language::from(lang))
        .await;

    match (&outcome, json) {
        (Ok(result), _) => print_result(result, json),
        (Err(e), true) => {
            println!(
                "{}",
                serde_json::json!({ "error": e.to_string(), "kind": e.kind() })
            );
            Ok(())
        }
        (Err(_), false) => {
            println!("{}", render_outcome(&outcome).red());
            Ok(())
        }
    }
}

/// Show provider and catalog status
async fn show_status(config: &Config) -> Result<()> {
    println!("chatgate v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let credentials = Credentials::from_env(config);
    let status = |set: bool| if set { "[OK]".green() } else { "[--]".yellow() };

    println!(
        "  {} Primary provider ({}): {}",
        status(credentials.primary.is_some()),
        config.primary.api_key_env,
        config.primary.base_url
    );
    println!(
        "  {} Secondary provider ({}): {}",
        status(credentials.secondary.is_some()),
        config.secondary.api_key_env,
        config.secondary.base_url
    );
    if !credentials.any_configured() {
        println!("  {} Demo mode: no provider keys set", "[WARNING]".yellow());
    }

    let service = build_service(config).await?;
    println!(
        "  {} Catalog: {} models ({})",
        "[OK]".green(),
        service.get_available_models().len(),
        service.gateway().catalog().source()
    );
    println!("  Summary window: {} turns", config.summary.window);

    if let Ok(dir) = get_config_dir() {
        let global = dir.join("config.toml");
        if global.exists() {
            println!("  [OK] Configuration: {}", global.display());
        } else {
            println!("  [WARNING] Configuration: Not found (using defaults)");
        }
    }
    let local = local_config_path();
    if local.exists() {
        println!("  [OK] Local configuration: {}", local.display());
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_history() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[
                {"user_message": "What is Rust?", "ai_response": "A language."},
                {"user_message": "Is it fast?", "ai_response": "Yes.", "created_at": "2025-01-02T03:04:05Z"}
            ]"#,
        )
        .unwrap();

        let turns = read_history(&path).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ChatTurn::new("What is Rust?", "A language."));
        assert!(turns[1].created_at.is_some());
    }

    #[test]
    fn test_read_history_errors() {
        let dir = TempDir::new().unwrap();
        assert!(read_history(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_history(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid history file"));
    }
}
