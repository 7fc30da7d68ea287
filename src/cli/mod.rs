use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

mod report;

use testops::contexts::{
    DispatchGate, Dispatcher, FileHistoryMedium, GenerationRequest, HISTORY_CAPACITY,
    HistoryStore, classify, synthesize,
};

#[derive(Clone, Copy)]
pub struct Config {
    pub verbose: bool,
    pub dry_run: bool,
}

const OUTPUT_DIR_VAR: &str = "TESTOPS_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Runs the full generation pipeline for one requirement.
///
/// The requirement is the joined command-line words, or stdin when none
/// were given. Empty input is rejected before anything is dispatched.
pub async fn generate(
    words: Vec<String>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let raw = if words.is_empty() {
        read_requirement_from_stdin()?
    } else {
        words.join(" ")
    };
    let requirement = validate_requirement(&raw)?;

    let spec = synthesize(requirement);
    let mode = classify(requirement);
    let request = GenerationRequest::new(spec, mode, requirement);

    if config.verbose {
        println!("Classified requirement as {}", mode);
    }

    if config.dry_run {
        let payload = serde_json::to_string_pretty(&request)
            .context("Failed to serialize generation request")?;
        println!("{}", payload);
        return Ok(());
    }

    let dispatcher = Dispatcher::from_env();
    let mut gate = DispatchGate::new();
    if !gate.try_begin() {
        anyhow::bail!("A generation request is already in flight");
    }

    if config.verbose {
        println!("Dispatching to {}", dispatcher.base_url());
    }

    let outcome = dispatcher.dispatch(&request).await;
    gate.finish();

    // Failures are terminal for this action: no retry, no history write.
    let code = outcome.context("Generation failed")?;

    println!("{}", code);

    match save_generated_code(&code, output) {
        Ok(path) => println!("✓ Saved generated code to {}", path.display()),
        Err(e) => eprintln!("✗ Failed to save generated code: {}", e),
    }

    let mut history = HistoryStore::open(FileHistoryMedium::new(None));
    history.record(requirement, &code);

    report::analyze(&code).print();

    Ok(())
}

/// Lists recorded generations, newest first.
pub fn history_list(config: &Config) -> Result<()> {
    let history = HistoryStore::open(FileHistoryMedium::new(None));

    if history.is_empty() {
        println!("No history recorded");
        return Ok(());
    }

    for (idx, entry) in history.entries().iter().enumerate() {
        println!(
            "{:>2}. [{}] {}",
            idx + 1,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            preview(&entry.requirement)
        );
    }

    if config.verbose {
        println!(
            "\n{} of at most {} entries",
            history.len(),
            HISTORY_CAPACITY
        );
    }

    Ok(())
}

/// Prints the stored requirement and code snippet for a 1-based index.
pub fn history_replay(index: usize, _config: &Config) -> Result<()> {
    let history = HistoryStore::open(FileHistoryMedium::new(None));

    if index == 0 {
        anyhow::bail!("History indexes are 1-based; use 'history list' to pick one");
    }

    let Some((requirement, snippet)) = history.replay(index - 1) else {
        anyhow::bail!(
            "No history entry at index {} ({} recorded)",
            index,
            history.len()
        );
    };

    println!("Requirement:");
    println!("{}", requirement);
    println!("{}", "=".repeat(60));
    println!("{}", snippet);

    Ok(())
}

/// Removes all recorded generations, in memory and on disk.
pub fn history_clear(_config: &Config) -> Result<()> {
    let mut history = HistoryStore::open(FileHistoryMedium::new(None));
    let removed = history.len();
    history.clear();

    println!(
        "Cleared {} history entr{}",
        removed,
        if removed == 1 { "y" } else { "ies" }
    );

    Ok(())
}

/// Asks the generation backend whether it is alive.
pub async fn health(_config: &Config) -> Result<()> {
    let dispatcher = Dispatcher::from_env();

    let status = dispatcher.health().await.context("Health check failed")?;
    println!("Backend at {} reports: {}", dispatcher.base_url(), status);

    Ok(())
}

/// Trims the raw text and rejects empty or whitespace-only input.
fn validate_requirement(raw: &str) -> Result<&str> {
    let requirement = raw.trim();

    if requirement.is_empty() {
        anyhow::bail!("Requirement text is empty - nothing to generate");
    }

    Ok(requirement)
}

fn read_requirement_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read requirement from stdin")?;

    Ok(buffer)
}

/// Writes the generated code to the explicit path, or to a timestamped
/// file under the output directory.
fn save_generated_code(code: &str, explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let dir = std::env::var(OUTPUT_DIR_VAR)
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(dir).join(format!("generated_{}.py", stamp))
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    fs::write(&path, code).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// One-line preview of a requirement for the history listing.
fn preview(requirement: &str) -> String {
    const PREVIEW_LIMIT: usize = 60;

    let single_line = requirement.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= PREVIEW_LIMIT {
        single_line
    } else {
        let prefix: String = single_line.chars().take(PREVIEW_LIMIT).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requirement_trims_surrounding_whitespace() {
        assert_eq!(
            validate_requirement("  Создай тест\n").unwrap(),
            "Создай тест"
        );
    }

    #[test]
    fn test_validate_requirement_rejects_empty_input() {
        assert!(validate_requirement("").is_err());
        assert!(validate_requirement("   \n\t ").is_err());
    }

    #[test]
    fn test_preview_collapses_newlines_and_truncates() {
        let text = format!("первая строка\nвторая {}", "х".repeat(80));
        let preview = preview(&text);

        assert!(!preview.contains('\n'));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 63);
    }
}
