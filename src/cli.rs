use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use inquire::validator::Validation;
use inquire::{Password, PasswordDisplayMode};

use crate::credentials::{CredentialStore, OPENROUTER_KEY};

#[derive(Parser, Debug)]
#[command(
    name = "cmg",
    about = "Generate git commit messages with OpenRouter",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the generated message to stdout instead of writing it for git
    #[arg(long)]
    pub dry_run: bool,

    /// Summarize the already-staged diff; never stages anything
    #[arg(long)]
    pub staged: bool,

    /// Model identifier override for this run
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the OpenRouter API key
    Auth,
    /// Print the instruction template sent to the model
    Prompt,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Interactive credential entry. Keys are masked while typing and validated
/// before anything touches the store.
pub fn store_api_key(store: &dyn CredentialStore) -> Result<()> {
    let key = Password::new("OpenRouter API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("sk-or-...")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                return Ok(Validation::Invalid("An API key is required".into()));
            }
            if !input.starts_with("sk-or-") {
                return Ok(Validation::Invalid(
                    "OpenRouter keys start with 'sk-or-'".into(),
                ));
            }
            Ok(Validation::Valid)
        })
        .prompt()?;

    store.set(OPENROUTER_KEY, key.trim())?;
    eprintln!("{} OpenRouter API key stored", "done!".green().bold());
    Ok(())
}
