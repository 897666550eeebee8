use anyhow::{Context, Result};
use colored::Colorize;

use commit_genius::cli::{self, Command};
use commit_genius::client::OpenRouterClient;
use commit_genius::config::AppConfig;
use commit_genius::credentials::FileCredentialStore;
use commit_genius::git::GitCli;
use commit_genius::pipeline::{DiffStrategy, Outcome, Pipeline};
use commit_genius::prompt;
use commit_genius::report::{ConsoleReporter, Reporter, Severity};
use commit_genius::sink::{CommitEditMsgSink, MessageSink, StdoutSink};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::parse();

    match cli.command {
        Some(Command::Auth) => {
            let store = FileCredentialStore::open_default()?;
            cli::store_api_key(&store)?;
        }
        Some(Command::Prompt) => {
            println!("{}", prompt::INSTRUCTIONS);
        }
        None => generate(&cli)?,
    }

    Ok(())
}

fn generate(cli: &cli::Cli) -> Result<()> {
    let mut cfg = AppConfig::load()?;
    if let Some(model) = &cli.model {
        cfg.model = model.clone();
    }

    let vcs = GitCli::new();
    let client = OpenRouterClient::new(cfg.api_url.clone(), cfg.timeout_ms);
    let credentials = FileCredentialStore::open_default()?;
    let reporter = ConsoleReporter;
    let edit_msg_sink = CommitEditMsgSink;
    let stdout_sink = StdoutSink;
    let sink: &dyn MessageSink = if cli.dry_run {
        &stdout_sink
    } else {
        &edit_msg_sink
    };

    let pipeline = Pipeline {
        vcs: &vcs,
        client: &client,
        credentials: &credentials,
        sink,
        reporter: &reporter,
        config: &cfg,
        strategy: if cli.staged {
            DiffStrategy::StagedOnly
        } else {
            DiffStrategy::Tracked
        },
    };

    let outcome = pipeline.run().context("Commit message generation failed")?;

    if let Outcome::Generated(_) = outcome {
        if !cli.dry_run {
            let hint = "Commit with: git commit -eF \"$(git rev-parse --git-dir)/COMMIT_EDITMSG\"";
            reporter.report(Severity::Info, &hint.dimmed().to_string());
        }
    }

    Ok(())
}
