//! CLI entrypoint for gabarito
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod formatter;

use anyhow::{Context, Result, bail};
use args::Cli;
use clap::Parser;
use formatter::ConsoleFormatter;
use gabarito_application::{
    ModelInvoker, QuestionSource, ResolveAnswerUseCase, ResolveSheetUseCase, ResultSink,
};
use gabarito_domain::Query;
use gabarito_infrastructure::{ConfigLoader, FileResultSink, JsonQuestionSource, build_registry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting gabarito");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let registry = Arc::new(build_registry(&config));
    if registry.configured_count() == 0 {
        bail!(
            "No providers configured. Set at least one API key \
             (e.g. ANTHROPIC_API_KEY, OPENAI_API_KEY, GEMINI_API_KEY)."
        );
    }

    let invoker = ModelInvoker::new(config.invoker.to_settings());
    let answer_use_case = ResolveAnswerUseCase::new(registry, invoker);

    let sink: Option<Arc<dyn ResultSink>> = if cli.no_save {
        None
    } else {
        Some(Arc::new(FileResultSink::new(&config.output.responses_dir)))
    };

    // === Sheet mode ===
    if let Some(path) = &cli.file {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let queries = JsonQuestionSource::new()
            .questions(&raw)
            .context("Failed to parse extracted sheet")?;

        let use_case = ResolveSheetUseCase::new(answer_use_case, sink);
        let outcome = use_case.execute(queries).await?;

        print!("{}", ConsoleFormatter::format_sheet(&outcome));
        return Ok(());
    }

    // === Single question mode ===
    let Some(question) = cli.question else {
        bail!("A question or a sheet file is required. See --help.");
    };

    let Some(query) = Query::try_new(question, cli.item.as_str(), cli.kind.into()) else {
        bail!("Question text cannot be empty.");
    };

    if !cli.quiet {
        println!();
        println!("Pergunta: {}", query.text());
        println!();
    }

    let item = query.item().clone();
    let result = answer_use_case.execute(&query).await;
    print!("{}", ConsoleFormatter::format_result(&item, result.as_ref()));

    if let Some(sink) = &sink {
        let report = gabarito_domain::format_sheet_report(&[(item, result)]);
        match sink.persist(&report).await {
            Ok(path) => info!("Report saved to {}", path.display()),
            Err(e) => tracing::warn!("Failed to persist report: {e}"),
        }
    }

    Ok(())
}
