mod cli;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{BatchArgs, Cli, Command};
use unlatch::{BatchReport, Mode, TemplateStore, process_batch};

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Unlock(args) => run_batch(&args, &Mode::Unlock),
        Command::Rebuild(args) => run_batch(&args, &Mode::Rebuild),
        Command::Merge {
            batch,
            model,
            template,
            templates_dir,
        } => {
            let model = match (model, template) {
                (Some(model), _) => model,
                (None, Some(id)) => {
                    let store = TemplateStore::open(&templates_dir)?;
                    store.require_template_path(&id)?
                },
                (None, None) => anyhow::bail!("either --model or --template is required"),
            };
            info!(model = %model.display(), "merging into model");
            run_batch(&batch, &Mode::Merge { model })
        },
        Command::Templates {
            templates_dir,
            json,
        } => {
            let store = TemplateStore::open(&templates_dir)?;
            if json {
                let templates: Vec<_> = store.templates().collect();
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else if store.is_empty() {
                println!("No templates in {}", store.dir().display());
            } else {
                for t in store.templates() {
                    println!("{}\t{}\t{}", t.id, t.name, t.filename);
                }
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn run_batch(args: &BatchArgs, mode: &Mode) -> anyhow::Result<ExitCode> {
    let report = process_batch(&args.inputs, &args.output_dir, mode);

    for success in &report.successes {
        println!("{}", success.output.display());
    }
    for failure in &report.failures {
        eprintln!("{}: {}", failure.input.display(), failure.error);
    }
    eprintln!("{}", report.message);

    if let Some(path) = &args.report_json {
        write_report(&report, path)?;
    }

    Ok(if report.all_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn write_report(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("failed to write report file {}", path.display()))?;
    Ok(())
}
