//! Command runners
//!
//! Each runner opens the catalog, delegates to the importer and prints a
//! one-line result. Errors carry the library name or path as context.

use crate::cli::{Cli, Commands};
use crate::config::CliConfig;
use crate::confirm::StdinConfirm;
use anyhow::Context;
use kyofu_core::MetadataExtractor;
use kyofu_importer::{
    ApplyOutcome, ChangeApplicator, CommitPolicy, Confirm, ConfirmRequest, FullReconciler,
    IncrementalReconciler, SyncReport,
};
use kyofu_metadata::LoftyExtractor;
use std::path::Path;

/// Run the parsed command against the configured catalog
pub async fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let auto_approve = cli.yes;

    if let Commands::Inspect { file } = &cli.command {
        return inspect(file);
    }

    let pool = kyofu_storage::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open catalog: url={}", config.database_url))?;
    kyofu_storage::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let mut applicator = ChangeApplicator::new(CommitPolicy::from_auto_approve(
        auto_approve,
        Box::new(StdinConfirm::new()),
    ));

    match cli.command {
        Commands::Init {
            library_name,
            base_path,
        } => {
            let report = kyofu_importer::init_library(
                &pool,
                &library_name,
                &base_path,
                LoftyExtractor::new(),
                &mut applicator,
            )
            .await
            .with_context(|| {
                format!(
                    "init failed: library={} path={}",
                    library_name,
                    base_path.display()
                )
            })?;
            print_report(&report);
        }
        Commands::Scan {
            library_name,
            overwrite_song,
            path_hint,
        } => {
            if path_hint.is_empty() && !auto_approve {
                let request =
                    ConfirmRequest::new(format!("Scan the whole library '{}'?", library_name));
                if !StdinConfirm::new().confirm(&request) {
                    println!("Aborted");
                    return Ok(());
                }
            }

            let reconciler = FullReconciler::new(LoftyExtractor::new())
                .overwrite(overwrite_song)
                .path_hints(path_hint);
            let report =
                kyofu_importer::scan_library(&pool, &library_name, &reconciler, &mut applicator)
                    .await
                    .with_context(|| format!("scan failed: library={}", library_name))?;
            print_report(&report);
        }
        Commands::Update { library_name } => {
            let reconciler = IncrementalReconciler::new(LoftyExtractor::new());
            let report =
                kyofu_importer::update_library(&pool, &library_name, &reconciler, &mut applicator)
                    .await
                    .with_context(|| format!("update failed: library={}", library_name))?;
            print_report(&report);
        }
        Commands::Delete {
            library_name,
            prefix,
        } => {
            let report =
                kyofu_importer::prune_library(&pool, &library_name, &prefix, &mut applicator)
                    .await
                    .with_context(|| format!("delete failed: library={}", library_name))?;
            match report.outcome {
                ApplyOutcome::Committed(summary) if summary.is_empty() => {
                    println!("{}: nothing to delete", report.library.name);
                }
                _ => print_report(&report),
            }
        }
        Commands::Inspect { .. } => {}
    }

    pool.close().await;
    Ok(())
}

fn print_report(report: &SyncReport) {
    match report.outcome {
        ApplyOutcome::Committed(summary) => {
            println!("{}: {}", report.library.name, summary);
        }
        ApplyOutcome::Declined { discarded } => {
            println!(
                "{}: declined, discarded {}",
                report.library.name, discarded
            );
        }
    }
}

fn inspect(file: &Path) -> anyhow::Result<()> {
    let metadata = LoftyExtractor::new()
        .extract(file)
        .with_context(|| format!("inspect failed: path={}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
