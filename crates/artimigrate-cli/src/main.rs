mod cli;

use anyhow::Context;
use artimigrate_core::config::{
    AllowList,
    ConfigLoader,
};
use artimigrate_core::{
    http_client,
    logging,
    MigrationContext,
    MigrationDriver,
};
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    http_client::install_crypto_provider();

    let _log_guard = logging::init(&cli.log_dir, &cli.project).with_context(|| {
        format!(
            "Failed to open log file {}",
            logging::log_file_path(&cli.log_dir, &cli.project).display()
        )
    })?;

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let allow_list = match &cli.file {
        Some(path) => AllowList::load(path)
            .with_context(|| format!("Failed to load allow-list {}", path.display()))?,
        None => AllowList::default(),
    };

    if allow_list.is_restricted() {
        tracing::info!("Restricting migration to the allow-list");
    }

    let context = MigrationContext::new(cli.run_options(), config, allow_list)
        .context("Invalid migration settings")?;

    tracing::debug!(
        environment = %context.environment,
        overwrite = context.overwrite,
        jobs = context.jobs,
        "Migration context ready"
    );

    let client = http_client::build_client(&context.settings)?;
    let source = context.source_client(client.clone());
    let destination = context.destination_client(client);

    let report = MigrationDriver::new(&context, &source, &destination)
        .run()
        .await;

    if report.failed > 0 {
        tracing::warn!(
            "{} node(s) failed, see {} for details",
            report.failed,
            logging::log_file_path(&cli.log_dir, &cli.project).display()
        );
    }

    Ok(())
}
