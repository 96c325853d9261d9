#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Scryview

pub mod cli_options;
pub mod client_data;
pub mod commands;
pub mod config;
pub mod logger;
pub mod query;
pub mod render;
pub mod route;
pub mod setup;
pub mod util;

use crate::{
    cli_options::{
        CliOptions,
        SubCommand,
    },
    client_data::ClientData,
    config::Config,
};
use anyhow::Context as _;
use std::{
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};
use tokio::runtime::Builder as RuntimeBuilder;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const TOKIO_RT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Data from the setup function
struct SetupData {
    tokio_rt: tokio::runtime::Runtime,
    config: Arc<Config>,
    worker_guard: Option<WorkerGuard>,
    subcommand: SubCommand,
}

/// Pre-main setup
fn setup(cli_options: CliOptions) -> anyhow::Result<SetupData> {
    let tokio_rt = RuntimeBuilder::new_multi_thread()
        .enable_all()
        .thread_name("scryview-tokio-worker")
        .build()
        .context("failed to start tokio runtime")?;

    let config = setup::load_config(&cli_options.config)
        .map(Arc::new)
        .context("failed to load config")?;

    // Everything past here is assumed to need tokio
    let _enter_guard = tokio_rt.handle().enter();

    let worker_guard =
        logger::setup(&config, cli_options.verbose).context("failed to initialize logger")?;

    Ok(SetupData {
        tokio_rt,
        config,
        worker_guard,
        subcommand: cli_options.subcommand,
    })
}

/// The main entry.
///
/// Sets up the program and calls `real_main`.
/// This allows more things to drop correctly.
/// This also calls setup operations like loading config and setting up the tokio runtime,
/// logging errors to the stderr instead of the loggers, which are not initialized yet.
fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options = argh::from_env();

    let setup_data = setup(cli_options)?;
    real_main(setup_data)?;
    Ok(())
}

/// The actual entry point
fn real_main(setup_data: SetupData) -> anyhow::Result<()> {
    // We spawn this is a seperate thread/task as the main thread does not have enough stack space
    let _enter_guard = setup_data.tokio_rt.enter();
    let ret = setup_data.tokio_rt.block_on(tokio::spawn(async_main(
        setup_data.config,
        setup_data.subcommand,
    )));

    let shutdown_start = Instant::now();
    info!(
        "shutting down tokio runtime (shutdown timeout is {:?})...",
        TOKIO_RT_SHUTDOWN_TIMEOUT
    );
    setup_data
        .tokio_rt
        .shutdown_timeout(TOKIO_RT_SHUTDOWN_TIMEOUT);
    info!("shutdown tokio runtime in {:?}", shutdown_start.elapsed());

    // Logging no longer reliable past this point
    drop(setup_data.worker_guard);

    ret?
}

/// The async entry
async fn async_main(config: Arc<Config>, subcommand: SubCommand) -> anyhow::Result<()> {
    let client_data = ClientData::init(config).context("client data initialization failed")?;

    match subcommand {
        SubCommand::Shell(options) => commands::shell::exec(&client_data, options).await,
        subcommand => commands::run(&client_data, subcommand).await,
    }
}
