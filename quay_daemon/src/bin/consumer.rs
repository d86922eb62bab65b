//! Drains the queue named by `QUEUE_URL` until SIGTERM or SIGINT.

use clap::Parser;
use quay::consume::Consumer;
use quay::core::{Context, RedisQueue, Shutdown};
use quay_daemon::{Cli, HashingWorkload, init_logging, spawn_signal_listener};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let context = match Context::try_from_env() {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "Cannot start consumer");
            return ExitCode::FAILURE;
        }
    };
    info!(queue = %context.queue(), "Starting to consume");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone(), "consumer");

    let consumer = Consumer::with_client(RedisQueue::with_context(context), HashingWorkload::new())
        .with_shutdown(shutdown);

    match consumer.run().await {
        Ok(()) => {
            info!("Bye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Consumer stopped");
            ExitCode::FAILURE
        }
    }
}
