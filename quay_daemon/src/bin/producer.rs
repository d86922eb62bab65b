//! Feeds the queue named by `QUEUE_URL` with synthetic messages until SIGTERM or SIGINT.

use clap::Parser;
use quay::core::{Context, RedisQueue, Shutdown};
use quay::produce::Producer;
use quay_daemon::{Cli, init_logging, spawn_signal_listener};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let context = match Context::try_from_env() {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "Cannot start producer");
            return ExitCode::FAILURE;
        }
    };
    info!(queue = %context.queue(), "Starting to produce messages");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone(), "producer");

    let producer = Producer::with_client(RedisQueue::with_context(context)).with_shutdown(shutdown);

    match producer.run().await {
        Ok(()) => {
            info!("Bye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Producer stopped");
            ExitCode::FAILURE
        }
    }
}
