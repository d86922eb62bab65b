//! Prints the state of the queue named by `QUEUE_URL` as JSON.

use clap::Parser;
use quay::core::{Context, Inspector};
use quay_daemon::{InspectCli, QueueReport, init_logging};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = InspectCli::parse();
    init_logging(cli.verbose);

    let context = match Context::try_from_env() {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "Cannot inspect queue");
            return ExitCode::FAILURE;
        }
    };
    let queue = context.queue().to_string();
    let inspector = Inspector::with_context(context);

    let report = match QueueReport::gather(&inspector, &queue, cli.message.as_deref()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Failed to read queue");
            return ExitCode::FAILURE;
        }
    };

    match report.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize report");
            ExitCode::FAILURE
        }
    }
}
