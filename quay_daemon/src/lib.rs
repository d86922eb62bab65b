//! `quay_daemon` wires Quay producers and consumers into long-running processes.
//!
//! All binaries read the queue from `QUEUE_URL` and log with `tracing`.
//! The producer and the consumer stop gracefully on SIGTERM or SIGINT,
//! `quay-inspect` prints a JSON snapshot of the queue and exits.

mod cli;
mod hashing;
mod logging;
mod report;
mod signals;

pub use cli::{Cli, InspectCli};
pub use hashing::HashingWorkload;
pub use logging::init_logging;
pub use report::QueueReport;
pub use signals::spawn_signal_listener;
