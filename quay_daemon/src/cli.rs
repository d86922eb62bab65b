use clap::Parser;

/// Command line shared by the producer and the consumer
#[derive(Debug, Parser)]
#[command(version, about = "Reads the queue address from QUEUE_URL, e.g. redis://localhost:6379#orders")]
pub struct Cli {
    /// Log every message at debug level instead of periodic summaries only
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line of `quay-inspect`
#[derive(Debug, Parser)]
#[command(version, about = "Prints the state of the queue in QUEUE_URL as JSON")]
pub struct InspectCli {
    #[arg(short, long)]
    pub verbose: bool,

    /// Also include everything stored about this message id
    #[arg(short, long)]
    pub message: Option<String>,
}
