use crate::demo::{run_queue, run_triage, QueueArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_swipe::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Swipe",
    about = "Triage part-time job postings by swiping through a card stack",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the filtered, sorted queue and the visible card stack
    Queue(QueueArgs),
    /// Replay a sequence of swipes against the queue and print the ledger
    Triage(TriageArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Queue(args) => run_queue(args),
        Command::Triage(args) => run_triage(args),
    }
}
