use crate::demo::{run_batch, run_demo, run_score, BatchArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use feedback_quality::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FeedbackForge quality service",
    about = "Score feedback text and serve the progressive feedback form API",
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
    /// Score a single piece of feedback text
    Score(ScoreArgs),
    /// Score every row of a CSV file with `field_id,text` columns
    Batch(BatchArgs),
    /// Walk a form session through a content model and print each transition
    Demo(DemoArgs),
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
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
