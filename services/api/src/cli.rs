use std::path::PathBuf;

use boiler_kpi::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, run_review_report, DemoArgs, ReviewReportArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Boiler KPI Review",
    about = "Score and report monthly KPI reviews for boiler plant shift managers",
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
    /// Work with review scoring from the command line
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Run an end-to-end demo: sign in, rate the rubric, print the report
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Render a score report for one evaluation
    Report(ReviewReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Persist accounts and the active session to this JSON file instead of memory
    #[arg(long)]
    pub(crate) store_path: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Review {
            command: ReviewCommand::Report(args),
        } => run_review_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
