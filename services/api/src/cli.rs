use crate::demo::{
    run_badge_preview, run_demo, run_score_report, BadgePreviewArgs, DemoArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pool_rating::error::AppError;
use pool_rating::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Pool Rating",
    about = "Score hotel pools and manage rating badges from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP admin service (default command)
    Serve(ServeArgs),
    /// Score every hotel in a CSV attribute export
    Score(ScoreArgs),
    /// Work with badge rules against a CSV attribute export
    Badge {
        #[command(subcommand)]
        command: BadgeCommand,
    },
    /// Walk through scoring and badge assignment on seeded hotels
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BadgeCommand {
    /// List the hotels that would receive a badge, without assigning it
    Preview(BadgePreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Weight table CSV export (overrides APP_WEIGHTS_CSV)
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
    /// Hotel attribute CSV export used to seed the in-memory store
    #[arg(long)]
    pub(crate) hotels_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => {
            telemetry::init_cli()?;
            run_score_report(args)
        }
        Command::Badge {
            command: BadgeCommand::Preview(args),
        } => {
            telemetry::init_cli()?;
            run_badge_preview(args)
        }
        Command::Demo(args) => {
            telemetry::init_cli()?;
            run_demo(args)
        }
    }
}
