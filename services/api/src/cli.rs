use crate::report::{run_catalog, run_score, CatalogArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lrs_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "LRS Scoring Engine",
    about = "Serve the LRS questionnaire API or score answer files from the command line",
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
    /// Score a saved answers file and print the ranked schema profile
    Score(ScoreArgs),
    /// List the built-in schema catalog
    Catalog(CatalogArgs),
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
        Command::Catalog(args) => run_catalog(args),
    }
}
