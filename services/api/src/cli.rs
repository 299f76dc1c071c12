use crate::rekap::{run_category, run_export, run_student, CategoryArgs, ExportArgs, StudentArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use kebiasaan::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rekap Kebiasaan",
    about = "Serve and export the monthly 7-habit indicator recap",
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
    /// Evaluate a habit dataset offline
    Rekap {
        #[command(subcommand)]
        command: RekapCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RekapCommand {
    /// Write the monthly assessment CSV for the filtered roster
    Export(ExportArgs),
    /// Print the raw per-day values of one habit category as JSON
    Kategori(CategoryArgs),
    /// Print one student's indicator ratings for a month as JSON
    Siswa(StudentArgs),
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
        Command::Rekap { command } => match command {
            RekapCommand::Export(args) => run_export(args),
            RekapCommand::Kategori(args) => run_category(args),
            RekapCommand::Siswa(args) => run_student(args),
        },
    }
}
