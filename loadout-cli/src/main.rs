use clap::{Parser, Subcommand};
use loadout_lib::Repository;
use sysexits::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod build;
mod catalog;
mod prefs;

#[derive(Parser, Debug)]
#[command(name = "loadout")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create, share and edit builds
    #[command(subcommand)]
    Build(build::Command),
    /// Show or change display preferences
    #[command(subcommand)]
    Prefs(prefs::Command),
    /// Browse the item and mod catalog
    #[command(subcommand)]
    Catalog(catalog::Command),
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {err}");
    }

    let cli = Cli::parse();

    let mut repo = match Repository::new() {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("Failed to open build storage: {err}");
            return ExitCode::IoErr;
        }
    };

    match &cli.command {
        Command::Build(cmd) => build::handle(&mut repo, cmd),
        Command::Prefs(cmd) => prefs::handle(&repo, cmd),
        Command::Catalog(cmd) => catalog::handle(&repo, cmd),
    }
}
