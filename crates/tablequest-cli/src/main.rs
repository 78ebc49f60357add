use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tablequest", version, about = "TableQuest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a practice session
    Play(commands::play::PlayArgs),
    /// Times-table mastery overview
    Tables,
    /// Player statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Badge collection
    Badges,
    /// Settings for the active profile
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Tables => commands::tables::run(),
        Commands::Stats { json } => commands::stats::run(json),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Badges => commands::badges::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
