//! CLI frontend for the Kartograf world assembler.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "kg",
    about = "Kartograf: assemble room files into a linked world map",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate room files and, optionally, a whole layout plan
    Check {
        /// Room files to validate
        files: Vec<PathBuf>,

        /// Build this layout plan and verify the resulting world
        #[arg(short, long)]
        plan: Option<PathBuf>,
    },

    /// Build a layout plan and export the world document
    Build {
        /// Layout plan file
        plan: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write door directions as symbols instead of numeric codes
        #[arg(long)]
        symbolic: bool,
    },

    /// Show world statistics for a layout plan
    Stats {
        /// Layout plan file
        plan: PathBuf,
    },

    /// List every door and where it leads
    Links {
        /// Layout plan file
        plan: PathBuf,

        /// Only list doors whose peer room was removed
        #[arg(long)]
        dangling: bool,
    },

    /// Show details of one placed room
    Show {
        /// Layout plan file
        plan: PathBuf,

        /// Room id
        room: u32,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { files, plan } => commands::check::run(&files, plan.as_deref()),
        Commands::Build {
            plan,
            output,
            symbolic,
        } => commands::build::run(&plan, output.as_deref(), symbolic),
        Commands::Stats { plan } => commands::stats::run(&plan),
        Commands::Links { plan, dangling } => commands::links::run(&plan, dangling),
        Commands::Show { plan, room } => commands::show::run(&plan, room),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
