use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "testops")]
#[command(about = "A CLI for turning free-text QA requirements into generated test code", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable verbose debug output")]
    verbose: bool,

    #[arg(long, global = true, help = "Print the request payload without dispatching it")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate test code from a free-text requirement")]
    Generate {
        #[arg(help = "Requirement text (reads stdin when omitted)")]
        requirement: Vec<String>,

        #[arg(long, help = "Write the generated code to this path")]
        output: Option<std::path::PathBuf>,
    },

    #[command(subcommand)]
    History(HistoryCommands),

    #[command(about = "Check that the generation backend is reachable")]
    Health,
}

#[derive(Subcommand)]
enum HistoryCommands {
    #[command(about = "List recorded generations, newest first")]
    List,

    #[command(about = "Show a recorded requirement and its code snippet")]
    Replay {
        #[arg(help = "1-based entry index from 'history list'")]
        index: usize,
    },

    #[command(about = "Remove all recorded generations")]
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = cli::Config {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Generate {
            requirement,
            output,
        } => {
            cli::generate(requirement, output, &config).await?;
        }
        Commands::History(history_cmd) => match history_cmd {
            HistoryCommands::List => cli::history_list(&config)?,
            HistoryCommands::Replay { index } => cli::history_replay(index, &config)?,
            HistoryCommands::Clear => cli::history_clear(&config)?,
        },
        Commands::Health => {
            cli::health(&config).await?;
        }
    }

    Ok(())
}
