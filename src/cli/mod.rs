pub mod client;
pub mod commands;
pub mod templates;
pub mod utils;

use clap::{Parser, Subcommand};

use client::HudClient;

#[derive(Parser)]
#[command(name = "hud")]
#[command(about = "HUD CLI - Command-line client for the RPG HUD API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Server base URL (default: HUD_API_URL or http://127.0.0.1:8080)")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Canvas snapshots: save and query")]
    Canvas {
        #[command(subcommand)]
        cmd: commands::canvas::CanvasCommands,
    },

    #[command(about = "Talk to the AI game master")]
    Gm {
        #[command(subcommand)]
        cmd: commands::gm::GmCommands,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = HudClient::new(cli.server.clone());

    match cli.command {
        Commands::Canvas { cmd } => commands::canvas::handle(cmd, output_format, &client).await,
        Commands::Gm { cmd } => commands::gm::handle(cmd, output_format, &client).await,
    }
}
