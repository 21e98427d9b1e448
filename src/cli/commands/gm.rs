use clap::Subcommand;

use crate::cli::client::HudClient;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum GmCommands {
    #[command(about = "Send a message to the AI game master")]
    Ask {
        #[arg(help = "The message to send")]
        message: String,
    },
}

pub async fn handle(
    cmd: GmCommands,
    output_format: OutputFormat,
    client: &HudClient,
) -> anyhow::Result<()> {
    match cmd {
        GmCommands::Ask { message } => {
            let response = client.query_gm(&message).await?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Text => {
                    // OpenAI-style responses carry the reply here; anything
                    // else is printed raw.
                    match response["choices"][0]["message"]["content"].as_str() {
                        Some(content) => println!("{content}"),
                        None => println!("{}", serde_json::to_string_pretty(&response)?),
                    }
                }
            }
            Ok(())
        }
    }
}
