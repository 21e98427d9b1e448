use anyhow::{bail, Context};
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::HudClient;
use crate::cli::{templates, utils, OutputFormat};

#[derive(Subcommand)]
pub enum CanvasCommands {
    #[command(about = "Submit a canvas snapshot")]
    Save {
        #[arg(long, help = "Prebuilt template name (see `hud canvas templates`)")]
        template: Option<String>,
        #[arg(long, help = "Canvas name; defaults to the template name")]
        canvas: Option<String>,
        #[arg(long, help = "Character name")]
        user: Option<String>,
        #[arg(long, help = "Campaign name")]
        campaign: Option<String>,
        #[arg(long, help = "Inline JSON for the data payload")]
        data: Option<String>,
        #[arg(long, help = "Read the data payload from a JSON file")]
        data_file: Option<String>,
        #[arg(long, help = "Write bearer token (default: HUD_WRITE_TOKEN)")]
        token: Option<String>,
    },

    #[command(about = "Show the most recently saved canvas")]
    Latest,

    #[command(about = "Fetch a canvas by id")]
    Get {
        #[arg(help = "Canvas record id")]
        id: String,
    },

    #[command(about = "List records, optionally filtered")]
    Log {
        #[arg(long, help = "Filter by canvas name")]
        canvas: Option<String>,
        #[arg(long, help = "Filter by character name")]
        user: Option<String>,
        #[arg(long, help = "Filter by alignment")]
        align: Option<String>,
    },

    #[command(about = "List campaign history, optionally filtered")]
    History {
        #[arg(long, help = "Filter by character name")]
        user: Option<String>,
        #[arg(long, help = "Filter by campaign name")]
        campaign: Option<String>,
        #[arg(long, help = "Filter by canvas name")]
        canvas: Option<String>,
    },

    #[command(about = "List available canvas templates")]
    Templates,
}

pub async fn handle(
    cmd: CanvasCommands,
    output_format: OutputFormat,
    client: &HudClient,
) -> anyhow::Result<()> {
    match cmd {
        CanvasCommands::Save {
            template,
            canvas,
            user,
            campaign,
            data,
            data_file,
            token,
        } => {
            let (canvas_name, data_value) = resolve_payload(template, canvas, data, data_file)?;

            let mut payload = json!({ "canvas": canvas_name, "data": data_value });
            if let Some(user) = user {
                payload["user"] = json!(user);
            }
            if let Some(campaign) = campaign {
                payload["campaign"] = json!(campaign);
            }

            let envelope = client.save_canvas(&payload, token).await?;
            let id = envelope["id"].as_str().unwrap_or("-").to_string();
            utils::output_success(
                output_format,
                &format!("Canvas saved (id: {id})"),
                Some(&envelope),
            )
        }

        CanvasCommands::Latest => {
            let envelope = client.get("/get_canvas", &[]).await?;
            utils::output_record(output_format, &envelope["canvas"])
        }

        CanvasCommands::Get { id } => {
            let envelope = client.get("/get_canvas_by_id", &[("id", Some(id))]).await?;
            utils::output_record(output_format, &envelope["canvas"])
        }

        CanvasCommands::Log { canvas, user, align } => {
            let envelope = client
                .get(
                    "/get_log",
                    &[("canvas", canvas), ("user", user), ("align", align)],
                )
                .await?;
            let records = envelope["log"].as_array().cloned().unwrap_or_default();
            utils::output_record_list(output_format, &records)
        }

        CanvasCommands::History {
            user,
            campaign,
            canvas,
        } => {
            let envelope = client
                .get(
                    "/get_canvas_history",
                    &[("user", user), ("campaign", campaign), ("canvas", canvas)],
                )
                .await?;
            let records = envelope["history"].as_array().cloned().unwrap_or_default();
            utils::output_record_list(output_format, &records)
        }

        CanvasCommands::Templates => {
            for name in templates::TEMPLATE_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

/// Resolve the canvas name and data payload from the save flags: either a
/// prebuilt template or a manual canvas name with inline/file JSON.
fn resolve_payload(
    template: Option<String>,
    canvas: Option<String>,
    data: Option<String>,
    data_file: Option<String>,
) -> anyhow::Result<(String, Value)> {
    if let Some(template_name) = template {
        let Some(data_value) = templates::template(&template_name) else {
            bail!(
                "unknown template '{}'; available: {}",
                template_name,
                templates::TEMPLATE_NAMES.join(", ")
            );
        };
        return Ok((canvas.unwrap_or(template_name), data_value));
    }

    let Some(canvas_name) = canvas else {
        bail!("pass --template or --canvas");
    };

    let data_value = match (data, data_file) {
        (Some(_), Some(_)) => bail!("pass --data or --data-file, not both"),
        (Some(inline), None) => {
            serde_json::from_str(&inline).context("--data is not valid JSON")?
        }
        (None, Some(path)) => {
            let contents =
                std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
            serde_json::from_str(&contents).with_context(|| format!("{path} is not valid JSON"))?
        }
        (None, None) => json!({}),
    };

    Ok((canvas_name, data_value))
}
