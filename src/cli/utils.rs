use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<&Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            if let Some(data) = data {
                println!("{}", serde_json::to_string_pretty(data)?);
            } else {
                println!("{{\"status\":\"success\"}}");
            }
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(data) = data {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
        }
    }
    Ok(())
}

/// Print one record per line: timestamp, owner, campaign, canvas, alignment.
pub fn output_record_list(output_format: OutputFormat, records: &[Value]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("(no records)");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {} / {} / {} [{}]  {}",
                    record["timestamp"].as_str().unwrap_or("-"),
                    record["user"].as_str().unwrap_or("-"),
                    record["campaign"].as_str().unwrap_or("-"),
                    record["canvas"].as_str().unwrap_or("-"),
                    record["meta"]["alignment"].as_str().unwrap_or("-"),
                    record["id"].as_str().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

/// Print one full record.
pub fn output_record(output_format: OutputFormat, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => {
            println!(
                "{} for {} ({})",
                record["canvas"].as_str().unwrap_or("-"),
                record["user"].as_str().unwrap_or("-"),
                record["campaign"].as_str().unwrap_or("-"),
            );
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    }
    Ok(())
}
