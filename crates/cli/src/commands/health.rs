//! Server health command

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    color_status, format_timestamp, print_json, print_success, print_table, print_warning,
    OutputFormat,
};

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Last Check")]
    last_check: String,
}

/// Show component health and readiness; fails when the server is not ready
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let (_, health) = client.health().await?;
    let (_, readiness) = client.readiness().await?;

    match format {
        OutputFormat::Json => {
            print_json(&json!({ "health": health, "readiness": readiness }))?;
        }
        OutputFormat::Table => {
            println!("{}", "Service Health".bold());
            println!("{}", "=".repeat(40));
            println!("Overall: {}", color_status(health.status.as_str()));
            println!();

            let rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, component)| ComponentRow {
                    component: name.clone(),
                    status: color_status(component.status.as_str()),
                    message: component.message.clone().unwrap_or_else(|| "-".to_string()),
                    last_check: format_timestamp(component.last_check_timestamp),
                })
                .collect();
            print_table(rows);

            if readiness.ready {
                print_success("Service is ready");
            } else {
                print_warning(&format!(
                    "Service is not ready: {}",
                    readiness.reason.as_deref().unwrap_or("unknown reason")
                ));
            }
        }
    }

    if !readiness.ready {
        anyhow::bail!("Service is not ready");
    }
    Ok(())
}
