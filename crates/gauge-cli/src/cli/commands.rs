use super::args::{Cli, Command};
use crate::exit_codes;
use anyhow::Context;
use gauge_client::{ClientConfig, GaugeClient};
use gauge_core::config::ServerConfig;
use gauge_core::model::{BatchItem, BatchMetricsRequest, EvaluationItem};
use std::path::Path;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Serve { config } => {
            let cfg = ServerConfig::resolve(config.as_deref())?;
            gauge_server::serve(cfg).await?;
            Ok(exit_codes::OK)
        }
        Command::Call {
            file,
            metrics,
            server,
            process_id,
            user_id,
        } => {
            let items = read_items(&file)?;
            let process_id =
                process_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let req = BatchMetricsRequest::new(items, metrics, &process_id, &user_id);

            let client = GaugeClient::new(ClientConfig::new(&server))?;
            let resp = client.calculate_batch_metrics(&req).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(if resp.success {
                exit_codes::OK
            } else {
                exit_codes::BATCH_FAILED
            })
        }
        Command::Metrics { server } => {
            let client = GaugeClient::new(ClientConfig::new(&server))?;
            let listing = client.available_metrics().await?;
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                "metrics_by_category": listing.metrics_by_category,
                "all_metrics": listing.all_metrics,
            }))?);
            Ok(exit_codes::OK)
        }
    }
}

/// The file holds a JSON array of evaluation items; item ids are assigned
/// positionally.
fn read_items(path: &Path) -> anyhow::Result<Vec<BatchItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read items file {}", path.display()))?;
    let items: Vec<EvaluationItem> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse items file {}", path.display()))?;
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(idx, evaluation_data)| BatchItem {
            item_id: idx.to_string(),
            evaluation_data,
        })
        .collect())
}
