use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pas_client::api::GetPointAlarmThresholdResponse;
use pas_client::models::{
    AlarmStatusType, Coordinate, DataPoint, ExternalAlarmStatus, Measurement, PasEvent, Patch,
    PatchOperation, Threshold,
};
use pas_client::{ConfigError, PasClient, PasClientConfig, PointAlarmStatusApi, StaticToken};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "Talks to the point alarm status service")]
struct Args {
    /// Deployment stage; overrides `PAS_STAGE`.
    #[arg(long)]
    stage: Option<String>,

    /// Overrides `PAS_BASE_URL` and the stage derived base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the service.
    #[arg(long, env = "ENLIGHT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the thresholds of a node.
    Threshold { node_id: Uuid },
    /// Replace the thresholds of a node with the JSON document in `file`.
    SetThreshold { node_id: Uuid, file: PathBuf },
    /// Replace the overall outer high limit through a JSON Patch.
    PatchOuterHigh {
        node_id: Uuid,
        value: f64,
        /// Only apply the patch while the current limit equals this value.
        #[arg(long)]
        expect: Option<f64>,
    },
    /// Print the alarm status of a node.
    Status { node_id: Uuid },
    /// Feed a single data point and print the recomputed status.
    Measure {
        node_id: Uuid,
        value: f64,
        #[arg(long, default_value = "gE")]
        unit: String,
    },
    /// Set the external alarm status (0 not configured .. 4 danger).
    SetExternal {
        node_id: Uuid,
        status: i32,
        #[arg(long)]
        set_by: Option<Uuid>,
    },
    /// Decode a stored event body.
    DecodeEvent {
        #[arg(long)]
        event_type: String,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Args {
        stage,
        base_url,
        token,
        command,
    } = Args::parse();
    let open_client = || {
        let config = client_config(
            stage.as_deref(),
            base_url.as_deref(),
            PasClientConfig::from_env,
        )?;
        connect(config, token.clone())
    };

    match command {
        Command::Threshold { node_id } => emit(&open_client()?.get_threshold(node_id).await?),
        Command::SetThreshold { node_id, file } => {
            let body =
                std::fs::read(&file).with_context(|| format!("read threshold {}", file.display()))?;
            let response: GetPointAlarmThresholdResponse = serde_json::from_slice(&body)
                .with_context(|| format!("parse threshold {}", file.display()))?;
            let threshold = Threshold::try_from(response)?;
            let client = open_client()?;
            client.set_threshold(node_id, &threshold).await?;
            emit(&client.get_threshold(node_id).await?)
        }
        Command::PatchOuterHigh {
            node_id,
            value,
            expect,
        } => {
            let patch = outer_high_patch(value, expect);
            emit(&open_client()?.patch_threshold(node_id, &patch).await?)
        }
        Command::Status { node_id } => emit(&open_client()?.get_alarm_status(node_id).await?),
        Command::Measure {
            node_id,
            value,
            unit,
        } => {
            let measurement = Measurement::data_point(
                Uuid::new_v4(),
                Utc::now(),
                DataPoint {
                    coordinate: Coordinate { x: 0.0, y: value },
                    x_unit: "s".to_string(),
                    y_unit: unit,
                },
            );
            let client = open_client()?;
            client.update_alarm_status(node_id, &measurement).await?;
            emit(&client.get_alarm_status(node_id).await?)
        }
        Command::SetExternal {
            node_id,
            status,
            set_by,
        } => {
            let external = ExternalAlarmStatus {
                status: AlarmStatusType::from(status),
                set_by,
            };
            let client = open_client()?;
            client.set_external_alarm_status(node_id, &external).await?;
            emit(&client.get_alarm_status(node_id).await?)
        }
        Command::DecodeEvent { event_type, file } => {
            let body =
                std::fs::read(&file).with_context(|| format!("read event {}", file.display()))?;
            emit(&PasEvent::decode(&event_type, &body)?)
        }
    }
}

/// Environment settings first, then the command line flags on top.
fn client_config<F>(
    stage: Option<&str>,
    base_url: Option<&str>,
    from_env: F,
) -> Result<PasClientConfig>
where
    F: FnOnce() -> Result<PasClientConfig, ConfigError>,
{
    let mut config = from_env()?;
    if let Some(stage) = stage {
        config = config.with_stage(stage)?;
    }
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    Ok(config)
}

fn connect(config: PasClientConfig, token: Option<String>) -> Result<PasClient> {
    let mut client = PasClient::new(config)?;
    match token {
        Some(token) => client = client.with_token_provider(Arc::new(StaticToken::new(token))),
        None => tracing::warn!("no ENLIGHT_TOKEN set, requests are sent unauthenticated"),
    }
    tracing::info!(base_url = client.base_url(), "pas client ready");
    Ok(client)
}

fn outer_high_patch(value: f64, expect: Option<f64>) -> Patch {
    const PATH: &str = "/overall/outerHigh";
    let mut patch = Patch::new();
    if let Some(expected) = expect {
        patch = patch.with(PatchOperation::test(PATH, json!(expected)));
    }
    patch.with(PatchOperation::replace(PATH, json!(value)))
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pas_client::models::PatchOp;
    use pas_client::stage_base_url;

    use super::*;

    #[test]
    fn flags_override_environment_settings() {
        let env = HashMap::from([
            ("PAS_STAGE", "staging"),
            ("PAS_TIMEOUT_MS", "2500"),
            ("PAS_REQUEST_ATTEMPTS", "3"),
        ]);
        let from_env =
            || PasClientConfig::from_lookup(|key| env.get(key).map(ToString::to_string));

        let config = client_config(None, None, from_env).expect("env config");
        assert_eq!(config.base_url, stage_base_url("staging"));
        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.request_attempts, 3);

        let config = client_config(Some("sandbox"), None, from_env).expect("stage flag");
        assert_eq!(config.base_url, stage_base_url("sandbox"));
        assert_eq!(config.timeout_ms, 2_500);

        let config = client_config(Some("sandbox"), Some("http://127.0.0.1:9000"), from_env)
            .expect("base url flag");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_attempts, 3);

        assert!(client_config(Some("a.b"), None, from_env).is_err());
    }

    #[test]
    fn outer_high_patch_tests_before_replacing() {
        let patch = outer_high_patch(11.0, None);
        assert_eq!(patch.operations().len(), 1);

        let patch = outer_high_patch(11.0, Some(9.5));
        let ops: Vec<_> = patch.operations().iter().map(|op| op.op).collect();
        assert_eq!(ops, vec![PatchOp::Test, PatchOp::Replace]);
        assert_eq!(patch.operations()[0].value, Some(json!(9.5)));
    }
}
