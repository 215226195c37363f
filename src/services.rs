use crate::alert::{format_alert, AlertFeature};
use crate::client::Client;
use crate::config::ErrorReporting;
use serde_json::Value;
use tracing::{debug, error, info};

pub const UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const SEPARATOR: &str = "\n========================\n";

pub fn alerts_url(base: &str, state: &str) -> String {
    format!("{}/alerts/active/area/{state}", base.trim_end_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertsOutcome {
    /// No document, no `features` key, or a `features` value that is
    /// neither a list nor empty.
    Unavailable,
    NoActiveAlerts,
    Alerts(Vec<AlertFeature>),
}

impl AlertsOutcome {
    pub fn classify(data: Option<&Value>) -> AlertsOutcome {
        let Some(features) = data.and_then(|d| d.get("features")) else {
            return AlertsOutcome::Unavailable;
        };
        if is_empty(features) {
            return AlertsOutcome::NoActiveAlerts;
        }
        match features {
            Value::Array(features) => {
                AlertsOutcome::Alerts(features.iter().map(AlertFeature::from_value).collect())
            }
            _ => AlertsOutcome::Unavailable,
        }
    }

    pub fn render(&self) -> String {
        match self {
            AlertsOutcome::Unavailable => UNAVAILABLE.to_string(),
            AlertsOutcome::NoActiveAlerts => NO_ACTIVE_ALERTS.to_string(),
            AlertsOutcome::Alerts(features) => features
                .iter()
                .map(format_alert)
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        }
    }
}

// null, false, 0, "", [] and {} all mean there is nothing to show.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Fetch and format the active alerts for a region code. Always returns text.
pub async fn get_alerts(client: &Client, state: &str) -> String {
    get_alerts_with(client, state, ErrorReporting::Collapsed).await
}

pub async fn get_alerts_with(client: &Client, state: &str, reporting: ErrorReporting) -> String {
    let url = alerts_url(&client.base_url, state);
    info!("Fetching alerts for {state}");

    let data = match reporting {
        ErrorReporting::Collapsed => client.make_request(&url).await,
        ErrorReporting::Detailed => match client.fetch(&url).await {
            Ok(json) => Some(json),
            Err(err) => {
                error!("Error making request: {err}");
                return format!("Unable to fetch alerts: {err}");
            }
        },
    };

    let outcome = AlertsOutcome::classify(data.as_ref());
    if let AlertsOutcome::Alerts(features) = &outcome {
        debug!("{} active alerts for {state}", features.len());
    }
    outcome.render()
}
