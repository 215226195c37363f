use crate::config::MainConfig;
use crate::error::RequestError;
use serde_json::Value;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, error};
use ureq::AgentBuilder;

pub const NWS_API_BASE: &str = "https://api.weather.gov";
pub const USER_AGENT: &str = "weather-app/1.0";
pub const ACCEPT: &str = "application/geo+json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl Client {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Client {
        Client {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &MainConfig) -> Client {
        Self::new(
            &config.base_url,
            &config.user_agent,
            Duration::from_secs(config.timeout),
        )
    }

    /// Perform one GET and decode the body as JSON.
    ///
    /// A fresh agent is built for every call and dropped when the call
    /// returns, so no connection outlives the request. The transfer itself
    /// runs on the blocking pool; the calling task only waits on its result.
    /// Redirects are not followed, so any status outside 2xx is an error.
    pub async fn fetch(&self, url: &str) -> Result<Value, RequestError> {
        debug!("Fetching {url}");
        let agent = AgentBuilder::new()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .redirects(0)
            .build();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            let response = agent.get(&url).set("Accept", ACCEPT).call()?;
            let code = response.status();
            debug!("{code} {url}");
            if !(200..300).contains(&code) {
                return Err(RequestError::HttpStatus { code });
            }

            let mut body = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut body)
                .map_err(|err| RequestError::Network(err.to_string()))?;
            serde_json::from_slice::<Value>(&body).map_err(|err| RequestError::Decode(err.to_string()))
        })
        .await
        .map_err(|err| RequestError::Network(format!("request task failed: {err}")))?
    }

    /// Like [`Client::fetch`] but every failure is logged and collapsed to `None`.
    pub async fn make_request(&self, url: &str) -> Option<Value> {
        match self.fetch(url).await {
            Ok(json) => Some(json),
            Err(err) => {
                error!("Error making request: {err}");
                None
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(NWS_API_BASE, USER_AGENT, DEFAULT_TIMEOUT)
    }
}
