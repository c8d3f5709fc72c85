use artgira_core::{AutomationClient, Config, UiConfig, ValueBody};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::{error::ControlError, Result};

const UICONFIG_PATH: &str = "/api/uiconfig";
const VALUES_PATH: &str = "/api/values";

/// REST client for the automation server
pub struct RestClient {
    http: Client,
    base: Url,
    token: String,
    ui: OnceCell<UiConfig>,
}

impl RestClient {
    /// Build a client from the bridge config. Requests time out after
    /// `push_timeout_ms`.
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.server)
            .map_err(|e| ControlError::InvalidUrl(format!("{:?}: {}", config.server, e)))?;

        let http = Client::builder()
            .timeout(config.push_timeout())
            .danger_accept_invalid_certs(config.ignore_ssl)
            .build()?;

        Ok(Self {
            http,
            base,
            token: config.token.clone(),
            ui: OnceCell::new(),
        })
    }

    fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.set_query(None);
        url.query_pairs_mut().append_pair("token", &self.token);
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let resp = self.http.get(self.url(path)).send().await?;
        if !resp.status().is_success() {
            return Err(ControlError::ApiError {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }
        Ok(resp.json().await?)
    }

    async fn fetch_ui_config(&self) -> Result<UiConfig> {
        let ui = self
            .ui
            .get_or_try_init(|| self.fetch::<UiConfig>(UICONFIG_PATH))
            .await?;
        Ok(ui.clone())
    }

    async fn put_values(&self, values: &ValueBody) -> Result<()> {
        debug!("PUT {} ({} values)", VALUES_PATH, values.len());
        let resp = self
            .http
            .put(self.url(VALUES_PATH))
            .json(values)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ControlError::ApiError {
                status: resp.status().as_u16(),
                path: VALUES_PATH.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AutomationClient for RestClient {
    async fn ui_config(&self) -> artgira_core::Result<UiConfig> {
        Ok(self.fetch_ui_config().await?)
    }

    async fn get(&self, uid: &str) -> artgira_core::Result<ValueBody> {
        Ok(self.fetch(&format!("{}/{}", VALUES_PATH, uid)).await?)
    }

    async fn set(&self, values: &ValueBody) -> artgira_core::Result<()> {
        Ok(self.put_values(values).await?)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base", &self.base.as_str())
            .field("token", &"***REDACTED***")
            .finish()
    }
}
