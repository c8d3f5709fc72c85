use artgira_core::{AutomationClient, UiConfig, Value, ValueBody};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

use crate::Result;

/// Offline stand-in for the automation server.
///
/// Serves a UI configuration loaded from disk and keeps the last value
/// written to each data point. With echo enabled every write is printed to
/// stdout as JSON.
pub struct FakeClient {
    ui: UiConfig,
    values: Mutex<HashMap<String, String>>,
    echo: bool,
}

impl FakeClient {
    pub fn new(ui: UiConfig) -> Self {
        Self {
            ui,
            values: Mutex::new(HashMap::new()),
            echo: false,
        }
    }

    /// Load the UI configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let ui: UiConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(Self::new(ui))
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Last value written to `uid`
    pub fn value(&self, uid: &str) -> Option<String> {
        self.values.lock().get(uid).cloned()
    }
}

#[async_trait]
impl AutomationClient for FakeClient {
    async fn ui_config(&self) -> artgira_core::Result<UiConfig> {
        Ok(self.ui.clone())
    }

    async fn get(&self, uid: &str) -> artgira_core::Result<ValueBody> {
        Ok(self
            .value(uid)
            .map(|value| Value::new(uid, value))
            .into_iter()
            .collect())
    }

    async fn set(&self, values: &ValueBody) -> artgira_core::Result<()> {
        if self.echo {
            println!("{}", serde_json::to_string_pretty(values)?);
        }
        let mut stored = self.values.lock();
        for v in &values.values {
            stored.insert(v.uid.clone(), v.value.clone());
        }
        Ok(())
    }
}
