//! Builds the channel table from the automation UI configuration

use tracing::{error, info};

use crate::channels::{ChannelTable, Fixture};
use crate::config::Config;
use crate::uiconfig::{ChannelType, UiConfig};
use crate::{error::CoreError, Result};

/// Inputs of [`build_channel_table`] taken from the bridge config
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Function allow-list; empty accepts every function
    pub uids: Vec<String>,
    pub auto_on_off: bool,
}

impl BuildOptions {
    /// Whether function `uid` passes the allow-list
    pub fn accepts(&self, uid: &str) -> bool {
        self.uids.is_empty() || self.uids.iter().any(|u| u == uid)
    }
}

impl From<&Config> for BuildOptions {
    fn from(config: &Config) -> Self {
        Self {
            uids: config.uids.clone(),
            auto_on_off: config.auto_on_off,
        }
    }
}

/// Channel table plus the fixtures mapped into it
#[derive(Debug, Clone)]
pub struct ChannelLayout {
    pub table: ChannelTable,
    /// Sorted by function identifier
    pub fixtures: Vec<Fixture>,
}

/// Map every accepted function of `ui` onto the universe.
///
/// Scene controls are skipped. Any channel type the bridge does not know
/// aborts the build; no partial table is returned.
pub fn build_channel_table(ui: &UiConfig, options: &BuildOptions) -> Result<ChannelLayout> {
    let mut table = ChannelTable::new(options.auto_on_off);
    let mut fixtures = Vec::new();

    for function in &ui.functions {
        if !options.accepts(&function.uid) {
            info!("skipping {:?} ({})", function.display_name, function.uid);
            continue;
        }

        match &function.channel_type {
            ChannelType::Dimmer | ChannelType::DimmerRgbw | ChannelType::Switch => {
                fixtures.push(table.add_function(function)?);
            }
            ChannelType::SceneControl => {
                info!("skipping scene {}", function.display_name);
            }
            ChannelType::Unsupported(channel_type) => {
                match serde_json::to_string_pretty(function) {
                    Ok(json) => error!("unsupported function:\n{}", json),
                    Err(_) => error!("unsupported function {}", function.uid),
                }
                return Err(CoreError::UnsupportedChannelType {
                    channel_type: channel_type.clone(),
                    function_uid: function.uid.clone(),
                });
            }
        }
    }

    fixtures.sort_by(|a, b| a.uid.cmp(&b.uid));

    Ok(ChannelLayout { table, fixtures })
}
