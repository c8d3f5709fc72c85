//! Automation-system UI configuration
//!
//! The UI configuration lists every function (dimmer, switch, ...) the
//! automation server exposes, together with the data points each function
//! is made of.

use serde::{Deserialize, Serialize};

/// UI configuration as served by the automation server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub functions: Vec<Function>,
}

/// A logical device function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub uid: String,
    pub channel_type: ChannelType,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub function_type: String,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}

/// A named, addressable value of a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub uid: String,
}

/// Channel type of a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    /// `de.gira.schema.channels.KNX.Dimmer`
    Dimmer,
    /// `de.gira.schema.channels.DimmerRGBW`
    DimmerRgbw,
    /// `de.gira.schema.channels.Switch`
    Switch,
    /// `de.gira.schema.channels.SceneControl`
    SceneControl,
    /// Anything else, kept verbatim for diagnostics
    Unsupported(String),
}

impl ChannelType {
    pub const DIMMER: &'static str = "de.gira.schema.channels.KNX.Dimmer";
    pub const DIMMER_RGBW: &'static str = "de.gira.schema.channels.DimmerRGBW";
    pub const SWITCH: &'static str = "de.gira.schema.channels.Switch";
    pub const SCENE_CONTROL: &'static str = "de.gira.schema.channels.SceneControl";

    /// Schema identifier of this channel type
    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::Dimmer => Self::DIMMER,
            ChannelType::DimmerRgbw => Self::DIMMER_RGBW,
            ChannelType::Switch => Self::SWITCH,
            ChannelType::SceneControl => Self::SCENE_CONTROL,
            ChannelType::Unsupported(s) => s,
        }
    }
}

impl From<String> for ChannelType {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::DIMMER => ChannelType::Dimmer,
            Self::DIMMER_RGBW => ChannelType::DimmerRgbw,
            Self::SWITCH => ChannelType::Switch,
            Self::SCENE_CONTROL => ChannelType::SceneControl,
            _ => ChannelType::Unsupported(s),
        }
    }
}

impl From<ChannelType> for String {
    fn from(t: ChannelType) -> Self {
        match t {
            ChannelType::Unsupported(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UiConfig {
    /// Look up a function by identifier
    pub fn find(&self, uid: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.uid == uid)
    }
}
