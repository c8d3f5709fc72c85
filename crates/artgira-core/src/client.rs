//! Automation-system client seam

use async_trait::async_trait;
use std::sync::Arc;

use crate::uiconfig::UiConfig;
use crate::values::ValueBody;
use crate::Result;

/// What the bridge needs from the automation server
#[async_trait]
pub trait AutomationClient: Send + Sync {
    /// Fetch the function/data point list. Implementations may cache it.
    async fn ui_config(&self) -> Result<UiConfig>;

    /// Read the value(s) of one data point or function
    async fn get(&self, uid: &str) -> Result<ValueBody>;

    /// Write values. A failure says nothing about which values were applied.
    async fn set(&self, values: &ValueBody) -> Result<()>;
}

#[async_trait]
impl<C: AutomationClient + ?Sized> AutomationClient for Arc<C> {
    async fn ui_config(&self) -> Result<UiConfig> {
        (**self).ui_config().await
    }

    async fn get(&self, uid: &str) -> Result<ValueBody> {
        (**self).get(uid).await
    }

    async fn set(&self, values: &ValueBody) -> Result<()> {
        (**self).set(values).await
    }
}

#[async_trait]
impl<C: AutomationClient + ?Sized> AutomationClient for Box<C> {
    async fn ui_config(&self) -> Result<UiConfig> {
        (**self).ui_config().await
    }

    async fn get(&self, uid: &str) -> Result<ValueBody> {
        (**self).get(uid).await
    }

    async fn set(&self, values: &ValueBody) -> Result<()> {
        (**self).set(values).await
    }
}
