use async_trait::async_trait;

use crate::domain::value_objects::NormalizedAddress;

#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send(&self, to: &NormalizedAddress, from: &str, body: &str) -> anyhow::Result<()>;
}
