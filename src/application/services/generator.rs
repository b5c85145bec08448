use async_trait::async_trait;

#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Produces the reminder text for one recipient and one lead window.
    async fn generate(&self, name: &str, role: &str, window_label: &str) -> anyhow::Result<String>;
}
