use async_trait::async_trait;

#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Returns the raw roster rows. The first row is a header.
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Vec<String>>>;
}
