use async_trait::async_trait;

use crate::domain::repositories::RosterSource;

/// Fixed roster for local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryRosterSource {
    rows: Vec<Vec<String>>,
}

impl InMemoryRosterSource {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RosterSource for InMemoryRosterSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }
}
