//! Aggregate analytics fetch.

use crate::types::AnalyticsSnapshot;

use super::{read_json, ApiClient, ApiError};

impl ApiClient {
    /// Fetch the aggregate snapshot computed across all call records.
    ///
    /// Propagates failures; the dashboard omits the analytics section rather
    /// than rendering a broken partial chart.
    pub async fn get_analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        let response = self.http().get(self.url("/analytics")).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_analytics_propagates_network_failure() {
        let client = ApiClient::new("http://127.0.0.1:9");
        assert!(client.get_analytics().await.is_err());
    }
}
