use crate::model::FetchError;
use crate::scraper::traits::Fetcher;
use reqwest::Client;
use std::time::Duration;

const BASE_URL: &str = "https://www.globalpetrolprices.com";

pub struct FetcherImpl {
    pub client: Client,
}

impl FetcherImpl {
    pub fn new(timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) GasRadarBot/0.1")
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    fn build_url(&self, slug: &str) -> String {
        format!("{}/{}/", BASE_URL, slug)
    }
}

#[async_trait::async_trait]
impl Fetcher for FetcherImpl {
    async fn fetch(&self, slug: &str) -> Result<String, FetchError> {
        let url = self.build_url(slug);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::InvalidResponse(body));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_slug_verbatim() {
        let fetcher = FetcherImpl::new(10).unwrap();
        assert_eq!(
            fetcher.build_url("diesel_prices"),
            "https://www.globalpetrolprices.com/diesel_prices/"
        );
    }
}
