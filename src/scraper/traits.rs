use crate::model::FetchError;

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, slug: &str) -> Result<String, FetchError>;
}
