//! Document Store Client - 调用托管文档数据库的 REST API
//!
//! 外部文档库 API:
//! GET    {base}/v1/databases/{db}/collections/{col}/documents?filter=field:value&limit=n
//! POST   {base}/v1/databases/{db}/collections/{col}/documents   {"documentId": "...", "data": {...}}
//! PATCH  {base}/v1/databases/{db}/collections/{col}/documents/{id}
//! DELETE {base}/v1/databases/{db}/collections/{col}/documents/{id}
//! 鉴权: X-Api-Key 请求头

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;

/// 文档库 API 错误
#[derive(Debug, Error)]
pub enum DocumentApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 文档库客户端配置
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// API Key（X-Api-Key 头）
    pub api_key: String,
    /// 数据库名
    pub database: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            api_key: String::new(),
            database: "inkdesk".to_string(),
            timeout_secs: 30,
        }
    }
}

impl DocumentStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<JsonValue>,
}

/// 文档库客户端
pub struct DocumentStoreClient {
    client: Client,
    config: DocumentStoreConfig,
}

impl DocumentStoreClient {
    pub fn new(config: DocumentStoreConfig) -> Result<Self, DocumentApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocumentApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/databases/{}/collections/{}/documents",
            self.config.base_url, self.config.database, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    fn map_send_error(e: reqwest::Error) -> DocumentApiError {
        if e.is_timeout() {
            DocumentApiError::Timeout
        } else if e.is_connect() {
            DocumentApiError::Network(format!("Cannot connect to document store: {}", e))
        } else {
            DocumentApiError::Network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DocumentApiError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocumentApiError::Service(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
        Ok(response)
    }

    /// 按条件列出文档
    pub async fn list_documents(
        &self,
        collection: &str,
        filters: &[(&str, String)],
        limit: Option<usize>,
    ) -> Result<Vec<JsonValue>, DocumentApiError> {
        let mut query: Vec<(String, String)> = filters
            .iter()
            .map(|(field, value)| ("filter".to_string(), format!("{}:{}", field, value)))
            .collect();
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }

        let response = self
            .client
            .get(self.collection_url(collection))
            .header("X-Api-Key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;
        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| DocumentApiError::InvalidResponse(e.to_string()))?;

        Ok(list.documents)
    }

    /// 按 ID 读取文档，不存在返回 None
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<JsonValue>, DocumentApiError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response).await?;
        let document = response
            .json()
            .await
            .map_err(|e| DocumentApiError::InvalidResponse(e.to_string()))?;

        Ok(Some(document))
    }

    /// 创建文档
    pub async fn create_document(
        &self,
        collection: &str,
        id: &str,
        data: &JsonValue,
    ) -> Result<(), DocumentApiError> {
        let body = serde_json::json!({
            "documentId": id,
            "data": data,
        });

        let response = self
            .client
            .post(self.collection_url(collection))
            .header("X-Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// 整体覆盖文档内容
    pub async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: &JsonValue,
    ) -> Result<(), DocumentApiError> {
        let body = serde_json::json!({ "data": data });

        let response = self
            .client
            .patch(self.document_url(collection, id))
            .header("X-Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// 删除文档
    pub async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), DocumentApiError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DocumentStoreConfig::default();
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.database, "inkdesk");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = DocumentStoreConfig::new("http://docs.example.com").with_timeout(10);
        assert_eq!(config.base_url, "http://docs.example.com");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_url_building() {
        let client = DocumentStoreClient::new(DocumentStoreConfig::default()).unwrap();
        assert_eq!(
            client.collection_url("projects"),
            "http://localhost:9090/v1/databases/inkdesk/collections/projects/documents"
        );
        assert_eq!(
            client.document_url("chapters", "abc"),
            "http://localhost:9090/v1/databases/inkdesk/collections/chapters/documents/abc"
        );
    }
}
