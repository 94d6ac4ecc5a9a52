use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::WeaviateConfig;
use crate::error::{VectorError, VectorResult};
use crate::repository::SchemaRepository;
use crate::schema::{CollectionSchema, VectorMode};

/// Weaviate-backed SchemaRepository over the `/v1/schema` REST API
#[derive(Clone)]
pub struct WeaviateRepository {
    client: Client,
    config: WeaviateConfig,
}

impl WeaviateRepository {
    pub fn new(config: WeaviateConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WeaviateConfig {
        &self.config
    }

    /// `/v1/.well-known/ready`; any transport error or non-2xx counts as not ready.
    pub async fn is_ready(&self) -> bool {
        match self
            .authorized(self.client.get(self.url("/v1/.well-known/ready")))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Weaviate readiness probe failed");
                false
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SchemaListing {
    #[serde(default)]
    classes: Option<Vec<ClassSummary>>,
}

#[derive(Debug, Deserialize)]
struct ClassSummary {
    class: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassDefinition<'a> {
    class: &'a str,
    vectorizer: &'a str,
    properties: Vec<PropertyDefinition<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDefinition<'a> {
    name: &'a str,
    data_type: [&'static str; 1],
    description: &'a str,
}

impl<'a> From<&'a CollectionSchema> for ClassDefinition<'a> {
    fn from(schema: &'a CollectionSchema) -> Self {
        let vectorizer = match &schema.vector_mode {
            VectorMode::SelfProvided => "none",
            VectorMode::Vectorizer(module) => module.as_str(),
        };

        Self {
            class: &schema.name,
            vectorizer,
            properties: schema
                .properties
                .iter()
                .map(|p| PropertyDefinition {
                    name: &p.name,
                    data_type: [p.data_type.as_weaviate()],
                    description: &p.description,
                })
                .collect(),
        }
    }
}

async fn api_error(response: reqwest::Response) -> VectorError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    VectorError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl SchemaRepository for WeaviateRepository {
    async fn list_collections(&self) -> VectorResult<HashSet<String>> {
        let response = self
            .authorized(self.client.get(self.url("/v1/schema")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let listing: SchemaListing = response.json().await?;

        Ok(listing
            .classes
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.class)
            .collect())
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> VectorResult<()> {
        let body = ClassDefinition::from(schema);

        let response = self
            .authorized(self.client.post(self.url("/v1/schema")))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let message = response.text().await.unwrap_or_default();
                Err(VectorError::CreateFailed {
                    collection: schema.name.clone(),
                    message,
                })
            }
            _ => Err(api_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{INTERVIEWER_JD_COLLECTION, interviewer_jd_schema};

    #[test]
    fn test_class_definition_payload() {
        let schema = interviewer_jd_schema(INTERVIEWER_JD_COLLECTION);
        let body = serde_json::to_value(ClassDefinition::from(&schema)).unwrap();

        assert_eq!(body["class"], "InterviewerJDKnowledge");
        assert_eq!(body["vectorizer"], "none");

        let properties = body["properties"].as_array().unwrap();
        assert_eq!(properties.len(), 20);
        assert_eq!(properties[0]["name"], "job_id");
        assert_eq!(properties[0]["dataType"], serde_json::json!(["text"]));
        assert_eq!(properties[3]["dataType"], serde_json::json!(["text[]"]));
        assert_eq!(properties[14]["name"], "publishDate");
        assert_eq!(properties[14]["dataType"], serde_json::json!(["date"]));
    }

    #[test]
    fn test_schema_listing_tolerates_null_classes() {
        let listing: SchemaListing = serde_json::from_str(r#"{"classes": null}"#).unwrap();
        assert!(listing.classes.is_none());

        let listing: SchemaListing = serde_json::from_str("{}").unwrap();
        assert!(listing.classes.is_none());

        let listing: SchemaListing =
            serde_json::from_str(r#"{"classes": [{"class": "A", "properties": []}]}"#).unwrap();
        assert_eq!(listing.classes.unwrap()[0].class, "A");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        // Port 9 (discard) is closed on CI hosts
        let repo = WeaviateRepository::new(
            WeaviateConfig::new("127.0.0.1", 9).with_timeout(2),
        )
        .unwrap();

        let err = repo.list_collections().await.unwrap_err();
        assert!(matches!(err, VectorError::Unavailable(_)));
        assert!(!repo.is_ready().await);
    }
}
