use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dispatcher::RequestDispatcher;
use crate::error::{QueryError, QueryResult};
use crate::gate::AuthorizationGate;
use crate::models::{
    CreateMemoryRequest, CreateMemoryResponse, NewJd, QueryRequestBody, QueryResponse,
    UploadJdRequest, UploadJdResponse,
};
use crate::pipeline::Pipeline;
use crate::store::{JdStore, MemoryRegistry};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "JD uploaded successfully";

/// Hex digits of the random suffix in generated memory ids
const MEMORY_ID_SUFFIX_LEN: usize = 12;

/// Entry point for the `/query` and `/memory` endpoints.
#[derive(Clone)]
pub struct QueryService {
    dispatcher: RequestDispatcher,
    gate: AuthorizationGate,
    registry: Arc<dyn MemoryRegistry>,
    jd_store: Arc<dyn JdStore>,
}

impl QueryService {
    pub fn new(
        pipeline: Arc<dyn Pipeline>,
        registry: Arc<dyn MemoryRegistry>,
        jd_store: Arc<dyn JdStore>,
    ) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(pipeline),
            gate: AuthorizationGate::new(registry.clone()),
            registry,
            jd_store,
        }
    }

    pub async fn query(&self, body: QueryRequestBody) -> QueryResult<QueryResponse> {
        self.dispatcher.dispatch(body).await
    }

    #[instrument(skip_all, fields(memory_id = %request.memory_id))]
    pub async fn upload_jd(&self, request: UploadJdRequest) -> QueryResult<UploadJdResponse> {
        self.gate.authorize_upload(&request).await?;

        let jd_id = self
            .jd_store
            .insert(NewJd {
                memory_id: request.memory_id,
                company: request.company,
                position: request.position,
                content: request.content,
            })
            .await
            .map_err(QueryError::UploadFailed)?;

        info!(%jd_id, "JD uploaded");

        Ok(UploadJdResponse {
            jd_id,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Register a new memory under `request.app` with a server-generated id.
    #[instrument(skip_all, fields(app = %request.app))]
    pub async fn create_memory(
        &self,
        request: CreateMemoryRequest,
    ) -> QueryResult<CreateMemoryResponse> {
        let app = request.app.trim();
        if app.is_empty() {
            return Err(QueryError::MissingField("app"));
        }

        let suffix = Uuid::new_v4().simple().to_string();
        let memory_id = format!("{app}_{}", &suffix[..MEMORY_ID_SUFFIX_LEN]);
        let params = request.params.unwrap_or_else(|| json!({}));

        self.registry
            .register(&memory_id, app, params)
            .await
            .map_err(QueryError::CreateFailed)?;

        info!(%memory_id, "Memory created");

        Ok(CreateMemoryResponse { memory_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pipeline::MockPipeline;
    use crate::store::{InMemoryJdStore, InMemoryMemoryRegistry, MockJdStore, MockMemoryRegistry};

    fn upload() -> UploadJdRequest {
        UploadJdRequest {
            mode: "interviewer".into(),
            memory_id: "mem-1".into(),
            company: "Acme".into(),
            position: "Backend Engineer".into(),
            content: "Rust, Postgres".into(),
        }
    }

    #[tokio::test]
    async fn test_upload_persists_jd() {
        let registry = Arc::new(InMemoryMemoryRegistry::new());
        registry
            .register("mem-1", "interviewer", json!({}))
            .await
            .unwrap();
        let store = Arc::new(InMemoryJdStore::new());

        let service = QueryService::new(Arc::new(MockPipeline::new()), registry, store.clone());
        let response = service.upload_jd(upload()).await.unwrap();

        assert_eq!(response.message, "JD uploaded successfully");
        let record = store.get(response.jd_id).await.unwrap().unwrap();
        assert_eq!(record.memory_id, "mem-1");
        assert_eq!(record.content, "Rust, Postgres");
    }

    #[tokio::test]
    async fn test_upload_insert_failure() {
        let registry = Arc::new(InMemoryMemoryRegistry::new());
        registry
            .register("mem-1", "interviewer", json!({}))
            .await
            .unwrap();

        let mut store = MockJdStore::new();
        store
            .expect_insert()
            .returning(|_| Err(StoreError::Internal("disk full".into())));

        let service = QueryService::new(Arc::new(MockPipeline::new()), registry, Arc::new(store));
        let err = service.upload_jd(upload()).await.unwrap_err();

        assert!(matches!(err, QueryError::UploadFailed(_)));
        assert_eq!(err.to_string(), "JD upload failed: disk full");
    }

    #[tokio::test]
    async fn test_denied_upload_never_inserts() {
        let mut store = MockJdStore::new();
        store.expect_insert().times(0);

        let service = QueryService::new(
            Arc::new(MockPipeline::new()),
            Arc::new(InMemoryMemoryRegistry::new()),
            Arc::new(store),
        );

        let err = service.upload_jd(upload()).await.unwrap_err();
        assert!(matches!(err, QueryError::MemoryNotFound(_)));
    }

    fn service_with(registry: Arc<dyn MemoryRegistry>) -> QueryService {
        QueryService::new(
            Arc::new(MockPipeline::new()),
            registry,
            Arc::new(InMemoryJdStore::new()),
        )
    }

    #[tokio::test]
    async fn test_create_memory_registers_generated_id() {
        let registry = Arc::new(InMemoryMemoryRegistry::new());
        let service = service_with(registry.clone());

        let response = service
            .create_memory(CreateMemoryRequest {
                app: "interviewer".into(),
                params: Some(json!({"language": "rust"})),
            })
            .await
            .unwrap();

        let suffix = response.memory_id.strip_prefix("interviewer_").unwrap();
        assert_eq!(suffix.len(), MEMORY_ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));

        let stored = registry.get(&response.memory_id).await.unwrap().unwrap();
        assert_eq!(stored.mode, "interviewer");
        assert_eq!(stored.params, json!({"language": "rust"}));

        // A freshly created interviewer memory can take JD uploads.
        let mut request = upload();
        request.memory_id = response.memory_id;
        service.upload_jd(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_memory_ids_are_unique_and_params_default_to_empty() {
        let registry = Arc::new(InMemoryMemoryRegistry::new());
        let service = service_with(registry.clone());
        let request = CreateMemoryRequest {
            app: "default".into(),
            params: None,
        };

        let first = service.create_memory(request.clone()).await.unwrap();
        let second = service.create_memory(request).await.unwrap();

        assert_ne!(first.memory_id, second.memory_id);
        let stored = registry.get(&first.memory_id).await.unwrap().unwrap();
        assert_eq!(stored.params, json!({}));
    }

    #[tokio::test]
    async fn test_create_memory_requires_app() {
        let mut registry = MockMemoryRegistry::new();
        registry.expect_register().times(0);

        let err = service_with(Arc::new(registry))
            .create_memory(CreateMemoryRequest {
                app: "  ".into(),
                params: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::MissingField("app")));
    }

    #[tokio::test]
    async fn test_create_memory_registry_failure() {
        let mut registry = MockMemoryRegistry::new();
        registry
            .expect_register()
            .returning(|_, _, _| Err(StoreError::Internal("connection reset".into())));

        let err = service_with(Arc::new(registry))
            .create_memory(CreateMemoryRequest {
                app: "interviewer".into(),
                params: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::CreateFailed(_)));
        assert_eq!(err.to_string(), "Memory creation failed: connection reset");
    }
}
