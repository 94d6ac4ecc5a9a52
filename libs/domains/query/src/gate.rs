use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{QueryError, QueryResult};
use crate::models::{MemoryRegistration, UploadJdRequest, is_interviewer};
use crate::store::MemoryRegistry;

/// Decides whether a JD upload may proceed.
///
/// Both the request's mode and the registered mode of `memory_id` must be
/// `interviewer`.
#[derive(Clone)]
pub struct AuthorizationGate {
    registry: Arc<dyn MemoryRegistry>,
}

impl AuthorizationGate {
    pub fn new(registry: Arc<dyn MemoryRegistry>) -> Self {
        Self { registry }
    }

    pub async fn authorize_upload(
        &self,
        request: &UploadJdRequest,
    ) -> QueryResult<MemoryRegistration> {
        if !is_interviewer(&request.mode) {
            debug!(mode = %request.mode, "Upload rejected: request mode is not interviewer");
            return Err(QueryError::ForbiddenMode);
        }

        let registration = self
            .registry
            .get(&request.memory_id)
            .await
            .map_err(QueryError::Registry)?;

        match registration {
            Some(registration) if is_interviewer(&registration.mode) => Ok(registration),
            Some(registration) => {
                warn!(
                    memory_id = %request.memory_id,
                    registered_mode = %registration.mode,
                    "Upload rejected: memory registered under another mode"
                );
                Err(QueryError::MemoryNotFound(request.memory_id.clone()))
            }
            None => Err(QueryError::MemoryNotFound(request.memory_id.clone())),
        }
    }
}
