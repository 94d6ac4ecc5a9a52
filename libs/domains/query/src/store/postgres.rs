use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use serde_json::Value;
use uuid::Uuid;

use super::{JdStore, MemoryRegistry};
use crate::entity::{mem_registry, uploaded_jd};
use crate::error::{StoreError, StoreResult};
use crate::models::{JdRecord, MemoryRegistration, NewJd};

pub struct PgMemoryRegistry {
    db: DatabaseConnection,
}

impl PgMemoryRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemoryRegistry for PgMemoryRegistry {
    async fn get(&self, memory_id: &str) -> StoreResult<Option<MemoryRegistration>> {
        let model = mem_registry::Entity::find_by_id(memory_id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn register(
        &self,
        memory_id: &str,
        mode: &str,
        params: Value,
    ) -> StoreResult<MemoryRegistration> {
        let now = Utc::now().fixed_offset();
        let active_model = mem_registry::ActiveModel {
            memory_id: Set(memory_id.to_string()),
            app: Set(mode.to_string()),
            name: Set(None),
            owner: Set(None),
            params_json: Set(params.clone()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        mem_registry::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(mem_registry::Column::MemoryId)
                    .update_columns([
                        mem_registry::Column::App,
                        mem_registry::Column::ParamsJson,
                        mem_registry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        tracing::info!(memory_id, mode, "Registered memory");
        Ok(MemoryRegistration {
            memory_id: memory_id.to_string(),
            mode: mode.to_string(),
            params,
        })
    }
}

pub struct PgJdStore {
    db: DatabaseConnection,
}

impl PgJdStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JdStore for PgJdStore {
    async fn insert(&self, jd: NewJd) -> StoreResult<Uuid> {
        let jd_id = Uuid::now_v7();
        let model = uploaded_jd::ActiveModel::from_new(jd_id, jd)
            .insert(&self.db)
            .await?;

        if model.jd_id != jd_id {
            return Err(StoreError::Internal(format!(
                "Inserted JD id mismatch: expected {}, got {}",
                jd_id, model.jd_id
            )));
        }

        tracing::info!(jd_id = %jd_id, memory_id = %model.memory_id, "Stored uploaded JD");
        Ok(jd_id)
    }

    async fn get(&self, jd_id: Uuid) -> StoreResult<Option<JdRecord>> {
        let model = uploaded_jd::Entity::find_by_id(jd_id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }
}
