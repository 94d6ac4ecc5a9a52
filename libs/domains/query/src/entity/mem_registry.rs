use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::MemoryRegistration;

/// Sea-ORM entity for the `mem_registry` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mem_registry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub memory_id: String,
    /// Mode the memory was created for
    pub app: String,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub params_json: Json,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MemoryRegistration {
    fn from(model: Model) -> Self {
        Self {
            memory_id: model.memory_id,
            mode: model.app,
            params: model.params_json,
        }
    }
}
