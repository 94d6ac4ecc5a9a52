use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{JdRecord, NewJd};

/// Sea-ORM entity for the `uploaded_jd` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "uploaded_jd")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub jd_id: Uuid,
    pub memory_id: String,
    pub company: String,
    pub position: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JdRecord {
    fn from(model: Model) -> Self {
        Self {
            jd_id: model.jd_id,
            memory_id: model.memory_id,
            company: model.company,
            position: model.position,
            content: model.content,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl ActiveModel {
    pub fn from_new(jd_id: Uuid, jd: NewJd) -> Self {
        Self {
            jd_id: Set(jd_id),
            memory_id: Set(jd.memory_id),
            company: Set(jd.company),
            position: Set(jd.position),
            content: Set(jd.content),
            created_at: Set(chrono::Utc::now().fixed_offset()),
        }
    }
}
