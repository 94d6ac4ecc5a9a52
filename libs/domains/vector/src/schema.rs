//! Collection definitions owned by this service.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{VectorError, VectorResult};

/// Collection holding crawled and uploaded job descriptions for the interviewer mode.
pub const INTERVIEWER_JD_COLLECTION: &str = "InterviewerJDKnowledge";

/// Property types used by the JD collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Text,
    TextArray,
    Date,
}

impl DataType {
    /// Weaviate `dataType` identifier
    pub fn as_weaviate(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::TextArray => "text[]",
            DataType::Date => "date",
        }
    }
}

/// How the store obtains vectors for stored objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorMode {
    /// Vectors are computed by the ingestion job and sent with each object.
    SelfProvided,
    /// The store vectorizes objects with the named module.
    Vectorizer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub data_type: DataType,
    pub description: String,
}

impl PropertyDef {
    pub fn new(name: &str, data_type: DataType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub properties: Vec<PropertyDef>,
    pub vector_mode: VectorMode,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDef>, vector_mode: VectorMode) -> Self {
        Self {
            name: name.into(),
            properties,
            vector_mode,
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Rejects schemas the store would refuse or silently merge.
    pub fn validate(&self) -> VectorResult<()> {
        if self.name.trim().is_empty() {
            return Err(VectorError::InvalidSchema(
                "collection name must not be empty".to_string(),
            ));
        }

        if self.properties.is_empty() {
            return Err(VectorError::InvalidSchema(format!(
                "collection '{}' has no properties",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if property.name.trim().is_empty() {
                return Err(VectorError::InvalidSchema(format!(
                    "collection '{}' has a property with an empty name",
                    self.name
                )));
            }
            if !seen.insert(property.name.to_lowercase()) {
                return Err(VectorError::InvalidSchema(format!(
                    "duplicate property '{}' in collection '{}'",
                    property.name, self.name
                )));
            }
        }

        Ok(())
    }
}

/// The JD knowledge collection: 20 properties, vectors supplied by the ingestion job.
pub fn interviewer_jd_schema(name: impl Into<String>) -> CollectionSchema {
    use DataType::*;

    let properties = vec![
        PropertyDef::new("job_id", Text, "Unique job posting id"),
        PropertyDef::new("company", Text, "Company name"),
        PropertyDef::new("position", Text, "Position title"),
        PropertyDef::new("category", TextArray, "Job category tags"),
        PropertyDef::new("department", Text, "Department or business unit"),
        PropertyDef::new("product", Text, "Product line"),
        PropertyDef::new("location", TextArray, "Work locations"),
        PropertyDef::new("education", Text, "Education requirement"),
        PropertyDef::new("experience", Text, "Years of experience"),
        PropertyDef::new("requirements", Text, "Job requirements"),
        PropertyDef::new("description", Text, "Job description"),
        PropertyDef::new("content", Text, "Concatenated text that gets vectorized"),
        PropertyDef::new("hash", Text, "Content hash used for change detection"),
        PropertyDef::new("status", Text, "Posting status: active / expired"),
        PropertyDef::new("publishDate", Date, "Publish time"),
        PropertyDef::new("crawlerDate", Date, "Crawl time"),
        PropertyDef::new("vectorizedAt", Date, "Vectorization time"),
        PropertyDef::new("extra", Text, "Extension fields (JSON)"),
        PropertyDef::new("sourceBucket", Text, "Object-store source bucket"),
        PropertyDef::new("sourceKey", Text, "Object-store source key"),
    ];

    CollectionSchema::new(name, properties, VectorMode::SelfProvided)
}
