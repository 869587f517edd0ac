//! Curriculum document parsing structures

use serde::Deserialize;

use crate::error::{CoraError, Result};

/// Schema version accepted by the loader
pub const SCHEMA_VERSION: &str = "cora/curriculum@0.1";

/// Cluster assigned to topics that declare none
pub const DEFAULT_CLUSTER: &str = "Uncategorized";

/// Topic record parsed from YAML/JSON (raw, before defaulting)
///
/// Authoring tools are inconsistent about field names: some emit `id` instead
/// of `key` and `name` instead of `title`. The fallbacks are resolved here,
/// once, at parse time.
#[derive(Debug, Deserialize)]
struct TopicRecordRaw {
    #[serde(default, alias = "id")]
    key: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cluster: Option<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
}

/// A fully-resolved topic record: required key, defaulted optional fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cluster: String,
    pub prerequisites: Vec<String>,
}

impl TopicRecord {
    /// Record with the key doubling as title and no prerequisites
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            description: String::new(),
            cluster: DEFAULT_CLUSTER.to_string(),
            prerequisites: Vec::new(),
            key,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = cluster.into();
        self
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve a raw record; `None` when no identity key is present
    fn from_raw(raw: TopicRecordRaw) -> Option<Self> {
        let key = raw.key.filter(|k| !k.is_empty())?;
        let title = raw
            .title
            .or(raw.name)
            .unwrap_or_else(|| key.clone());
        Some(Self {
            title,
            description: raw.description.unwrap_or_default(),
            cluster: raw.cluster.unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            prerequisites: raw.prerequisites,
            key,
        })
    }
}

/// Curriculum document parsed from YAML/JSON (raw)
#[derive(Debug, Deserialize)]
struct CurriculumRaw {
    schema: String,
    #[serde(default)]
    topics: Vec<TopicRecordRaw>,
}

/// Curriculum document with resolved topic records
///
/// Records lacking an identity key are malformed external data: they are
/// dropped during deserialization and only counted, never an error.
#[derive(Debug)]
pub struct Curriculum {
    pub schema: String,
    pub topics: Vec<TopicRecord>,
    /// Number of records dropped for a missing key
    pub skipped: usize,
}

impl<'de> Deserialize<'de> for Curriculum {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = CurriculumRaw::deserialize(deserializer)?;
        let total = raw.topics.len();
        let topics: Vec<TopicRecord> = raw
            .topics
            .into_iter()
            .filter_map(TopicRecord::from_raw)
            .collect();
        Ok(Curriculum {
            schema: raw.schema,
            skipped: total - topics.len(),
            topics,
        })
    }
}

impl Curriculum {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let curriculum: Curriculum = serde_yaml::from_str(text)?;
        curriculum.check_schema()?;
        Ok(curriculum)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let curriculum: Curriculum = serde_json::from_str(text)?;
        curriculum.check_schema()?;
        Ok(curriculum)
    }

    fn check_schema(&self) -> Result<()> {
        if self.schema != SCHEMA_VERSION {
            return Err(CoraError::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema.clone(),
            });
        }
        Ok(())
    }
}
