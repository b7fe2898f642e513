use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single entry in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Per-user details folded into the base prompt section.
///
/// Preferences use a `BTreeMap` so their rendered order is deterministic;
/// the composed prompt must be a pure function of its inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

/// Optional task details rendered into the role and task prompt sections.
///
/// Every field is optional; empty fields are omitted from the composed
/// prompt entirely, so no dangling section headers appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskContext {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub current_state: Option<String>,
    #[serde(default)]
    pub desired_outcome: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub priority_focus: Option<String>,
}

/// The content collection a search runs against.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Project,
    Service,
    Message,
    #[default]
    All,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Project => "project",
            ContentType::Service => "service",
            ContentType::Message => "message",
            ContentType::All => "all",
        }
    }

    /// Parses a user-supplied type tag. Accepts the plural form as well,
    /// since the admin UI historically sent both.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "blog" | "blogs" => Some(ContentType::Blog),
            "project" | "projects" => Some(ContentType::Project),
            "service" | "services" => Some(ContentType::Service),
            "message" | "messages" | "contact" | "contacts" => Some(ContentType::Message),
            "all" => Some(ContentType::All),
            _ => None,
        }
    }

    /// The canonical collection a result of this type resolves to.
    /// `All` is a fan-out marker, not a collection, so it has none.
    pub fn result_type(&self) -> Option<ResultType> {
        match self {
            ContentType::Blog => Some(ResultType::Blog),
            ContentType::Project => Some(ResultType::Project),
            ContentType::Service => Some(ResultType::Service),
            ContentType::Message => Some(ResultType::Contact),
            ContentType::All => None,
        }
    }
}

/// The canonical collection name a stored search result points into.
///
/// Always serialized in the capitalized singular form; deserialization
/// accepts lowercase and plural variants (older persisted records carry
/// them) and normalizes to these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Blog,
    Project,
    Service,
    Contact,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Blog => "Blog",
            ResultType::Project => "Project",
            ResultType::Service => "Service",
            ResultType::Contact => "Contact",
        }
    }

    /// Normalizes a lowercase and/or plural variant to the canonical form.
    pub fn normalize(input: &str) -> Option<Self> {
        let lowered = input.trim().to_lowercase();
        match lowered.trim_end_matches('s') {
            "blog" => Some(ResultType::Blog),
            "project" => Some(ResultType::Project),
            "service" => Some(ResultType::Service),
            "contact" | "message" => Some(ResultType::Contact),
            _ => None,
        }
    }
}

impl Serialize for ResultType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResultType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).ok_or_else(|| {
            de::Error::unknown_variant(&raw, &["Blog", "Project", "Service", "Contact"])
        })
    }
}

/// A scored document returned from a collection search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(rename = "model_type")]
    pub result_type: ResultType,
    pub score: f64,
    pub created_at: String,
    /// Documents do not carry their own embeddings in this design; scoring
    /// falls back to the query embedding when this is `None`.
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
}

/// One ranked entry inside a persisted [`SearchRecord`].
///
/// The title is denormalized at write time so recent-search reads do not
/// need to resolve references back into the content collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedResult {
    pub item_id: i64,
    pub result_type: ResultType,
    pub score: f64,
    pub title: String,
}

/// A persisted log entry capturing one search invocation. Created once per
/// search and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: String,
    pub content_type: ContentType,
    /// Present only when the pseudo-embedding call succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub results: Vec<RecordedResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-collection result lists for the all-types search path.
#[derive(Debug, Default, Serialize)]
pub struct GroupedResults {
    pub blog: Vec<SearchResult>,
    pub project: Vec<SearchResult>,
    pub service: Vec<SearchResult>,
    pub message: Vec<SearchResult>,
}

/// The payload of a search response: a grouped view for the all-types path,
/// or a flat scored list when one collection was requested.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchData {
    Grouped {
        grouped: GroupedResults,
        items: Vec<SearchResult>,
    },
    Flat(Vec<SearchResult>),
}
