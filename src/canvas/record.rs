use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A named section of a structured canvas payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSection {
    pub title: String,
    pub content: Value,
}

/// Auxiliary record metadata. `alignment` and `entries` are always present
/// after normalization; any other caller-supplied keys ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasMeta {
    pub alignment: String,
    pub entries: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The persisted unit: one canvas snapshot.
///
/// `id` and `timestamp` are server-assigned at write time and never change
/// afterwards. `timestamp` is UTC ISO-8601 with a trailing `Z`, so
/// lexicographic order over the strings is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasRecord {
    pub id: String,
    pub timestamp: String,
    pub user: String,
    pub campaign: String,
    pub canvas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_sections: Option<Vec<CanvasSection>>,
    #[serde(default)]
    pub data: Value,
    pub meta: CanvasMeta,
}

/// Incoming `/save_canvas` payload. Client-supplied `id`/`timestamp` fields
/// are not modeled here and therefore ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SaveCanvasRequest {
    pub user: Option<String>,
    pub campaign: Option<String>,
    pub canvas: Option<String>,
    pub canvas_sections: Option<Vec<CanvasSection>>,
    #[serde(default)]
    pub data: Value,
    pub meta: Option<RequestMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestMeta {
    pub alignment: Option<String>,
    pub entries: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("payload must include a 'canvas' name or a 'canvas_sections' list")]
    MissingShape,
    #[error("'canvas_sections' must be a non-empty list")]
    EmptySections,
}

pub const DEFAULT_USER: &str = "Anonymous";
pub const DEFAULT_CAMPAIGN: &str = "Unknown Campaign";
pub const DEFAULT_CANVAS: &str = "Unnamed HUD";
pub const DEFAULT_ALIGNMENT: &str = "Unknown";

/// Current UTC time formatted the way the records are ordered:
/// ISO-8601, microsecond precision, trailing `Z`.
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

impl CanvasRecord {
    /// Normalize an incoming payload into a record with a fresh identity.
    pub fn from_request(request: SaveCanvasRequest) -> Result<Self, CanvasError> {
        Self::normalize(request, Uuid::new_v4().to_string(), utc_timestamp())
    }

    /// Deterministic normalization for a given id/timestamp pair.
    ///
    /// Caller-supplied `meta.alignment` and `meta.entries` win over the
    /// derived values; everything else follows the documented defaults.
    pub fn normalize(
        request: SaveCanvasRequest,
        id: String,
        timestamp: String,
    ) -> Result<Self, CanvasError> {
        match (&request.canvas, &request.canvas_sections) {
            (None, None) => return Err(CanvasError::MissingShape),
            (_, Some(sections)) if sections.is_empty() => return Err(CanvasError::EmptySections),
            _ => {}
        }

        let derived_entries = match &request.canvas_sections {
            Some(sections) => sections.len() as u64,
            None => 1,
        };

        let meta = request.meta.unwrap_or_default();
        let alignment = meta.alignment.unwrap_or_else(|| {
            request
                .data
                .get("alignment")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_ALIGNMENT)
                .to_string()
        });

        Ok(Self {
            id,
            timestamp,
            user: request.user.unwrap_or_else(|| DEFAULT_USER.to_string()),
            campaign: request.campaign.unwrap_or_else(|| DEFAULT_CAMPAIGN.to_string()),
            canvas: request.canvas.unwrap_or_else(|| DEFAULT_CANVAS.to_string()),
            canvas_sections: request.canvas_sections,
            data: request.data,
            meta: CanvasMeta {
                alignment,
                entries: meta.entries.unwrap_or(derived_entries),
                extra: meta.extra,
            },
        })
    }
}
