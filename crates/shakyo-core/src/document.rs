//! Persisted note document record.

use crate::stroke::{Stroke, StrokeSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored note as kept in the document store.
///
/// Field names follow the web app's `documents` records so existing entries
/// load as-is; records written before strokes were stored have no `strokes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDocument {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stroke_count: usize,
    pub group_id: String,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl NoteDocument {
    /// Create a new record with a fresh id, stamped now.
    pub fn new(title: impl Into<String>, group_id: impl Into<String>, strokes: &StrokeSet) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, group_id, strokes)
    }

    /// Create a new record under a caller-chosen id, stamped now.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        group_id: impl Into<String>,
        strokes: &StrokeSet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            stroke_count: strokes.len(),
            group_id: group_id.into(),
            strokes: strokes.as_slice().to_vec(),
        }
    }

    /// Replace title and strokes, refreshing `updatedAt` and `strokeCount`.
    /// `id`, `createdAt` and `groupId` are kept.
    pub fn update(&mut self, title: impl Into<String>, strokes: &StrokeSet) {
        self.title = title.into();
        self.strokes = strokes.as_slice().to_vec();
        self.stroke_count = self.strokes.len();
        self.updated_at = Utc::now();
    }

    /// Strokes as a sanitized collection.
    pub fn stroke_set(&self) -> StrokeSet {
        StrokeSet::from_strokes(self.strokes.iter().cloned())
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use kurbo::Point;

    fn strokes() -> StrokeSet {
        let stroke = Stroke::begin(Point::new(1.0, 1.0), HexColor::RED, 4.0, false)
            .with_point(Point::new(2.0, 3.0));
        StrokeSet::from_strokes(vec![stroke])
    }

    #[test]
    fn test_new_document_metadata() {
        let doc = NoteDocument::new("Notes", "1-3", &strokes());
        assert_eq!(doc.stroke_count, 1);
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.group_id, "1-3");
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut doc = NoteDocument::new("Old", "1-1", &StrokeSet::new());
        let id = doc.id.clone();
        let created = doc.created_at;

        doc.update("New", &strokes());

        assert_eq!(doc.id, id);
        assert_eq!(doc.created_at, created);
        assert_eq!(doc.group_id, "1-1");
        assert_eq!(doc.title, "New");
        assert_eq!(doc.stroke_count, 1);
        assert!(doc.updated_at >= created);
    }

    #[test]
    fn test_loads_web_record_without_strokes() {
        let json = r#"{
            "id": "1",
            "title": "会議メモ - 2024年1月15日",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T11:45:00.000Z",
            "strokeCount": 156,
            "groupId": "1-2"
        }"#;
        let doc = NoteDocument::from_json(json).unwrap();
        assert_eq!(doc.stroke_count, 156);
        assert!(doc.strokes.is_empty());
        assert_eq!(doc.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_loads_web_record_with_strokes() {
        let json = r##"{
            "id": "1705312200000",
            "title": "Shakyo",
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-15T10:30:00.000Z",
            "strokeCount": 1,
            "groupId": "1-2",
            "strokes": [{
                "id": "1705312199000",
                "points": [{"x": 10, "y": 10}, {"x": 20, "y": 10}],
                "color": "#000000",
                "width": 2,
                "isHighlighter": false
            }]
        }"##;
        let doc = NoteDocument::from_json(json).unwrap();
        let set = doc.stroke_set();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().points[1], Point::new(20.0, 10.0));
        assert_eq!(set.get(0).unwrap().id.as_str(), "1705312199000");
    }

    #[test]
    fn test_timestamps_serialize_as_iso8601() {
        let doc = NoteDocument::new("Notes", "1-2", &StrokeSet::new());
        let value = serde_json::to_value(&doc).unwrap();
        let created = value["createdAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created).is_ok());
        assert!(value.get("strokeCount").is_some());
        assert!(value.get("groupId").is_some());
    }
}
