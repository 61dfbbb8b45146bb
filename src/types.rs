//! Shared data shapes for the dashboard.
//!
//! Wire field names on [`CallRecord`] (`id`, `filename`, `upload_timestamp`,
//! `transcript`, `analysis_json`, `tags`, `custom_tags`, `metadata_json`) are
//! a compatibility contract with the backend and must not be renamed without
//! a corresponding backend change.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One uploaded/processed call, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub upload_timestamp: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub analysis_json: CallAnalysis,
    /// System-generated labels. Backend-owned, read-only in this layer.
    #[serde(default)]
    pub tags: Vec<String>,
    /// User-supplied labels, mutated only through the tag editor's save path.
    #[serde(default)]
    pub custom_tags: Vec<String>,
    /// Open key/value bag; only `file_size_bytes` is consumed here.
    #[serde(default)]
    pub metadata_json: serde_json::Map<String, serde_json::Value>,
}

/// Structured analysis result. Every field is optional because analysis may
/// be incomplete or absent while the backend is still processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallAnalysis {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub speaker_roles: Option<Vec<String>>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub sentiment_label: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub key_insights: Option<Vec<String>>,
}

/// Aggregate view recomputed by the backend on each dashboard load.
///
/// The two maps are kept as raw JSON values: their iteration order is defined
/// by the backend (ranking is positional) and `serde_json`'s `preserve_order`
/// feature keeps it intact. The empty-database case may arrive as `[]` rather
/// than `{}` for `top_tags`, so the field cannot be a typed map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub avg_sentiment: f64,
    #[serde(default)]
    pub sentiment_distribution: serde_json::Value,
    #[serde(default)]
    pub top_tags: serde_json::Value,
}

/// Color class for sentiment badges and chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
}

impl SentimentTone {
    /// Tone from a numeric score: above 0.3 positive, below -0.3 negative.
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            SentimentTone::Positive
        } else if score < -0.3 {
            SentimentTone::Negative
        } else {
            SentimentTone::Neutral
        }
    }

    /// Tone from a categorical label. Anything other than the two known
    /// labels renders neutral.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Positive" => SentimentTone::Positive,
            "Negative" => SentimentTone::Negative,
            _ => SentimentTone::Neutral,
        }
    }
}

impl CallRecord {
    /// Sentiment score with the absent case treated as 0.
    pub fn sentiment_score(&self) -> f64 {
        self.analysis_json.sentiment_score.unwrap_or(0.0)
    }

    /// Badge color derived from the numeric score (card view).
    pub fn sentiment_tone(&self) -> SentimentTone {
        SentimentTone::from_score(self.sentiment_score())
    }

    /// Badge text, falling back to "Neutral" while analysis is pending.
    pub fn sentiment_label(&self) -> &str {
        self.analysis_json
            .sentiment_label
            .as_deref()
            .unwrap_or("Neutral")
    }

    /// Uploaded file size in bytes from `metadata_json.file_size_bytes`,
    /// 0 when the backend did not record one.
    pub fn file_size_bytes(&self) -> u64 {
        self.metadata_json
            .get("file_size_bytes")
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }

    /// File size rendered in megabytes with two decimals, e.g. "1.25".
    pub fn file_size_mb(&self) -> String {
        format!("{:.2}", self.file_size_bytes() as f64 / 1024.0 / 1024.0)
    }

    /// Compact timestamp for the call card, e.g. "Nov 21, 10:00 AM".
    pub fn card_date(&self) -> String {
        format_timestamp(&self.upload_timestamp, "%b %-d, %-I:%M %p")
    }

    /// Full timestamp for the detail header, e.g. "Nov 21, 2023 10:00 AM".
    pub fn detail_date(&self) -> String {
        format_timestamp(&self.upload_timestamp, "%b %-d, %Y %-I:%M %p")
    }

    /// Summary text, or the processing placeholder while analysis is absent.
    pub fn summary_or_placeholder(&self) -> &str {
        self.analysis_json
            .summary
            .as_deref()
            .unwrap_or("Processing summary...")
    }
}

/// Format an ISO-8601 timestamp with the given `chrono` pattern.
///
/// The backend emits naive ISO instants (no offset) but offset-carrying
/// strings are accepted too. Unparseable input falls back to the raw string
/// rather than failing the render.
fn format_timestamp(raw: &str, pattern: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(pattern).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(pattern).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from_json(json: &str) -> CallRecord {
        serde_json::from_str(json).expect("valid call record JSON")
    }

    #[test]
    fn test_deserialize_full_backend_payload() {
        let record = record_from_json(
            r#"{
                "id": 7,
                "filename": "call1.wav",
                "upload_timestamp": "2023-11-21T10:00:00",
                "transcript": "Agent: Hello...",
                "analysis_json": {
                    "summary": "User wants to upgrade.",
                    "speaker_roles": ["Agent", "Customer"],
                    "sentiment_score": 0.8,
                    "sentiment_label": "Positive",
                    "intent": "Upgrade Purchase",
                    "key_insights": ["Ready to buy"]
                },
                "tags": ["sales"],
                "custom_tags": ["urgent"],
                "metadata_json": {"file_size_bytes": 1310720, "local_path": "uploads/x.wav"}
            }"#,
        );
        assert_eq!(record.id, 7);
        assert_eq!(record.analysis_json.sentiment_score, Some(0.8));
        assert_eq!(record.file_size_bytes(), 1_310_720);
        assert_eq!(record.file_size_mb(), "1.25");
        assert_eq!(record.sentiment_tone(), SentimentTone::Positive);
        assert_eq!(record.card_date(), "Nov 21, 10:00 AM");
    }

    #[test]
    fn test_deserialize_partial_analysis() {
        // Freshly uploaded record: analysis still empty, no metadata yet.
        let record = record_from_json(
            r#"{"id": 1, "filename": "a.mp3", "upload_timestamp": "2024-01-02T08:30:00", "analysis_json": {}}"#,
        );
        assert!(record.analysis_json.summary.is_none());
        assert_eq!(record.sentiment_label(), "Neutral");
        assert_eq!(record.sentiment_score(), 0.0);
        assert_eq!(record.file_size_bytes(), 0);
        assert_eq!(record.summary_or_placeholder(), "Processing summary...");
        assert!(record.custom_tags.is_empty());
    }

    #[test]
    fn test_sentiment_tone_thresholds() {
        assert_eq!(SentimentTone::from_score(0.31), SentimentTone::Positive);
        assert_eq!(SentimentTone::from_score(0.3), SentimentTone::Neutral);
        assert_eq!(SentimentTone::from_score(-0.3), SentimentTone::Neutral);
        assert_eq!(SentimentTone::from_score(-0.31), SentimentTone::Negative);
    }

    #[test]
    fn test_sentiment_tone_from_label() {
        assert_eq!(SentimentTone::from_label("Positive"), SentimentTone::Positive);
        assert_eq!(SentimentTone::from_label("Negative"), SentimentTone::Negative);
        assert_eq!(SentimentTone::from_label("Mixed"), SentimentTone::Neutral);
    }

    #[test]
    fn test_unparseable_timestamp_falls_back_to_raw() {
        let record = record_from_json(
            r#"{"id": 1, "filename": "a.wav", "upload_timestamp": "yesterday"}"#,
        );
        assert_eq!(record.card_date(), "yesterday");
    }

    #[test]
    fn test_offset_timestamp_accepted() {
        let record = record_from_json(
            r#"{"id": 1, "filename": "a.wav", "upload_timestamp": "2023-11-21T10:00:00+00:00"}"#,
        );
        assert_eq!(record.detail_date(), "Nov 21, 2023 10:00 AM");
    }

    #[test]
    fn test_analytics_snapshot_empty_database_shape() {
        // The backend sends top_tags as [] (not {}) when no calls exist.
        let snapshot: AnalyticsSnapshot = serde_json::from_str(
            r#"{
                "total_calls": 0,
                "avg_sentiment": 0,
                "sentiment_distribution": {"Positive": 0, "Neutral": 0, "Negative": 0},
                "top_tags": []
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.total_calls, 0);
        assert!(snapshot.top_tags.is_array());
    }
}
