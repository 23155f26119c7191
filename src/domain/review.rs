// ============================================================
// Layer 3 — ReviewRecord Domain Type
// ============================================================
// One line of an Amazon-format review file, e.g.
//
//   {"asin":"A1","reviewerID":"U1","reviewText":"good item","summary":"nice"}
//
// Only the four keys below are read. Anything else on the
// line (ratings, timestamps, helpfulness votes) is ignored
// by serde because the struct does not deny unknown fields.
//
// Reference: serde documentation (field attributes)

use serde::{Deserialize, Serialize};

/// A raw review record before tokenisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Product identifier
    pub asin: String,

    /// Reviewer identifier
    #[serde(rename = "reviewerID")]
    pub reviewer_id: String,

    /// Full review body
    #[serde(rename = "reviewText")]
    pub review_text: String,

    /// Short summary ("tip") written by the reviewer
    pub summary: String,
}

impl ReviewRecord {
    pub fn new(
        asin:        impl Into<String>,
        reviewer_id: impl Into<String>,
        review_text: impl Into<String>,
        summary:     impl Into<String>,
    ) -> Self {
        Self {
            asin:        asin.into(),
            reviewer_id: reviewer_id.into(),
            review_text: review_text.into(),
            summary:     summary.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_amazon_keys() {
        let line = r#"{"asin":"A1","reviewerID":"U1","reviewText":"good item","summary":"nice"}"#;
        let rec: ReviewRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec, ReviewRecord::new("A1", "U1", "good item", "nice"));
    }

    #[test]
    fn test_ignores_extra_keys() {
        let line = r#"{"asin":"A1","reviewerID":"U1","overall":5.0,"reviewText":"ok","summary":"s","unixReviewTime":1}"#;
        let rec: ReviewRecord = serde_json::from_str(line).unwrap();
        assert_eq!(rec.review_text, "ok");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let line = r#"{"asin":"A1","reviewerID":"U1","reviewText":"no summary"}"#;
        assert!(serde_json::from_str::<ReviewRecord>(line).is_err());
    }

    #[test]
    fn test_serialises_with_amazon_key_names() {
        let json = serde_json::to_string(&ReviewRecord::new("A", "U", "t", "s")).unwrap();
        assert!(json.contains("\"reviewerID\":\"U\""));
        assert!(json.contains("\"reviewText\":\"t\""));
    }
}
