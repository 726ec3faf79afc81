use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fields submitted when creating a case.
///
/// Unset fields are left out of the payload entirely. The server decides
/// which fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maker_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Fields the application accepts beyond the ones above, sent as given.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Fields submitted when attaching a request to a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Server-assigned case identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawCaseId")]
pub struct CaseId(String);

// Some deployments hand back integer primary keys instead of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCaseId {
    Text(String),
    Number(i64),
}

impl From<RawCaseId> for CaseId {
    fn from(raw: RawCaseId) -> Self {
        match raw {
            RawCaseId::Text(s) => CaseId(s),
            RawCaseId::Number(n) => CaseId(n.to_string()),
        }
    }
}

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        CaseId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CaseId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Response body of `POST /api/cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseCreated {
    pub case_id: CaseId,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Response body of `POST /api/cases/bulk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkCreated {
    #[serde(default)]
    pub case_ids: Vec<CaseId>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Serialize)]
pub(crate) struct BulkPayload<'a> {
    pub cases: &'a [CaseRecord],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_from_string() {
        let created: CaseCreated = serde_json::from_str(r#"{"case_id": "C-100"}"#).unwrap();
        assert_eq!(created.case_id, "C-100");
    }

    #[test]
    fn test_case_id_from_integer() {
        let created: CaseCreated = serde_json::from_str(r#"{"case_id": 42}"#).unwrap();
        assert_eq!(created.case_id.as_str(), "42");
    }

    #[test]
    fn test_case_created_keeps_extra_fields() {
        let created: CaseCreated =
            serde_json::from_str(r#"{"case_id": "C-1", "message": "ok"}"#).unwrap();
        assert_eq!(created.extra["message"], "ok");
    }

    #[test]
    fn test_case_created_requires_case_id() {
        let result = serde_json::from_str::<CaseCreated>(r#"{"id": "C-1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_created_defaults_to_no_ids() {
        let bulk: BulkCreated = serde_json::from_str(r#"{"created": 0}"#).unwrap();
        assert!(bulk.case_ids.is_empty());
    }

    #[test]
    fn test_bulk_created_mixed_ids() {
        let bulk: BulkCreated = serde_json::from_str(r#"{"case_ids": ["C-1", 2]}"#).unwrap();
        assert_eq!(bulk.case_ids, vec![CaseId::new("C-1"), CaseId::new("2")]);
    }

    #[test]
    fn test_case_record_skips_unset_fields() {
        let record = CaseRecord {
            issue_type: Some("Technical".to_string()),
            checker_comments: Some(String::new()),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 9),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["issue_type"], "Technical");
        assert_eq!(obj["checker_comments"], "");
        assert_eq!(obj["due_date"], "2025-03-09");
    }

    #[test]
    fn test_case_record_keeps_unknown_fields() {
        let record: CaseRecord = serde_json::from_str(
            r#"{"issue_type": "X", "status": "New", "assigned_team": "ops", "score": 3}"#,
        )
        .unwrap();
        assert_eq!(record.issue_type.as_deref(), Some("X"));
        assert_eq!(record.case_status, None);
        assert_eq!(record.extra["status"], "New");
        assert_eq!(record.extra["assigned_team"], "ops");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"issue_type": "X", "status": "New", "assigned_team": "ops", "score": 3})
        );
    }

    #[test]
    fn test_request_record_keeps_unknown_fields() {
        let record: RequestRecord =
            serde_json::from_str(r#"{"notes": "n", "escalation": "tier2"}"#).unwrap();
        assert_eq!(record.notes.as_deref(), Some("n"));
        assert_eq!(record.extra["escalation"], "tier2");
        assert_eq!(serde_json::to_value(&record).unwrap()["escalation"], "tier2");
    }

    #[test]
    fn test_bulk_payload_shape() {
        let payload = BulkPayload { cases: &[] };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"cases":[]}"#);
    }
}
