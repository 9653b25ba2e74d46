//! Domain records.
//!
//! Plain data shapes mapped straight from table rows. Nullable columns are
//! `Option` fields and are omitted from JSON output when absent, so a
//! missing value is never confused with an empty string or zero.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A patient record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Patient {
    pub id: i64,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A clinician record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Clinician {
    pub id: i64,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A wound-assessment record.
///
/// `wound_id` is a nullable reference: assessments may be recorded before a
/// wound is catalogued.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Assessment {
    pub id: i64,
    pub patient_id: i64,
    pub clinician_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wound_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let assessment = Assessment {
            id: 7,
            patient_id: 1,
            clinician_id: 2,
            wound_id: None,
            notes: None,
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json.get("wound_id").is_none());
        assert!(json.get("notes").is_none());
        assert_eq!(json["patient_id"], 1);
    }

    #[test]
    fn present_optionals_are_serialised() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let patient = Patient {
            id: 3,
            full_name: "Ada Quill".into(),
            date_of_birth: Some(ts),
            gender: Some("female".into()),
            medical_record_number: None,
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["gender"], "female");
        assert!(json.get("medical_record_number").is_none());
    }
}
