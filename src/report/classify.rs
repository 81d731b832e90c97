use std::str::FromStr;

use serde::Serialize;
use strum_macros::AsRefStr;
use utoipa::ToSchema;

use crate::model::record::{AttendanceRecord, RecordStatus};

/// Styling/alerting bucket for a status, serialized as the lowercase token
/// the rendering layer keys its classes on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, AsRefStr, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Negative,
    Warning,
    Neutral,
}

/// Display-grade facts derived from one record. Pure data, recomputed on
/// demand; nothing here is stored.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecordFacts {
    #[schema(example = "Successful", value_type = String)]
    pub category: &'static str,
    pub severity: Severity,
    #[schema(example = "Late 5 minutes")]
    pub lateness: String,
    #[schema(example = "9 hours")]
    pub work_hours: String,
    /// Present only when overtime was actually worked; "no overtime" is
    /// omitted rather than zero-filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "1.5 hours", nullable = true)]
    pub overtime: Option<String>,
}

/// Category label for a raw status token. Total over arbitrary input:
/// unrecognized tokens degrade to a generic failure label instead of
/// breaking the report.
pub fn status_category(raw: &str) -> &'static str {
    match RecordStatus::from_str(raw) {
        Ok(RecordStatus::Success) => "Successful",
        Ok(RecordStatus::FaceInvalid) => "Invalid Face",
        Ok(RecordStatus::LocationInvalid) => "Invalid Location",
        Ok(RecordStatus::Absent) => "Absent",
        Err(_) => "Failed",
    }
}

pub fn status_severity(raw: &str) -> Severity {
    match RecordStatus::from_str(raw) {
        Ok(RecordStatus::Success) => Severity::Positive,
        Ok(RecordStatus::FaceInvalid) | Ok(RecordStatus::Absent) => Severity::Negative,
        Ok(RecordStatus::LocationInvalid) => Severity::Warning,
        Err(_) => Severity::Neutral,
    }
}

pub fn classify(record: &AttendanceRecord) -> RecordFacts {
    RecordFacts {
        category: status_category(&record.status),
        severity: status_severity(&record.status),
        lateness: lateness_text(record),
        work_hours: hours_text(record.work_hours),
        overtime: overtime_text(record.overtime_hours),
    }
}

fn lateness_text(record: &AttendanceRecord) -> String {
    if record.is_late {
        format!("Late {} minutes", record.late_minutes)
    } else {
        "On time".to_string()
    }
}

fn hours_text(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h > 0.0 => format!("{} hours", h),
        _ => "-".to_string(),
    }
}

fn overtime_text(hours: Option<f64>) -> Option<String> {
    match hours {
        Some(h) if h > 0.0 => Some(format!("{} hours", h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_with(status: &str, is_late: bool, late_minutes: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            user_id: 10,
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .expect("valid date")
                .and_hms_opt(8, 0, 0)
                .expect("valid time"),
            kind: crate::model::record::RecordKind::CheckIn,
            status: status.to_string(),
            is_late,
            late_minutes,
            work_hours: None,
            overtime_hours: None,
            location: None,
            profile: None,
        }
    }

    #[test]
    fn every_known_status_has_a_category() {
        assert_eq!(status_category("success"), "Successful");
        assert_eq!(status_category("face_invalid"), "Invalid Face");
        assert_eq!(status_category("location_invalid"), "Invalid Location");
        assert_eq!(status_category("absent"), "Absent");
    }

    #[test]
    fn unknown_status_degrades_without_panicking() {
        assert_eq!(status_category("quantum_flux"), "Failed");
        assert_eq!(status_severity("quantum_flux"), Severity::Neutral);
        assert_eq!(status_category(""), "Failed");
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(status_severity("success"), Severity::Positive);
        assert_eq!(status_severity("face_invalid"), Severity::Negative);
        assert_eq!(status_severity("absent"), Severity::Negative);
        assert_eq!(status_severity("location_invalid"), Severity::Warning);
    }

    #[test]
    fn lateness_text_covers_both_sides() {
        let late = record_with("success", true, 5);
        assert_eq!(classify(&late).lateness, "Late 5 minutes");

        let on_time = record_with("success", false, 0);
        assert_eq!(classify(&on_time).lateness, "On time");
    }

    #[test]
    fn late_with_normalized_zero_minutes_renders_zero() {
        // A NULL minutes column under is_late becomes 0 at the store
        // boundary; the text must still render, not error.
        let dirty = record_with("success", true, 0);
        assert_eq!(classify(&dirty).lateness, "Late 0 minutes");
    }

    #[test]
    fn work_hours_placeholder_when_absent_or_zero() {
        let mut record = record_with("success", false, 0);
        assert_eq!(classify(&record).work_hours, "-");

        record.work_hours = Some(0.0);
        assert_eq!(classify(&record).work_hours, "-");

        record.work_hours = Some(9.0);
        assert_eq!(classify(&record).work_hours, "9 hours");

        record.work_hours = Some(7.25);
        assert_eq!(classify(&record).work_hours, "7.25 hours");
    }

    #[test]
    fn overtime_omitted_unless_positive() {
        let mut record = record_with("success", false, 0);
        assert_eq!(classify(&record).overtime, None);

        record.overtime_hours = Some(0.0);
        assert_eq!(classify(&record).overtime, None);

        record.overtime_hours = Some(1.5);
        assert_eq!(classify(&record).overtime, Some("1.5 hours".to_string()));
    }
}
