use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::model::profile::Profile;

/// What a time-clock event is: a check-in, a check-out, or an absence marker.
/// Absence markers are informational elsewhere in the system and never appear
/// in the attendance report.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    CheckIn,
    CheckOut,
    Absent,
}

impl RecordKind {
    /// Human-facing label used by the CSV report.
    pub fn display_label(self) -> &'static str {
        match self {
            RecordKind::CheckIn => "Check-in",
            RecordKind::CheckOut => "Check-out",
            RecordKind::Absent => "Absent",
        }
    }
}

/// Known outcomes of an attendance-capture attempt. Records hold the raw
/// status token as text since the store may contain values outside this set;
/// the classifier degrades unknown tokens to a generic failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Success,
    FaceInvalid,
    LocationInvalid,
    Absent,
}

/// One time-clock event, normalized at the store boundary:
/// `is_late == false` implies `late_minutes == 0`, numeric fields are
/// non-negative, and coordinates are both-or-neither.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: u64,
    pub user_id: u64,
    pub timestamp: NaiveDateTime,
    pub kind: RecordKind,
    pub status: String,
    pub is_late: bool,
    pub late_minutes: u32,
    pub work_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    /// (latitude, longitude) of the capture, when both were recorded.
    pub location: Option<(f64, f64)>,
    /// Attached only by the all-employees retrieval; `None` in self scope.
    pub profile: Option<Profile>,
}
