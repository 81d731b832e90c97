use std::str::FromStr;

use sqlx::MySqlPool;

use crate::model::profile::Profile;
use crate::model::record::{AttendanceRecord, RecordKind};

/// The all-employees retrieval never pages; it returns at most this many of
/// the most recent rows.
pub const ALL_EMPLOYEES_FETCH_CAP: u32 = 500;

/// Which slice of the store a retrieval covers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FetchScope {
    /// One viewer's own records, all time.
    Viewer(u64),
    /// Every employee's records, capped, with profiles attached.
    AllEmployees,
}

/// Raw attendance row as the store returns it. Optional columns may be
/// missing or inconsistent; `into_record` repairs them so the rest of the
/// service can assume well-formed data.
#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: u64,
    user_id: u64,
    recorded_at: chrono::NaiveDateTime,
    kind: String,
    status: String,
    is_late: Option<bool>,
    late_minutes: Option<i32>,
    work_hours: Option<f64>,
    overtime_hours: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,

    // Present only in the all-employees query, which joins the owning
    // employee; the self-scope query omits these columns entirely.
    #[sqlx(default)]
    employee_name: Option<String>,
    #[sqlx(default)]
    employee_email: Option<String>,
    #[sqlx(default)]
    employee_code: Option<String>,
    #[sqlx(default)]
    department: Option<String>,
    #[sqlx(default)]
    employee_role: Option<String>,
}

impl AttendanceRow {
    fn into_record(self) -> AttendanceRecord {
        let is_late = self.is_late.unwrap_or(false);
        let late_minutes = if is_late {
            self.late_minutes.map(|m| m.max(0) as u32).unwrap_or(0)
        } else {
            // Not late means zero, whatever the column holds.
            0
        };

        // A lone coordinate is meaningless; keep locations both-or-neither.
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };

        let profile = self.employee_name.map(|name| Profile {
            id: self.user_id,
            name,
            email: self.employee_email.unwrap_or_default(),
            employee_code: self.employee_code,
            department: self.department,
            role: self.employee_role,
        });

        AttendanceRecord {
            id: self.id,
            user_id: self.user_id,
            timestamp: self.recorded_at,
            kind: RecordKind::from_str(&self.kind).unwrap_or(RecordKind::Absent),
            status: self.status,
            is_late,
            late_minutes,
            work_hours: self.work_hours.filter(|h| *h >= 0.0),
            overtime_hours: self.overtime_hours.filter(|h| *h >= 0.0),
            location,
            profile,
        }
    }
}

const SELF_SCOPE_SQL: &str = r#"
    SELECT id, user_id, recorded_at, kind, status, is_late, late_minutes,
           work_hours, overtime_hours, latitude, longitude
    FROM attendance
    WHERE user_id = ?
    ORDER BY recorded_at DESC
"#;

const ALL_EMPLOYEES_SQL: &str = r#"
    SELECT a.id, a.user_id, a.recorded_at, a.kind, a.status, a.is_late,
           a.late_minutes, a.work_hours, a.overtime_hours, a.latitude, a.longitude,
           e.name AS employee_name, e.email AS employee_email,
           e.employee_code, e.department, e.role AS employee_role
    FROM attendance a
    LEFT JOIN employees e ON e.id = a.user_id
    ORDER BY a.recorded_at DESC
    LIMIT ?
"#;

pub async fn list_attendance(
    pool: &MySqlPool,
    scope: FetchScope,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let rows = match scope {
        FetchScope::Viewer(user_id) => {
            sqlx::query_as::<_, AttendanceRow>(SELF_SCOPE_SQL)
                .bind(user_id)
                .fetch_all(pool)
                .await?
        }
        FetchScope::AllEmployees => {
            sqlx::query_as::<_, AttendanceRow>(ALL_EMPLOYEES_SQL)
                .bind(ALL_EMPLOYEES_FETCH_CAP)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows.into_iter().map(AttendanceRow::into_record).collect())
}

pub async fn fetch_profile(pool: &MySqlPool, id: u64) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, name, email, employee_code, department, role FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Employee list for the admin selector control, ordered by name.
pub async fn list_profiles(pool: &MySqlPool) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, name, email, employee_code, department, role FROM employees ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_row() -> AttendanceRow {
        AttendanceRow {
            id: 1,
            user_id: 10,
            recorded_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .expect("valid date")
                .and_hms_opt(8, 0, 0)
                .expect("valid time"),
            kind: "check_in".to_string(),
            status: "success".to_string(),
            is_late: Some(true),
            late_minutes: Some(5),
            work_hours: Some(8.0),
            overtime_hours: None,
            latitude: None,
            longitude: None,
            employee_name: None,
            employee_email: None,
            employee_code: None,
            department: None,
            employee_role: None,
        }
    }

    #[test]
    fn clean_row_carries_through() {
        let record = raw_row().into_record();
        assert_eq!(record.kind, RecordKind::CheckIn);
        assert!(record.is_late);
        assert_eq!(record.late_minutes, 5);
        assert_eq!(record.work_hours, Some(8.0));
        assert_eq!(record.profile, None);
    }

    #[test]
    fn late_without_minutes_becomes_zero() {
        let mut row = raw_row();
        row.late_minutes = None;
        let record = row.into_record();
        assert!(record.is_late);
        assert_eq!(record.late_minutes, 0);
    }

    #[test]
    fn minutes_without_lateness_are_discarded() {
        let mut row = raw_row();
        row.is_late = Some(false);
        row.late_minutes = Some(12);
        let record = row.into_record();
        assert!(!record.is_late);
        assert_eq!(record.late_minutes, 0);
    }

    #[test]
    fn negative_numerics_are_repaired() {
        let mut row = raw_row();
        row.late_minutes = Some(-3);
        row.work_hours = Some(-1.0);
        let record = row.into_record();
        assert_eq!(record.late_minutes, 0);
        assert_eq!(record.work_hours, None);
    }

    #[test]
    fn lone_coordinate_is_dropped() {
        let mut row = raw_row();
        row.latitude = Some(10.76);
        let record = row.into_record();
        assert_eq!(record.location, None);

        let mut row = raw_row();
        row.latitude = Some(10.76);
        row.longitude = Some(106.66);
        assert_eq!(row.into_record().location, Some((10.76, 106.66)));
    }

    #[test]
    fn unknown_kind_normalizes_to_absent() {
        let mut row = raw_row();
        row.kind = "mystery".to_string();
        assert_eq!(row.into_record().kind, RecordKind::Absent);
    }

    #[test]
    fn joined_employee_columns_become_a_profile() {
        let mut row = raw_row();
        row.employee_name = Some("John Doe".to_string());
        row.employee_email = Some("john@company.com".to_string());
        row.department = Some("Engineering".to_string());
        row.employee_role = Some("admin".to_string());

        let record = row.into_record();
        let profile = record.profile.expect("profile attached");
        assert_eq!(profile.id, 10);
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.department.as_deref(), Some("Engineering"));
    }
}
