use chrono::NaiveDate;
use thiserror::Error;

use crate::model::record::AttendanceRecord;
use crate::model::role::Role;

/// Column schemas, fixed order. The admin report carries two extra identity
/// columns; header order and row field order must stay in lockstep.
const VIEWER_HEADER: [&str; 10] = [
    "Date",
    "Time",
    "Kind",
    "Status",
    "Late",
    "LateMinutes",
    "WorkHours",
    "OvertimeHours",
    "Latitude",
    "Longitude",
];

const ADMIN_HEADER: [&str; 12] = [
    "Date",
    "Time",
    "EmployeeName",
    "Department",
    "Kind",
    "Status",
    "Late",
    "LateMinutes",
    "WorkHours",
    "OvertimeHours",
    "Latitude",
    "Longitude",
];

/// An empty export is an expected, user-correctable condition, so it comes
/// back as a value rather than a panic or an HTTP-layer special case.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no attendance records to export")]
    EmptyDataset,
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Flush(#[from] std::io::Error),
}

/// The finished artifact, ready to hand to the download mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Serialize the filtered subset into a delimited report.
///
/// Deterministic: identical `(records, viewer_role, export_date)` yields
/// byte-identical content. Fields containing the delimiter, a quote, or a
/// line break are quoted with internal quotes doubled, so free-text names
/// can never shift columns.
pub fn export_csv(
    records: &[AttendanceRecord],
    viewer_role: Role,
    export_date: NaiveDate,
) -> Result<CsvFile, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyDataset);
    }

    let mut content = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut content);

        if viewer_role.is_admin() {
            writer.write_record(&ADMIN_HEADER)?;
        } else {
            writer.write_record(&VIEWER_HEADER)?;
        }

        for record in records {
            let mut row: Vec<String> = Vec::with_capacity(ADMIN_HEADER.len());
            row.push(record.timestamp.format("%d/%b/%Y").to_string());
            row.push(record.timestamp.format("%H:%M").to_string());

            if viewer_role.is_admin() {
                match record.profile.as_ref() {
                    Some(profile) => {
                        row.push(profile.name.clone());
                        row.push(profile.department.clone().unwrap_or_default());
                    }
                    None => {
                        row.push(String::new());
                        row.push(String::new());
                    }
                }
            }

            row.push(record.kind.display_label().to_string());
            row.push(record.status.clone());
            row.push(if record.is_late { "Yes" } else { "No" }.to_string());
            row.push(record.late_minutes.to_string());
            row.push(hours_field(record.work_hours));
            row.push(hours_field(record.overtime_hours));
            // Zero is a meaningful hour count but a meaningless coordinate,
            // so missing locations stay empty instead of zero-filled.
            match record.location {
                Some((lat, lon)) => {
                    row.push(lat.to_string());
                    row.push(lon.to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }

            writer.write_record(&row)?;
        }

        writer.flush()?;
    }

    Ok(CsvFile {
        filename: format!("attendance_report_{}.csv", export_date.format("%Y-%m-%d")),
        content,
    })
}

fn hours_field(hours: Option<f64>) -> String {
    match hours {
        Some(h) => h.to_string(),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::Profile;
    use crate::model::record::RecordKind;
    use chrono::NaiveDateTime;

    fn ts(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").expect("test timestamp must parse")
    }

    fn export_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date")
    }

    fn record(id: u64, stamp: &str) -> AttendanceRecord {
        AttendanceRecord {
            id,
            user_id: 10,
            timestamp: ts(stamp),
            kind: RecordKind::CheckIn,
            status: "success".to_string(),
            is_late: false,
            late_minutes: 0,
            work_hours: None,
            overtime_hours: None,
            location: None,
            profile: None,
        }
    }

    fn profile(name: &str, department: Option<&str>) -> Profile {
        Profile {
            id: 10,
            name: name.to_string(),
            email: "test@company.com".to_string(),
            employee_code: None,
            department: department.map(str::to_string),
            role: None,
        }
    }

    #[test]
    fn empty_dataset_produces_no_file() {
        let err = export_csv(&[], Role::Employee, export_date()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyDataset));
    }

    #[test]
    fn viewer_report_matches_schema_exactly() {
        let mut late = record(1, "2024-05-01T08:05:00");
        late.is_late = true;
        late.late_minutes = 5;

        let file = export_csv(&[late], Role::Employee, export_date()).expect("export must succeed");
        let text = String::from_utf8(file.content).expect("csv is utf-8");
        assert_eq!(
            text,
            "Date,Time,Kind,Status,Late,LateMinutes,WorkHours,OvertimeHours,Latitude,Longitude\n\
             01/May/2024,08:05,Check-in,success,Yes,5,0,0,,\n"
        );
    }

    #[test]
    fn admin_report_adds_identity_columns() {
        let mut rec = record(1, "2024-05-01T17:00:00");
        rec.kind = RecordKind::CheckOut;
        rec.work_hours = Some(9.0);
        rec.location = Some((10.762622, 106.660172));
        rec.profile = Some(profile("John Doe", Some("Engineering")));

        let file = export_csv(&[rec], Role::Admin, export_date()).expect("export must succeed");
        let text = String::from_utf8(file.content).expect("csv is utf-8");
        assert_eq!(
            text,
            "Date,Time,EmployeeName,Department,Kind,Status,Late,LateMinutes,WorkHours,OvertimeHours,Latitude,Longitude\n\
             01/May/2024,17:00,John Doe,Engineering,Check-out,success,No,0,9,0,10.762622,106.660172\n"
        );
    }

    #[test]
    fn admin_rows_tolerate_a_missing_profile() {
        let file =
            export_csv(&[record(1, "2024-05-01T08:00:00")], Role::Admin, export_date())
                .expect("export must succeed");
        let text = String::from_utf8(file.content).expect("csv is utf-8");
        assert!(text.contains("01/May/2024,08:00,,,Check-in,success"));
    }

    #[test]
    fn free_text_fields_are_quoted_not_split() {
        let mut rec = record(1, "2024-05-01T08:00:00");
        rec.profile = Some(profile("Doe, John \"JD\"", None));

        let file = export_csv(&[rec], Role::Admin, export_date()).expect("export must succeed");
        let text = String::from_utf8(file.content).expect("csv is utf-8");
        assert!(
            text.contains("\"Doe, John \"\"JD\"\"\""),
            "comma and quote must be escaped, got: {text}"
        );
        let data_row = text.lines().nth(1).expect("one data row");
        let parsed: Vec<String> = csv::Reader::from_reader(text.as_bytes())
            .records()
            .next()
            .expect("one record")
            .expect("row parses back")
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(parsed.len(), ADMIN_HEADER.len(), "row: {data_row}");
        assert_eq!(parsed[2], "Doe, John \"JD\"");
    }

    #[test]
    fn export_is_deterministic() {
        let records = vec![record(1, "2024-05-01T08:00:00"), record(2, "2024-05-01T17:00:00")];
        let first = export_csv(&records, Role::Employee, export_date()).expect("export");
        let second = export_csv(&records, Role::Employee, export_date()).expect("export");
        assert_eq!(first, second);
    }

    #[test]
    fn filename_carries_the_export_date() {
        let file = export_csv(&[record(1, "2024-05-01T08:00:00")], Role::Employee, export_date())
            .expect("export");
        assert_eq!(file.filename, "attendance_report_2024-05-20.csv");
    }
}
