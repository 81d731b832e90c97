use crate::model::record::{AttendanceRecord, RecordKind};
use crate::model::role::Role;
use crate::report::criteria::{EmployeeSelector, FilterCriteria};

/// Narrow the raw record set to the subset the viewer asked to see.
///
/// Every step only removes records; output order equals input order (the
/// store returns rows timestamp-descending and this pass never re-sorts).
/// Date bounds are inclusive calendar dates: any instant on the end date is
/// kept, the first instant of the following day is not.
pub fn filter(
    records: &[AttendanceRecord],
    criteria: &FilterCriteria,
    viewer_role: Role,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|record| {
            // Absence markers are not reportable time-clock events.
            if record.kind == RecordKind::Absent {
                return false;
            }

            // The employee selector only means something to an admin.
            if viewer_role.is_admin() {
                if let EmployeeSelector::One(id) = criteria.employee {
                    if record.user_id != id {
                        return false;
                    }
                }
            }

            if let Some(start) = criteria.start_date {
                if record.timestamp.date() < start {
                    return false;
                }
            }
            if let Some(end) = criteria.end_date {
                if record.timestamp.date() > end {
                    return false;
                }
            }

            if let Some(kind) = criteria.kind {
                if record.kind != kind {
                    return false;
                }
            }
            if let Some(status) = criteria.status {
                if record.status != status.as_ref() {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}
