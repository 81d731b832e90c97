use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::auth::viewer::Viewer;
use crate::model::profile::Profile;
use crate::model::record::{AttendanceRecord, RecordKind};
use crate::model::role::Role;
use crate::report::classify::{RecordFacts, classify};
use crate::report::criteria::FilterCriteria;
use crate::report::export::{ExportError, export_csv};
use crate::report::filter::filter;
use crate::store::{self, FetchScope};
use crate::utils::profile_cache;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Inclusive range start (YYYY-MM-DD); malformed values are ignored
    pub start_date: Option<String>,
    /// Inclusive range end (YYYY-MM-DD); malformed values are ignored
    pub end_date: Option<String>,
    /// Filter by event kind (check_in | check_out)
    pub kind: Option<String>,
    /// Filter by capture status (success | face_invalid | location_invalid)
    pub status: Option<String>,
    /// "all" or a specific employee id; admins only
    pub employee: Option<String>,
}

impl ReportQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_raw(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.kind.as_deref(),
            self.status.as_deref(),
            self.employee.as_deref(),
        )
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReportRow {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 10)]
    pub user_id: u64,
    #[schema(example = "2024-05-01T08:05:00", format = "date-time", value_type = String)]
    pub timestamp: chrono::NaiveDateTime,
    #[schema(example = "check_in", value_type = String)]
    pub kind: RecordKind,
    #[schema(example = "success")]
    pub status: String,
    pub facts: RecordFacts,
    #[schema(example = 10.762622, nullable = true)]
    pub latitude: Option<f64>,
    #[schema(example = 106.660172, nullable = true)]
    pub longitude: Option<f64>,
    /// Owning employee; attached only for admin viewers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Profile>,
}

impl ReportRow {
    fn from_record(record: AttendanceRecord) -> Self {
        let facts = classify(&record);
        let (latitude, longitude) = match record.location {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };

        ReportRow {
            id: record.id,
            user_id: record.user_id,
            timestamp: record.timestamp,
            kind: record.kind,
            status: record.status,
            facts,
            latitude,
            longitude,
            employee: record.profile,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReportResponse {
    pub data: Vec<ReportRow>,
    #[schema(example = 2)]
    pub total: usize,
    /// Employee list for the selector control; admin viewers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Profile>>,
}

/// Resolve the viewer's profile and fetch the record scope their role
/// grants. Admin views also need the employee list for the selector, so both
/// requests are issued together and joined.
async fn fetch_view_data(
    viewer: &Viewer,
    pool: &MySqlPool,
    with_employees: bool,
) -> actix_web::Result<(Role, Vec<AttendanceRecord>, Option<Vec<Profile>>)> {
    let profile = profile_cache::viewer_profile(pool, viewer.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = viewer.user_id, "Failed to resolve viewer profile");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown viewer"))?;

    let role = profile.viewer_role();

    if role.is_admin() {
        if with_employees {
            let (records, employees) = futures::try_join!(
                store::list_attendance(pool, FetchScope::AllEmployees),
                store::list_profiles(pool),
            )
            .map_err(|e| {
                error!(error = %e, "Failed to fetch attendance report data");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
            return Ok((role, records, Some(employees)));
        }

        let records = store::list_attendance(pool, FetchScope::AllEmployees)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch attendance records");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
        return Ok((role, records, None));
    }

    let records = store::list_attendance(pool, FetchScope::Viewer(viewer.user_id))
        .await
        .map_err(|e| {
            error!(error = %e, user_id = viewer.user_id, "Failed to fetch attendance records");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok((role, records, None))
}

/// Attendance report listing
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(ReportQuery),
    responses(
        (status = 200, description = "Filtered attendance report", body = ReportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn attendance_report(
    viewer: Viewer,
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let (role, records, employees) = fetch_view_data(&viewer, pool.get_ref(), true).await?;

    let visible = filter(&records, &query.criteria(), role);
    let data: Vec<ReportRow> = visible.into_iter().map(ReportRow::from_record).collect();

    Ok(HttpResponse::Ok().json(ReportResponse {
        total: data.len(),
        data,
        employees,
    }))
}

/// Attendance report CSV download
#[utoipa::path(
    get,
    path = "/api/v1/attendance/export",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 400, description = "No records match the current filters", body = Object, example = json!({
            "message": "No attendance records match the current filters"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn export_report(
    viewer: Viewer,
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let (role, records, _) = fetch_view_data(&viewer, pool.get_ref(), false).await?;

    let visible = filter(&records, &query.criteria(), role);

    match export_csv(&visible, role, Local::now().date_naive()) {
        Ok(file) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition::attachment(file.filename))
            .body(file.content)),

        Err(ExportError::EmptyDataset) => Ok(HttpResponse::BadRequest().json(json!({
            "message": "No attendance records match the current filters"
        }))),

        Err(e) => {
            error!(error = %e, "Report export failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
