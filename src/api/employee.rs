use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::viewer::Viewer;
use crate::model::profile::Profile;
use crate::store;
use crate::utils::profile_cache;

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(
    example = json!([{
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "employee_code": "EMP-001",
        "department": "Engineering",
        "role": null
    }])
)]
    pub data: Vec<Profile>,
    #[schema(example = 1)]
    pub total: usize,
}

/// Employee list for the report's employee selector
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employees ordered by name", body = EmployeeListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    viewer: Viewer,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let profile = profile_cache::viewer_profile(pool.get_ref(), viewer.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = viewer.user_id, "Failed to resolve viewer profile");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown viewer"))?;

    if !profile.viewer_role().is_admin() {
        return Err(actix_web::error::ErrorForbidden("Admin only"));
    }

    let employees = store::list_profiles(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch employee list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        data: employees,
    }))
}
