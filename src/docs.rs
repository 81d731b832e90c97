use crate::api::attendance::{ReportResponse, ReportRow};
use crate::api::employee::EmployeeListResponse;
use crate::model::profile::Profile;
use crate::report::classify::{RecordFacts, Severity};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Report API",
        version = "1.0.0",
        description = r#"
## Attendance Report Service

Read-only API for displaying and exporting time-clock (check-in/check-out)
records.

### 🔹 Key Features
- **Attendance Report**
  - Filter by date range, event kind, capture status, and (for admins) employee
  - Per-record display facts: status category, severity, lateness, worked hours
- **CSV Export**
  - Deterministic, RFC-4180 quoted report of the currently filtered subset
- **Employee Selector**
  - Admin-only employee list for organization-wide reports

### 🔐 Security
All endpoints require **JWT Bearer authentication**. Ordinary viewers see
only their own records; administrators see the whole organization.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::attendance_report,
        crate::api::attendance::export_report,

        crate::api::employee::list_employees
    ),
    components(
        schemas(
            ReportRow,
            ReportResponse,
            RecordFacts,
            Severity,
            Profile,
            EmployeeListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance report and export APIs"),
        (name = "Employee", description = "Employee selector APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(openapi::Components::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
