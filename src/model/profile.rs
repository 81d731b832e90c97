use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "employee_code": "EMP-001",
        "department": "Engineering",
        "role": "admin"
    })
)]
pub struct Profile {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "EMP-001", nullable = true)]
    pub employee_code: Option<String>,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    /// "admin" grants organization-wide visibility; anything else is a
    /// self-scope viewer.
    #[schema(example = "admin", nullable = true)]
    pub role: Option<String>,
}

impl Profile {
    pub fn viewer_role(&self) -> Role {
        Role::from_label(self.role.as_deref())
    }
}
