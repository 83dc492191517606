use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "7f3c0a52-6a5e-4c1e-9d0b-2f6f9f0d1c11",
        "name": "Juan Dela Cruz",
        "employeeNumber": "2024-001",
        "department": "Engineering",
        "date": "2024-05-01",
        "arrivalTime": "08:00",
        "timestamp": 1714550400000_i64
    })
)]
pub struct AttendanceRecord {
    pub id: String,
    pub name: String,
    pub employee_number: String,
    pub department: String,
    /// `YYYY-MM-DD`, as entered on the form
    pub date: String,
    /// `HH:MM`, as entered on the form
    pub arrival_time: String,
    /// Submission instant, milliseconds since the Unix epoch
    pub timestamp: i64,
}
