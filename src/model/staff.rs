use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum EmploymentStatus {
    Active,
    Inactive,
    #[serde(rename = "Pending Approval")]
    #[strum(serialize = "Pending Approval")]
    #[sqlx(rename = "Pending Approval")]
    PendingApproval,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b",
        "name": "Priya Sharma",
        "role": "Cashier",
        "ni_number": "QQ123456C",
        "tax_code": "1257L",
        "joined_date": "2024-01-15",
        "status": "Active",
        "monthly_rate": 0.0,
        "hourly_rate": 11.44,
        "daily_rate": 0.0,
        "advance": 0.0
    })
)]
pub struct StaffMember {
    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub id: String,

    #[schema(example = "Priya Sharma")]
    pub name: String,

    #[schema(example = "Cashier", nullable = true)]
    pub role: Option<String>,

    /// Opaque; passed through to payslips unchanged.
    #[schema(example = "QQ123456C")]
    pub ni_number: String,

    /// "BR" (case-insensitive) zeroes the tax-free allowance; anything else
    /// gets the standard allowance.
    #[schema(example = "1257L")]
    pub tax_code: String,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub joined_date: NaiveDate,

    #[schema(example = "Active")]
    pub status: EmploymentStatus,

    // Exactly one rate is expected to be non-zero; hourly wins when several
    // are set. Monthly-rate-only staff currently earn zero base pay.
    #[schema(example = 0.0)]
    pub monthly_rate: f64,

    #[schema(example = 11.44)]
    pub hourly_rate: f64,

    #[schema(example = 0.0)]
    pub daily_rate: f64,

    /// Flat advance repayment deducted from this month's net pay.
    #[schema(example = 0.0)]
    pub advance: f64,

    #[schema(example = "priya@shop.example", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+447700900123", nullable = true)]
    pub phone: Option<String>,
}
