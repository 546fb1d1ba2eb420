use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Sick,
    Holiday,
    Pending,
    #[serde(rename = "Half Day")]
    #[strum(serialize = "Half Day")]
    #[sqlx(rename = "Half Day")]
    HalfDay,
}

/// One row per staff member per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "a3c9e1b2-0d4f-4e6a-9c8b-5f2a7d1e3b4c")]
    pub id: String,

    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub staff_id: String,

    #[schema(example = "2026-08-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    /// Total hours on shift, overtime included. Absent on non-working rows.
    #[schema(example = 8.0, nullable = true)]
    pub hours_worked: Option<f64>,

    /// Portion of hours_worked beyond the standard shift.
    #[schema(example = 1.5, nullable = true)]
    pub overtime: Option<f64>,

    #[schema(example = "Covered evening delivery", nullable = true)]
    pub notes: Option<String>,
}
