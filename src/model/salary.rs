use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum SalaryStatus {
    Pending,
    Paid,
    Cancelled,
}

/// One payslip per staff member per month. A payroll run replaces the whole
/// batch for its month; rows are never patched field-by-field.
///
/// `gross_pay` and `total_amount` are always derived:
/// gross = base + overtime + holiday + sick,
/// net = gross - tax - NI - pension - advance.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SalaryRecord {
    #[schema(example = "0b9f3c1d-7e2a-4b8c-a1d5-6e4f2c8a9b0d")]
    pub id: String,

    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub staff_id: String,

    /// Denormalised at generation time so payslips survive roster edits.
    #[schema(example = "Priya Sharma")]
    pub employee_name: String,

    #[schema(example = "2026-08")]
    pub month: String,

    #[schema(example = "2026-08-26", value_type = String, format = "date")]
    pub pay_date: NaiveDate,

    #[schema(example = "1257L")]
    pub tax_code: String,

    #[schema(example = "QQ123456C")]
    pub ni_number: String,

    pub base_pay: f64,
    pub overtime_pay: f64,
    pub holiday_pay: f64,
    pub sick_pay: f64,

    pub total_hours: f64,
    pub total_overtime: f64,

    pub income_tax: f64,
    pub national_insurance: f64,
    pub pension: f64,

    /// The staff member's advance repayment for the month.
    pub deductions: f64,

    pub gross_pay: f64,
    pub total_amount: f64,

    // Year-to-date approximations, not running totals: gross scaled by months
    // since the April tax-year start, tax/NI/pension doubled.
    pub ytd_gross: f64,
    pub ytd_tax: f64,
    pub ytd_ni: f64,
    pub ytd_pension: f64,

    #[schema(example = "Pending")]
    pub status: SalaryStatus,

    #[schema(example = "2026-08-26T09:30:00Z", value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
}
