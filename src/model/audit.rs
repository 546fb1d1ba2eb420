use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Severity attached to back-office audit entries. Payroll batch runs are
/// logged as Warning because they overwrite prior records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}
