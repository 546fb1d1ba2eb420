use sqlx::MySqlPool;

use crate::model::audit::AuditSeverity;

/// Appends one entry to the back-office audit trail. Callers that must not
/// fail on a logging error should downgrade the result to a warning.
pub async fn log_action(
    pool: &MySqlPool,
    actor: &str,
    action: &str,
    module: &str,
    details: &str,
    severity: AuditSeverity,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_log (actor, action, module, details, severity)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(actor)
    .bind(action)
    .bind(module)
    .bind(details)
    .bind(severity)
    .execute(pool)
    .await?;

    Ok(())
}
