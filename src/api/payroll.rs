use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::audit;
use crate::model::attendance::AttendanceRecord;
use crate::model::audit::AuditSeverity;
use crate::model::salary::SalaryRecord;
use crate::model::staff::StaffMember;
use crate::payroll::PayMonth;
use crate::payroll::cycle::run_cycle;

#[derive(Deserialize, ToSchema)]
pub struct RunPayroll {
    /// Target month, "YYYY-MM".
    #[schema(example = "2026-08")]
    pub month: String,
}

#[derive(Serialize, ToSchema)]
pub struct RunPayrollResponse {
    #[schema(example = "Generated 7 payslips for 2026-08")]
    pub message: String,
    #[schema(example = "2026-08")]
    pub month: String,
    #[schema(example = 7)]
    pub generated: usize,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SalaryQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 20)]
    pub per_page: Option<u32>,

    #[schema(example = "2026-08")]
    pub month: Option<String>,

    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub staff_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SalaryListResponse {
    pub data: Vec<SalaryRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Run the payroll cycle for one month
///
/// Recomputes every Active staff member's payslip from the month's attendance
/// and replaces the month's whole salary batch: prior records for the month
/// are deleted and the new batch inserted inside one transaction
/// (last-run-wins, no history of recalculations).
#[utoipa::path(
    post,
    path = "/api/v1/payroll/run",
    request_body = RunPayroll,
    responses(
        (status = 200, description = "Cycle complete", body = RunPayrollResponse),
        (status = 400, description = "Malformed month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn run_payroll(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RunPayroll>,
) -> actix_web::Result<impl Responder> {
    let month: PayMonth = match payload.month.parse() {
        Ok(m) => m,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": format!("Invalid month: {e}")
            })));
        }
    };

    let roster = sqlx::query_as::<_, StaffMember>(r#"SELECT * FROM staff"#)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch roster");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let attendance = sqlx::query_as::<_, AttendanceRecord>(
        r#"SELECT * FROM attendance WHERE date >= ? AND date < ?"#,
    )
    .bind(month.first_day())
    .bind(month.next_month_start())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %month, "Failed to fetch attendance");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let generated_at = Utc::now();
    let records = run_cycle(
        &roster,
        &attendance,
        month,
        generated_at.date_naive(),
        generated_at,
    );

    // Two-phase replacement: discard the month's old batch, then insert the
    // new one, atomically.
    let mut tx = pool.get_ref().begin().await.map_err(|e| {
        error!(error = %e, %month, "Failed to open payroll transaction");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let month_key = month.to_string();

    let deleted = sqlx::query(r#"DELETE FROM salaries WHERE month = ?"#)
        .bind(&month_key)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, %month, "Failed to clear previous salary batch");
            ErrorInternalServerError("Internal Server Error")
        })?
        .rows_affected();

    for rec in &records {
        sqlx::query(
            r#"
            INSERT INTO salaries
            (id, staff_id, employee_name, month, pay_date, tax_code, ni_number,
             base_pay, overtime_pay, holiday_pay, sick_pay,
             total_hours, total_overtime,
             income_tax, national_insurance, pension, deductions,
             gross_pay, total_amount,
             ytd_gross, ytd_tax, ytd_ni, ytd_pension,
             status, generated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&rec.id)
        .bind(&rec.staff_id)
        .bind(&rec.employee_name)
        .bind(&rec.month)
        .bind(rec.pay_date)
        .bind(&rec.tax_code)
        .bind(&rec.ni_number)
        .bind(rec.base_pay)
        .bind(rec.overtime_pay)
        .bind(rec.holiday_pay)
        .bind(rec.sick_pay)
        .bind(rec.total_hours)
        .bind(rec.total_overtime)
        .bind(rec.income_tax)
        .bind(rec.national_insurance)
        .bind(rec.pension)
        .bind(rec.deductions)
        .bind(rec.gross_pay)
        .bind(rec.total_amount)
        .bind(rec.ytd_gross)
        .bind(rec.ytd_tax)
        .bind(rec.ytd_ni)
        .bind(rec.ytd_pension)
        .bind(rec.status)
        .bind(rec.generated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, %month, staff_id = %rec.staff_id, "Failed to insert salary record");
            ErrorInternalServerError("Internal Server Error")
        })?;
    }

    tx.commit().await.map_err(|e| {
        error!(error = %e, %month, "Failed to commit payroll batch");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(%month, generated = records.len(), replaced = deleted, "Payroll cycle complete");

    let message = format!("Generated {} payslips for {}", records.len(), month_key);
    if let Err(e) = audit::log_action(
        pool.get_ref(),
        "back-office",
        "Payroll Batch Finalized",
        "payroll",
        &message,
        AuditSeverity::Warning,
    )
    .await
    {
        warn!(error = %e, %month, "Failed to write audit entry");
    }

    Ok(HttpResponse::Ok().json(RunPayrollResponse {
        message,
        month: month_key,
        generated: records.len(),
    }))
}

/// List salary records
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(SalaryQuery),
    responses(
        (status = 200, description = "Paginated salary list", body = SalaryListResponse)
    ),
    tag = "Payroll"
)]
pub async fn list_salaries(
    pool: web::Data<MySqlPool>,
    query: web::Query<SalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page as i64 - 1) * per_page as i64;

    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(month) = &query.month {
        conditions.push("month = ?");
        bindings.push(month.clone());
    }

    if let Some(staff_id) = &query.staff_id {
        conditions.push("staff_id = ?");
        bindings.push(staff_id.clone());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM salaries {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting salary records");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count salary records");
        ErrorInternalServerError("Database error")
    })?;

    let data_sql = format!(
        "SELECT * FROM salaries {} ORDER BY month DESC, employee_name ASC LIMIT ? OFFSET ?",
        where_clause
    );

    let mut data_query = sqlx::query_as::<_, SalaryRecord>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset);

    let data = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch salary records");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(SalaryListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get one payslip by ID
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{salary_id}",
    params(
        ("salary_id", description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Payslip found", body = SalaryRecord),
        (status = 404, description = "Payslip not found")
    ),
    tag = "Payroll"
)]
pub async fn get_payslip(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let salary_id = path.into_inner();

    let record = sqlx::query_as::<_, SalaryRecord>(r#"SELECT * FROM salaries WHERE id = ?"#)
        .bind(&salary_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, salary_id, "Failed to fetch payslip");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match record {
        Some(r) => Ok(HttpResponse::Ok().json(r)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Payslip not found"
        }))),
    }
}
