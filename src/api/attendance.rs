use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::payroll::PayMonth;

#[derive(Deserialize, ToSchema)]
pub struct RecordAttendance {
    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub staff_id: String,

    #[schema(example = "2026-08-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    #[schema(example = 8.0)]
    pub hours_worked: Option<f64>,

    #[schema(example = 1.5)]
    pub overtime: Option<f64>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 31)]
    pub per_page: Option<u32>,

    #[schema(example = "6f1d2a8c-9f0b-4c5e-8a3d-2b7c1e4f5a6b")]
    pub staff_id: Option<String>,

    /// Restrict to one calendar month, "YYYY-MM".
    #[schema(example = "2026-08")]
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Bounds check applied before a row enters the store; the payroll engine
/// itself does not clamp.
fn check_hour_bounds(hours: f64, overtime: f64) -> Result<(), &'static str> {
    if hours < 0.0 || overtime < 0.0 {
        return Err("hours_worked and overtime must not be negative");
    }
    if overtime > hours {
        return Err("overtime cannot exceed hours_worked");
    }
    Ok(())
}

/// Record a day's attendance
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = RecordAttendance,
    responses(
        (status = 201, description = "Attendance recorded"),
        (status = 400, description = "Negative hours, overtime exceeding hours, or duplicate day", body = Object, example = json!({
            "message": "Attendance already recorded for this day"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RecordAttendance>,
) -> actix_web::Result<impl Responder> {
    let hours = payload.hours_worked.unwrap_or(0.0);
    let overtime = payload.overtime.unwrap_or(0.0);

    if let Err(message) = check_hour_bounds(hours, overtime) {
        return Ok(HttpResponse::BadRequest().json(json!({ "message": message })));
    }

    let id = Uuid::new_v4().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (id, staff_id, date, status, hours_worked, overtime, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&payload.staff_id)
    .bind(payload.date)
    .bind(payload.status)
    .bind(payload.hours_worked)
    .bind(payload.overtime)
    .bind(&payload.notes)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Attendance recorded successfully",
            "id": id
        }))),

        Err(e) => {
            // One row per staff member per day.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(json!({
                        "message": "Attendance already recorded for this day"
                    })));
                }
            }

            error!(error = %e, staff_id = %payload.staff_id, "Failed to record attendance");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance list", body = AttendanceListResponse),
        (status = 400, description = "Malformed month filter")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(31).clamp(1, 100);
    let offset = (page as i64 - 1) * per_page as i64;

    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(staff_id) = &query.staff_id {
        conditions.push("staff_id = ?");
        bindings.push(staff_id.clone());
    }

    if let Some(month) = &query.month {
        let month: PayMonth = match month.parse() {
            Ok(m) => m,
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": format!("Invalid month filter: {e}")
                })));
            }
        };
        conditions.push("date >= ? AND date < ?");
        bindings.push(month.first_day().to_string());
        bindings.push(month.next_month_start().to_string());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM attendance {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting attendance rows");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count attendance rows");
        ErrorInternalServerError("Database error")
    })?;

    let data_sql = format!(
        "SELECT * FROM attendance {} ORDER BY date DESC LIMIT ? OFFSET ?",
        where_clause
    );

    let mut data_query = sqlx::query_as::<_, AttendanceRecord>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset);

    let data = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch attendance rows");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_hours_are_rejected() {
        assert!(check_hour_bounds(-1.0, 0.0).is_err());
        assert!(check_hour_bounds(-0.5, -0.5).is_err());
    }

    #[test]
    fn negative_overtime_is_rejected() {
        assert!(check_hour_bounds(8.0, -1.5).is_err());
    }

    #[test]
    fn overtime_beyond_hours_is_rejected() {
        assert!(check_hour_bounds(8.0, 8.5).is_err());
    }

    #[test]
    fn zero_and_in_bounds_values_pass() {
        assert!(check_hour_bounds(0.0, 0.0).is_ok());
        assert!(check_hour_bounds(8.0, 0.0).is_ok());
        assert!(check_hour_bounds(8.0, 8.0).is_ok());
        assert!(check_hour_bounds(9.5, 1.5).is_ok());
    }
}
