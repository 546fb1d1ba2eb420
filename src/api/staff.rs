use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::audit;
use crate::model::audit::AuditSeverity;
use crate::model::staff::{EmploymentStatus, StaffMember};

#[derive(Deserialize, ToSchema)]
pub struct CreateStaff {
    #[schema(example = "Priya Sharma")]
    pub name: String,

    #[schema(example = "Cashier")]
    pub role: Option<String>,

    #[schema(example = "QQ123456C")]
    pub ni_number: String,

    #[schema(example = "1257L")]
    pub tax_code: String,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub joined_date: NaiveDate,

    #[schema(example = "Active")]
    pub status: Option<EmploymentStatus>,

    #[serde(default)]
    #[schema(example = 0.0)]
    pub monthly_rate: f64,

    #[serde(default)]
    #[schema(example = 11.44)]
    pub hourly_rate: f64,

    #[serde(default)]
    #[schema(example = 0.0)]
    pub daily_rate: f64,

    #[serde(default)]
    #[schema(example = 0.0)]
    pub advance: f64,

    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStaff {
    pub name: Option<String>,
    pub role: Option<String>,
    pub ni_number: Option<String>,
    pub tax_code: Option<String>,
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub joined_date: Option<NaiveDate>,
    pub status: Option<EmploymentStatus>,
    pub monthly_rate: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub advance: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StaffQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 20)]
    pub per_page: Option<u32>,

    #[schema(example = "Active")]
    pub status: Option<String>,

    #[schema(example = "priya")]
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StaffListResponse {
    pub data: Vec<StaffMember>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 12)]
    pub total: i64,
}

/// Negative money fields never enter the store; the payroll engine itself
/// does not clamp.
fn reject_negative(fields: &[(&str, f64)]) -> Result<(), HttpResponse> {
    for (name, value) in fields {
        if *value < 0.0 {
            return Err(HttpResponse::BadRequest().json(json!({
                "message": format!("{name} must not be negative")
            })));
        }
    }
    Ok(())
}

/// Create staff member
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = CreateStaff,
    responses(
        (status = 201, description = "Staff member created"),
        (status = 400, description = "Negative rate or advance"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Staff"
)]
pub async fn create_staff(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateStaff>,
) -> actix_web::Result<impl Responder> {
    if let Err(resp) = reject_negative(&[
        ("monthly_rate", payload.monthly_rate),
        ("hourly_rate", payload.hourly_rate),
        ("daily_rate", payload.daily_rate),
        ("advance", payload.advance),
    ]) {
        return Ok(resp);
    }

    let id = Uuid::new_v4().to_string();
    let status = payload.status.unwrap_or(EmploymentStatus::Active);

    sqlx::query(
        r#"
        INSERT INTO staff
        (id, name, role, ni_number, tax_code, joined_date, status,
         monthly_rate, hourly_rate, daily_rate, advance, email, phone)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&payload.name)
    .bind(&payload.role)
    .bind(&payload.ni_number)
    .bind(&payload.tax_code)
    .bind(payload.joined_date)
    .bind(status)
    .bind(payload.monthly_rate)
    .bind(payload.hourly_rate)
    .bind(payload.daily_rate)
    .bind(payload.advance)
    .bind(&payload.email)
    .bind(&payload.phone)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create staff member");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Staff member created successfully",
        "id": id
    })))
}

/// List staff with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    params(StaffQuery),
    responses(
        (status = 200, description = "Paginated staff list", body = StaffListResponse)
    ),
    tag = "Staff"
)]
pub async fn list_staff(
    pool: web::Data<MySqlPool>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page as i64 - 1) * per_page as i64;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(status) = &query.status {
        conditions.push("status = ?");
        bindings.push(status.clone());
    }

    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? OR role LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM staff {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting staff");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count staff");
        ErrorInternalServerError("Database error")
    })?;

    let data_sql = format!(
        "SELECT * FROM staff {} ORDER BY name ASC LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, offset, "Fetching staff");

    let mut data_query = sqlx::query_as::<_, StaffMember>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset);

    let data = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch staff list");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(StaffListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get staff member by ID
#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", description = "Staff member ID")
    ),
    responses(
        (status = 200, description = "Staff member found", body = StaffMember),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let member = sqlx::query_as::<_, StaffMember>(r#"SELECT * FROM staff WHERE id = ?"#)
        .bind(&staff_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to fetch staff member");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match member {
        Some(m) => Ok(HttpResponse::Ok().json(m)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Staff member not found"
        }))),
    }
}

/// Update staff member
#[utoipa::path(
    put,
    path = "/api/v1/staff/{staff_id}",
    request_body = UpdateStaff,
    params(
        ("staff_id", description = "Staff member ID")
    ),
    responses(
        (status = 200, description = "Staff member updated"),
        (status = 400, description = "Negative rate or advance"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn update_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<UpdateStaff>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let current = sqlx::query_as::<_, StaffMember>(r#"SELECT * FROM staff WHERE id = ?"#)
        .bind(&staff_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to fetch staff member");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let current = match current {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Staff member not found"
            })));
        }
    };

    let monthly_rate = body.monthly_rate.unwrap_or(current.monthly_rate);
    let hourly_rate = body.hourly_rate.unwrap_or(current.hourly_rate);
    let daily_rate = body.daily_rate.unwrap_or(current.daily_rate);
    let advance = body.advance.unwrap_or(current.advance);

    if let Err(resp) = reject_negative(&[
        ("monthly_rate", monthly_rate),
        ("hourly_rate", hourly_rate),
        ("daily_rate", daily_rate),
        ("advance", advance),
    ]) {
        return Ok(resp);
    }

    let name = body.name.clone().unwrap_or(current.name);
    let role = body.role.clone().or(current.role);
    let ni_number = body.ni_number.clone().unwrap_or(current.ni_number);
    let tax_code = body.tax_code.clone().unwrap_or(current.tax_code);
    let joined_date = body.joined_date.unwrap_or(current.joined_date);
    let status = body.status.unwrap_or(current.status);
    let email = body.email.clone().or(current.email);
    let phone = body.phone.clone().or(current.phone);

    sqlx::query(
        r#"
        UPDATE staff
        SET name = ?, role = ?, ni_number = ?, tax_code = ?, joined_date = ?,
            status = ?, monthly_rate = ?, hourly_rate = ?, daily_rate = ?,
            advance = ?, email = ?, phone = ?
        WHERE id = ?
        "#,
    )
    .bind(&name)
    .bind(&role)
    .bind(&ni_number)
    .bind(&tax_code)
    .bind(joined_date)
    .bind(status)
    .bind(monthly_rate)
    .bind(hourly_rate)
    .bind(daily_rate)
    .bind(advance)
    .bind(&email)
    .bind(&phone)
    .bind(&staff_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, staff_id, "Failed to update staff member");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff member updated successfully"
    })))
}

/// Delete staff member
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{staff_id}",
    params(
        ("staff_id", description = "Staff member ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn delete_staff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let staff_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM staff WHERE id = ?"#)
        .bind(&staff_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, staff_id, "Failed to delete staff member");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Staff member not found"
        })));
    }

    if let Err(e) = audit::log_action(
        pool.get_ref(),
        "back-office",
        "Staff Removed",
        "staff",
        &format!("Deleted staff member {staff_id}"),
        AuditSeverity::Warning,
    )
    .await
    {
        warn!(error = %e, staff_id, "Failed to write audit entry");
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
