use crate::api::attendance::{AttendanceListResponse, AttendanceQuery, RecordAttendance};
use crate::api::payroll::{RunPayroll, RunPayrollResponse, SalaryListResponse, SalaryQuery};
use crate::api::staff::{CreateStaff, StaffListResponse, StaffQuery, UpdateStaff};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::salary::{SalaryRecord, SalaryStatus};
use crate::model::staff::{EmploymentStatus, StaffMember};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Payroll API",
        version = "1.0.0",
        description = r#"
## Convenience Store Payroll Back Office

This API powers the payroll back office for a single convenience store:
staff roster, daily attendance capture, and a monthly UK gross-to-net
payroll cycle.

### 🔹 Key Features
- **Staff Management**
  - Create, update, list, and view staff members with their pay-rate setup
- **Attendance**
  - One record per staff member per day, with hours and overtime
- **Payroll**
  - Run the monthly cycle (PAYE, NI, pension, SSP), list salary records,
    and fetch individual payslips

### 📦 Semantics
- A payroll run replaces the whole salary batch for its month
  (last-run-wins, no recalculation history)
- All money figures are floating currency units; rounding is a display
  concern

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::staff::create_staff,
        crate::api::staff::list_staff,
        crate::api::staff::get_staff,
        crate::api::staff::update_staff,
        crate::api::staff::delete_staff,

        crate::api::attendance::record_attendance,
        crate::api::attendance::list_attendance,

        crate::api::payroll::run_payroll,
        crate::api::payroll::list_salaries,
        crate::api::payroll::get_payslip,
    ),
    components(schemas(
        StaffMember,
        EmploymentStatus,
        CreateStaff,
        UpdateStaff,
        StaffQuery,
        StaffListResponse,
        AttendanceRecord,
        AttendanceStatus,
        RecordAttendance,
        AttendanceQuery,
        AttendanceListResponse,
        SalaryRecord,
        SalaryStatus,
        RunPayroll,
        RunPayrollResponse,
        SalaryQuery,
        SalaryListResponse,
    )),
    tags(
        (name = "Staff", description = "Staff roster management"),
        (name = "Attendance", description = "Daily attendance capture"),
        (name = "Payroll", description = "Monthly payroll cycle and payslips"),
    )
)]
pub struct ApiDoc;
