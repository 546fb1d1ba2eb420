use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::model::attendance::AttendanceRecord;
use crate::model::salary::{SalaryRecord, SalaryStatus};
use crate::model::staff::{EmploymentStatus, StaffMember};
use crate::payroll::aggregate::aggregate_month;
use crate::payroll::deductions::statutory_deductions;
use crate::payroll::gross::{PayRates, gross_pay};
use crate::payroll::PayMonth;

/// Months elapsed since the April start of the UK tax year, used to scale
/// the month's gross into a rough YTD figure.
fn months_since_tax_year_start(month: PayMonth) -> f64 {
    month.month_number() as f64 - 3.0
}

/// Runs the payroll cycle for one month over an in-memory roster and
/// attendance snapshot, producing one Pending salary record per Active staff
/// member. Pure: persistence (replace-by-month) and audit logging are the
/// caller's responsibility.
///
/// `pay_date` and `generated_at` are passed in rather than read from the
/// clock, so two runs over the same inputs are identical field-for-field.
pub fn run_cycle(
    roster: &[StaffMember],
    attendance: &[AttendanceRecord],
    month: PayMonth,
    pay_date: NaiveDate,
    generated_at: DateTime<Utc>,
) -> Vec<SalaryRecord> {
    roster
        .iter()
        .filter(|member| member.status == EmploymentStatus::Active)
        .map(|member| {
            let agg = aggregate_month(&member.id, month, attendance);
            let gross = gross_pay(&PayRates::from(member), &agg);
            let gross_total = gross.total();
            let ded = statutory_deductions(gross_total, &member.tax_code);

            let net = gross_total - ded.total() - member.advance;

            // YTD approximations, not running totals. Gross is scaled by the
            // months since April (clamped up to at least one month's worth);
            // tax/NI/pension are simply doubled.
            let ytd_gross = (gross_total * months_since_tax_year_start(month)).max(gross_total);

            SalaryRecord {
                id: Uuid::new_v4().to_string(),
                staff_id: member.id.clone(),
                employee_name: member.name.clone(),
                month: month.to_string(),
                pay_date,
                tax_code: member.tax_code.clone(),
                ni_number: member.ni_number.clone(),
                base_pay: gross.base_pay,
                overtime_pay: gross.overtime_pay,
                holiday_pay: gross.holiday_pay,
                sick_pay: gross.sick_pay,
                total_hours: agg.total_hours,
                total_overtime: agg.total_overtime,
                income_tax: ded.income_tax,
                national_insurance: ded.national_insurance,
                pension: ded.pension,
                deductions: member.advance,
                gross_pay: gross_total,
                total_amount: net,
                ytd_gross,
                ytd_tax: ded.income_tax * 2.0,
                ytd_ni: ded.national_insurance * 2.0,
                ytd_pension: ded.pension * 2.0,
                status: SalaryStatus::Pending,
                generated_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn member(id: &str, status: EmploymentStatus) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: format!("Staff {id}"),
            role: Some("Cashier".to_string()),
            ni_number: "QQ123456C".to_string(),
            tax_code: "1257L".to_string(),
            joined_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status,
            monthly_rate: 0.0,
            hourly_rate: 10.0,
            daily_rate: 0.0,
            advance: 0.0,
            email: None,
            phone: None,
        }
    }

    fn day(staff_id: &str, d: u32, hours: f64) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("{staff_id}-{d}"),
            staff_id: staff_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, d).unwrap(),
            status: AttendanceStatus::Present,
            hours_worked: Some(hours),
            overtime: None,
            notes: None,
        }
    }

    fn month() -> PayMonth {
        "2026-08".parse().unwrap()
    }

    fn run(roster: &[StaffMember], attendance: &[AttendanceRecord]) -> Vec<SalaryRecord> {
        let pay_date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let generated_at = DateTime::parse_from_rfc3339("2026-08-26T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        run_cycle(roster, attendance, month(), pay_date, generated_at)
    }

    #[test]
    fn only_active_staff_get_a_record() {
        let roster = vec![
            member("s1", EmploymentStatus::Active),
            member("s2", EmploymentStatus::Inactive),
            member("s3", EmploymentStatus::PendingApproval),
        ];

        let records = run(&roster, &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].staff_id, "s1");
    }

    #[test]
    fn hourly_scenario_end_to_end() {
        // 160 hours at £10, no overtime/holiday/sick.
        let roster = vec![member("s1", EmploymentStatus::Active)];
        let attendance: Vec<_> = (1..=20).map(|d| day("s1", d, 8.0)).collect();

        let rec = &run(&roster, &attendance)[0];
        assert!(close(rec.base_pay, 1600.0));
        assert!(close(rec.gross_pay, 1600.0));
        assert!(close(rec.income_tax, 110.50));
        assert!(close(rec.national_insurance, 44.16));
        assert!(close(rec.pension, 54.00));
        assert!(close(
            rec.total_amount,
            1600.0 - 110.50 - 44.16 - 54.00
        ));
        assert!(close(rec.total_hours, 160.0));
        assert_eq!(rec.status, SalaryStatus::Pending);
        assert_eq!(rec.month, "2026-08");
        assert_eq!(rec.employee_name, "Staff s1");
        assert_eq!(rec.tax_code, "1257L");
        assert_eq!(rec.ni_number, "QQ123456C");
    }

    #[test]
    fn no_rates_and_no_attendance_nets_minus_advance() {
        let mut m = member("s1", EmploymentStatus::Active);
        m.hourly_rate = 0.0;
        m.advance = 50.0;

        let rec = &run(&[m], &[])[0];
        assert!(close(rec.gross_pay, 0.0));
        assert!(close(rec.total_amount, -50.0));
        assert!(close(rec.deductions, 50.0));
    }

    #[test]
    fn advance_is_deducted_from_net_only() {
        let mut m = member("s1", EmploymentStatus::Active);
        m.advance = 100.0;
        let attendance: Vec<_> = (1..=20).map(|d| day("s1", d, 8.0)).collect();

        let rec = &run(&[m], &attendance)[0];
        assert!(close(rec.gross_pay, 1600.0));
        assert!(close(
            rec.total_amount,
            1600.0 - 110.50 - 44.16 - 54.00 - 100.0
        ));
    }

    #[test]
    fn ytd_gross_scales_by_months_since_april() {
        let roster = vec![member("s1", EmploymentStatus::Active)];
        let attendance: Vec<_> = (1..=20).map(|d| day("s1", d, 8.0)).collect();

        // August is 5 months into the tax year.
        let rec = &run(&roster, &attendance)[0];
        assert!(close(rec.ytd_gross, 1600.0 * 5.0));
        assert!(close(rec.ytd_tax, rec.income_tax * 2.0));
        assert!(close(rec.ytd_ni, rec.national_insurance * 2.0));
        assert!(close(rec.ytd_pension, rec.pension * 2.0));
    }

    #[test]
    fn ytd_gross_never_drops_below_current_month() {
        // January's multiplier would be negative; the clamp keeps YTD at the
        // month's own gross.
        let roster = vec![member("s1", EmploymentStatus::Active)];
        let attendance = vec![AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            ..day("s1", 5, 8.0)
        }];
        let month: PayMonth = "2026-01".parse().unwrap();

        let records = run_cycle(
            &roster,
            &attendance,
            month,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            Utc::now(),
        );
        assert!(close(records[0].ytd_gross, records[0].gross_pay));
    }

    #[test]
    fn gross_is_sum_of_components_for_every_record() {
        let mut hourly = member("s1", EmploymentStatus::Active);
        hourly.advance = 25.0;
        let mut daily = member("s2", EmploymentStatus::Active);
        daily.hourly_rate = 0.0;
        daily.daily_rate = 85.0;

        let mut attendance: Vec<_> = (1..=15).map(|d| day("s1", d, 8.5)).collect();
        attendance.extend((1..=12).map(|d| day("s2", d, 8.0)));
        attendance.push(AttendanceRecord {
            status: AttendanceStatus::Sick,
            hours_worked: None,
            ..day("s1", 20, 0.0)
        });

        for rec in run(&[hourly, daily], &attendance) {
            assert!(close(
                rec.gross_pay,
                rec.base_pay + rec.overtime_pay + rec.holiday_pay + rec.sick_pay
            ));
        }
    }

    #[test]
    fn reruns_are_identical_apart_from_generated_ids() {
        let roster = vec![member("s1", EmploymentStatus::Active)];
        let attendance: Vec<_> = (1..=20).map(|d| day("s1", d, 8.0)).collect();

        let a = run(&roster, &attendance);
        let b = run(&roster, &attendance);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.staff_id, y.staff_id);
            assert_eq!(x.month, y.month);
            assert!(close(x.gross_pay, y.gross_pay));
            assert!(close(x.total_amount, y.total_amount));
            assert!(close(x.income_tax, y.income_tax));
            assert!(close(x.national_insurance, y.national_insurance));
            assert!(close(x.pension, y.pension));
            assert!(close(x.ytd_gross, y.ytd_gross));
            assert_eq!(x.pay_date, y.pay_date);
            assert_eq!(x.generated_at, y.generated_at);
        }
    }
}
