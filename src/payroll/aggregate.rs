use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::payroll::PayMonth;

/// Per-staff attendance totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyAttendance {
    pub total_hours: f64,
    pub total_overtime: f64,
    pub holiday_days: u32,
    pub sick_days: u32,
    /// Days with status Present or Late; the basis for daily-rate pay.
    pub present_days: u32,
}

/// Sums one staff member's attendance for the month. Missing hours/overtime
/// count as zero; a month with no rows yields all-zero totals.
pub fn aggregate_month(
    staff_id: &str,
    month: PayMonth,
    attendance: &[AttendanceRecord],
) -> MonthlyAttendance {
    let mut agg = MonthlyAttendance::default();

    for record in attendance
        .iter()
        .filter(|r| r.staff_id == staff_id && month.contains(r.date))
    {
        agg.total_hours += record.hours_worked.unwrap_or(0.0);
        agg.total_overtime += record.overtime.unwrap_or(0.0);

        match record.status {
            AttendanceStatus::Holiday => agg.holiday_days += 1,
            AttendanceStatus::Sick => agg.sick_days += 1,
            AttendanceStatus::Present | AttendanceStatus::Late => agg.present_days += 1,
            _ => {}
        }
    }

    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        staff_id: &str,
        date: (i32, u32, u32),
        status: AttendanceStatus,
        hours: Option<f64>,
        overtime: Option<f64>,
    ) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("{staff_id}-{}-{}-{}", date.0, date.1, date.2),
            staff_id: staff_id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
            hours_worked: hours,
            overtime,
            notes: None,
        }
    }

    fn month() -> PayMonth {
        "2026-08".parse().unwrap()
    }

    #[test]
    fn sums_hours_and_overtime_for_matching_rows_only() {
        let rows = vec![
            record("s1", (2026, 8, 3), AttendanceStatus::Present, Some(8.0), Some(0.0)),
            record("s1", (2026, 8, 4), AttendanceStatus::Late, Some(7.5), Some(1.5)),
            // Other staff member, same month.
            record("s2", (2026, 8, 4), AttendanceStatus::Present, Some(9.0), None),
            // Same staff member, wrong month.
            record("s1", (2026, 7, 30), AttendanceStatus::Present, Some(8.0), None),
        ];

        let agg = aggregate_month("s1", month(), &rows);
        assert_eq!(agg.total_hours, 15.5);
        assert_eq!(agg.total_overtime, 1.5);
        assert_eq!(agg.present_days, 2);
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let rows = vec![
            record("s1", (2026, 8, 3), AttendanceStatus::Present, None, None),
            record("s1", (2026, 8, 4), AttendanceStatus::HalfDay, Some(4.0), None),
        ];

        let agg = aggregate_month("s1", month(), &rows);
        assert_eq!(agg.total_hours, 4.0);
        assert_eq!(agg.total_overtime, 0.0);
        // Half Day is neither present nor late.
        assert_eq!(agg.present_days, 1);
    }

    #[test]
    fn counts_holiday_and_sick_days_without_hours() {
        let rows = vec![
            record("s1", (2026, 8, 5), AttendanceStatus::Holiday, None, None),
            record("s1", (2026, 8, 6), AttendanceStatus::Holiday, None, None),
            record("s1", (2026, 8, 7), AttendanceStatus::Sick, None, None),
            record("s1", (2026, 8, 8), AttendanceStatus::Absent, None, None),
        ];

        let agg = aggregate_month("s1", month(), &rows);
        assert_eq!(agg.holiday_days, 2);
        assert_eq!(agg.sick_days, 1);
        assert_eq!(agg.present_days, 0);
        assert_eq!(agg.total_hours, 0.0);
    }

    #[test]
    fn empty_month_yields_default_aggregates() {
        let agg = aggregate_month("s1", month(), &[]);
        assert_eq!(agg, MonthlyAttendance::default());
    }
}
