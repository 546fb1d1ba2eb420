use crate::model::staff::StaffMember;
use crate::payroll::aggregate::MonthlyAttendance;

pub const OVERTIME_MULTIPLIER: f64 = 1.5;
/// Flat per-hour overtime rate used when no hourly rate is configured.
pub const OVERTIME_FALLBACK_RATE: f64 = 15.0;
/// A holiday day is compensated as a standard 8-hour shift.
pub const HOLIDAY_HOURS_PER_DAY: f64 = 8.0;
/// Simplified SSP: £116.75/week over 5 qualifying days.
pub const SSP_DAILY_RATE: f64 = 23.35;
/// Unpaid waiting days before sick pay starts.
pub const SSP_WAITING_DAYS: u32 = 3;

/// Pay-rate configuration lifted off a staff row. Hourly takes precedence
/// over daily; a monthly-only configuration earns zero base pay (see notes
/// in DESIGN.md).
#[derive(Debug, Clone, Copy, Default)]
pub struct PayRates {
    pub hourly: f64,
    pub daily: f64,
    pub monthly: f64,
}

impl From<&StaffMember> for PayRates {
    fn from(member: &StaffMember) -> Self {
        Self {
            hourly: member.hourly_rate,
            daily: member.daily_rate,
            monthly: member.monthly_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrossPay {
    pub base_pay: f64,
    pub overtime_pay: f64,
    pub holiday_pay: f64,
    pub sick_pay: f64,
}

impl GrossPay {
    pub fn total(&self) -> f64 {
        self.base_pay + self.overtime_pay + self.holiday_pay + self.sick_pay
    }
}

/// Derives the gross pay components from the month's attendance totals.
pub fn gross_pay(rates: &PayRates, att: &MonthlyAttendance) -> GrossPay {
    let base_pay = if rates.hourly > 0.0 {
        (att.total_hours - att.total_overtime) * rates.hourly
    } else if rates.daily > 0.0 {
        att.present_days as f64 * rates.daily
    } else {
        0.0
    };

    let overtime_rate = if rates.hourly > 0.0 {
        rates.hourly * OVERTIME_MULTIPLIER
    } else {
        OVERTIME_FALLBACK_RATE
    };
    let overtime_pay = att.total_overtime * overtime_rate;

    let holiday_pay = att.holiday_days as f64 * (rates.hourly * HOLIDAY_HOURS_PER_DAY);

    let sick_pay = if att.sick_days > SSP_WAITING_DAYS {
        (att.sick_days - SSP_WAITING_DAYS) as f64 * SSP_DAILY_RATE
    } else {
        0.0
    };

    GrossPay {
        base_pay,
        overtime_pay,
        holiday_pay,
        sick_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hourly_base_pay_excludes_overtime_hours() {
        let rates = PayRates { hourly: 10.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_hours: 160.0,
            total_overtime: 0.0,
            ..Default::default()
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(gross.base_pay, 1600.0));
        assert!(close(gross.overtime_pay, 0.0));
        assert!(close(gross.total(), 1600.0));
    }

    #[test]
    fn overtime_paid_at_time_and_a_half() {
        let rates = PayRates { hourly: 10.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_hours: 168.0,
            total_overtime: 8.0,
            ..Default::default()
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(gross.base_pay, 1600.0));
        assert!(close(gross.overtime_pay, 8.0 * 15.0));
    }

    #[test]
    fn overtime_falls_back_to_flat_rate_without_hourly_rate() {
        let rates = PayRates { daily: 90.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_overtime: 4.0,
            ..Default::default()
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(gross.overtime_pay, 60.0));
    }

    #[test]
    fn daily_rate_pays_present_and_late_days() {
        let rates = PayRates { daily: 90.0, ..Default::default() };
        let att = MonthlyAttendance {
            present_days: 20,
            ..Default::default()
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(gross.base_pay, 1800.0));
    }

    #[test]
    fn hourly_rate_takes_precedence_over_daily() {
        let rates = PayRates { hourly: 10.0, daily: 90.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_hours: 40.0,
            present_days: 5,
            ..Default::default()
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(gross.base_pay, 400.0));
    }

    #[test]
    fn monthly_only_configuration_earns_zero_base_pay() {
        let rates = PayRates { monthly: 2000.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_hours: 160.0,
            present_days: 20,
            ..Default::default()
        };

        assert!(close(gross_pay(&rates, &att).base_pay, 0.0));
    }

    #[test]
    fn holiday_pay_is_eight_hours_per_day_at_hourly_rate() {
        let rates = PayRates { hourly: 11.44, ..Default::default() };
        let att = MonthlyAttendance {
            holiday_days: 2,
            ..Default::default()
        };

        assert!(close(gross_pay(&rates, &att).holiday_pay, 2.0 * 11.44 * 8.0));
    }

    #[test]
    fn sick_pay_starts_after_three_waiting_days() {
        let rates = PayRates { hourly: 10.0, ..Default::default() };

        let three = MonthlyAttendance { sick_days: 3, ..Default::default() };
        assert!(close(gross_pay(&rates, &three).sick_pay, 0.0));

        let five = MonthlyAttendance { sick_days: 5, ..Default::default() };
        assert!(close(gross_pay(&rates, &five).sick_pay, 46.70));
    }

    #[test]
    fn gross_total_is_sum_of_components() {
        let rates = PayRates { hourly: 12.0, ..Default::default() };
        let att = MonthlyAttendance {
            total_hours: 150.0,
            total_overtime: 10.0,
            holiday_days: 1,
            sick_days: 4,
            present_days: 18,
        };

        let gross = gross_pay(&rates, &att);
        assert!(close(
            gross.total(),
            gross.base_pay + gross.overtime_pay + gross.holiday_pay + gross.sick_pay
        ));
    }
}
