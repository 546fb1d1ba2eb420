/// Monthly tax-free personal allowance (£12,570 / 12).
pub const MONTHLY_ALLOWANCE: f64 = 1047.50;
/// Simplified basic-rate PAYE; no higher bands are modelled.
pub const BASIC_RATE: f64 = 0.20;
/// Class 1 employee NI, single threshold, no upper earnings limit.
pub const NI_MONTHLY_THRESHOLD: f64 = 1048.0;
pub const NI_RATE: f64 = 0.08;
/// Auto-enrolment employee pension contribution above the lower earnings level.
pub const PENSION_MONTHLY_THRESHOLD: f64 = 520.0;
pub const PENSION_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deductions {
    pub income_tax: f64,
    pub national_insurance: f64,
    pub pension: f64,
}

impl Deductions {
    pub fn total(&self) -> f64 {
        self.income_tax + self.national_insurance + self.pension
    }
}

/// Statutory deductions on a monthly gross figure. Tax code "BR"
/// (case-insensitive) zeroes the allowance; every other code gets the
/// standard one. Total over all inputs, no error branches.
pub fn statutory_deductions(gross: f64, tax_code: &str) -> Deductions {
    let allowance = if tax_code.eq_ignore_ascii_case("BR") {
        0.0
    } else {
        MONTHLY_ALLOWANCE
    };

    let taxable = (gross - allowance).max(0.0);
    let income_tax = taxable * BASIC_RATE;

    let national_insurance = if gross > NI_MONTHLY_THRESHOLD {
        (gross - NI_MONTHLY_THRESHOLD) * NI_RATE
    } else {
        0.0
    };

    let pension = if gross > PENSION_MONTHLY_THRESHOLD {
        (gross - PENSION_MONTHLY_THRESHOLD) * PENSION_RATE
    } else {
        0.0
    };

    Deductions {
        income_tax,
        national_insurance,
        pension,
    }
}
