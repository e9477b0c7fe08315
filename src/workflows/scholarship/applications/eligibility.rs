use super::domain::Eligibility;

/// Adults at or below this monthly income are eligible outright.
pub const ELIGIBLE_INCOME_CEILING: u32 = 2000;
/// Above this monthly income an applicant is ineligible regardless of age.
pub const INELIGIBLE_INCOME_FLOOR: u32 = 8000;
const ADULT_AGE: u8 = 18;

/// Pre-screen an applicant from age and declared monthly income.
///
/// Branch order matters: minors always land in the second branch, and an
/// adult with income between the two thresholds reaches `PendingReview` by
/// falling through both checks, not by an explicit rule of its own.
pub fn pre_screen(age: u8, monthly_income: u32) -> Eligibility {
    if age >= ADULT_AGE && monthly_income <= ELIGIBLE_INCOME_CEILING {
        Eligibility::Eligible
    } else if age < ADULT_AGE || monthly_income > INELIGIBLE_INCOME_FLOOR {
        Eligibility::Ineligible
    } else {
        Eligibility::PendingReview
    }
}
