//! Per-screen "Continue" gate for the needs assessment.

use serde_json::Value;
use wizard_flow::Context;

use crate::path::AssessmentPath;
use crate::tasks::types::fields::*;

/// Whether the user may leave `sub_step` of `path` with the answers in `context`.
///
/// Steps a path does not list are always passable.
pub fn is_valid(path: AssessmentPath, sub_step: u8, context: &Context) -> bool {
    use AssessmentPath::*;

    match (path, sub_step) {
        (InsuranceLife, 1) => present(context, PURPOSE),
        (InsuranceLife, 2) => all_truthy(context, &[COVERAGE_AMOUNT, COVERAGE_DURATION]),
        (InsuranceHealth, 1) => present(context, WHO_NEEDS_COVERAGE),
        (InsuranceHealth, 2) => non_empty(context, BENEFITS),
        (InsuranceCritical, 1) => present(context, FINANCIAL_SUPPORT),
        (InsuranceCritical, 2) => non_empty(context, CONDITION_FOCUS),
        (InsuranceTravel, 1) => present(context, DESTINATION),
        (InsuranceTravel, 2) => all_truthy(context, &[TRIP_DURATION, DEPARTURE_DATE, TRIP_TYPE]),

        (InvestingMutualFunds, 1) => present(context, TIME_HORIZON),
        (InvestingMutualFunds, 2) => present(context, RISK_MANAGEMENT),
        (InvestingMutualFunds, 3) => present(context, RISK_TOLERANCE),
        (InvestingRetirement, 1) => all_truthy(context, &[CURRENT_AGE, RETIREMENT_AGE]),
        (InvestingRetirement, 2) => present(context, CONTRIBUTION_STYLE),
        (InvestingGics, 1) => present(context, LIQUIDITY_NEEDS),
        (InvestingGics, 2) => present(context, TERM_LENGTH),
        (InvestingEducation, 1) => present(context, CHILD_BIRTH_YEAR),
        (InvestingEducation, 2) => present(context, MONTHLY_CONTRIBUTION),

        (BankingSavings, 1) => present(context, SAVINGS_GOAL),
        (BankingSavings, 2) => present(context, WITHDRAWAL_FREQUENCY),
        (BankingChequing, 1) => present(context, MONTHLY_TRANSACTIONS),
        // Must-have features are optional
        (BankingChequing, 2) => true,
        (BankingCreditCard, 1) => present(context, REWARDS_PRIORITY),
        (BankingCreditCard, 2) => present(context, ANNUAL_FEE_PREFERENCE),
        (BankingCreditCard, 3) => present(context, REWARD_PREFERENCE),
        (BankingMortgage, 1) => present(context, BUYER_STATUS),
        (BankingMortgage, 2) => all_truthy(context, &[PURCHASE_PRICE, DOWN_PAYMENT]),

        _ => true,
    }
}

/// Field names the gate checks for a step, in display order
pub fn required_fields(path: AssessmentPath, sub_step: u8) -> &'static [&'static str] {
    use AssessmentPath::*;

    match (path, sub_step) {
        (InsuranceLife, 1) => &[PURPOSE],
        (InsuranceLife, 2) => &[COVERAGE_AMOUNT, COVERAGE_DURATION],
        (InsuranceHealth, 1) => &[WHO_NEEDS_COVERAGE],
        (InsuranceHealth, 2) => &[BENEFITS],
        (InsuranceCritical, 1) => &[FINANCIAL_SUPPORT],
        (InsuranceCritical, 2) => &[CONDITION_FOCUS],
        (InsuranceTravel, 1) => &[DESTINATION],
        (InsuranceTravel, 2) => &[TRIP_DURATION, DEPARTURE_DATE, TRIP_TYPE],
        (InvestingMutualFunds, 1) => &[TIME_HORIZON],
        (InvestingMutualFunds, 2) => &[RISK_MANAGEMENT],
        (InvestingMutualFunds, 3) => &[RISK_TOLERANCE],
        (InvestingRetirement, 1) => &[CURRENT_AGE, RETIREMENT_AGE],
        (InvestingRetirement, 2) => &[CONTRIBUTION_STYLE],
        (InvestingGics, 1) => &[LIQUIDITY_NEEDS],
        (InvestingGics, 2) => &[TERM_LENGTH],
        (InvestingEducation, 1) => &[CHILD_BIRTH_YEAR],
        (InvestingEducation, 2) => &[MONTHLY_CONTRIBUTION],
        (BankingSavings, 1) => &[SAVINGS_GOAL],
        (BankingSavings, 2) => &[WITHDRAWAL_FREQUENCY],
        (BankingChequing, 1) => &[MONTHLY_TRANSACTIONS],
        (BankingCreditCard, 1) => &[REWARDS_PRIORITY],
        (BankingCreditCard, 2) => &[ANNUAL_FEE_PREFERENCE],
        (BankingCreditCard, 3) => &[REWARD_PREFERENCE],
        (BankingMortgage, 1) => &[BUYER_STATUS],
        (BankingMortgage, 2) => &[PURCHASE_PRICE, DOWN_PAYMENT],
        _ => &[],
    }
}

fn present(context: &Context, key: &str) -> bool {
    context.contains(key)
}

fn all_truthy(context: &Context, keys: &[&str]) -> bool {
    keys.iter()
        .all(|key| context.get_value(key).is_some_and(|value| is_truthy(&value)))
}

fn non_empty(context: &Context, key: &str) -> bool {
    matches!(context.get_value(key), Some(Value::Array(items)) if !items.is_empty())
}

/// Loose truthiness used for fields that must carry a usable value:
/// empty strings, zero and empty lists do not count.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_step_opens_once_every_listed_field_is_set() {
        for path in AssessmentPath::ALL {
            let context = Context::new();
            let required = required_fields(path, 1);
            assert!(!required.is_empty(), "{path} has no first-step fields");

            for (index, field) in required.iter().enumerate() {
                assert!(!is_valid(path, 1, &context), "{path} opened before {field}");
                context.set_sync(*field, json!(format!("value-{index}")));
            }
            assert!(is_valid(path, 1, &context), "{path} still closed");

            // Later steps' answers never close an open first step
            for step in 2..=path.total_sub_steps() {
                for field in required_fields(path, step) {
                    context.set_sync(*field, json!(""));
                }
            }
            assert!(is_valid(path, 1, &context), "{path} closed by later answers");
        }
    }

    #[test]
    fn multi_selects_need_one_entry() {
        let context = Context::new();
        assert!(!is_valid(AssessmentPath::InsuranceHealth, 2, &context));

        context.set_sync(BENEFITS, json!([]));
        assert!(!is_valid(AssessmentPath::InsuranceHealth, 2, &context));

        context.set_sync(BENEFITS, json!(["dental"]));
        assert!(is_valid(AssessmentPath::InsuranceHealth, 2, &context));
    }

    #[test]
    fn paired_fields_need_usable_values() {
        let context = Context::new();
        context.set_sync(PURCHASE_PRICE, json!("500000"));
        context.set_sync(DOWN_PAYMENT, json!(""));
        assert!(!is_valid(AssessmentPath::BankingMortgage, 2, &context));

        context.set_sync(DOWN_PAYMENT, json!(0));
        assert!(!is_valid(AssessmentPath::BankingMortgage, 2, &context));

        context.set_sync(DOWN_PAYMENT, json!(100000));
        assert!(is_valid(AssessmentPath::BankingMortgage, 2, &context));
    }

    #[test]
    fn travel_needs_all_three_trip_details() {
        let context = Context::new();
        context.set_sync(TRIP_DURATION, "8-14");
        context.set_sync(TRIP_TYPE, "leisure");
        assert!(!is_valid(AssessmentPath::InsuranceTravel, 2, &context));

        context.set_sync(DEPARTURE_DATE, "2026-12-01");
        assert!(is_valid(AssessmentPath::InsuranceTravel, 2, &context));
    }

    #[test]
    fn unlisted_steps_are_permissive() {
        let context = Context::new();
        assert!(is_valid(AssessmentPath::BankingChequing, 2, &context));
        assert!(is_valid(AssessmentPath::InsuranceLife, 3, &context));
        assert!(is_valid(AssessmentPath::BankingSavings, 7, &context));
    }

    #[test]
    fn credit_card_gets_its_third_step() {
        let context = Context::new();
        assert!(!is_valid(AssessmentPath::BankingCreditCard, 3, &context));
        context.set_sync(REWARD_PREFERENCE, "travel");
        assert!(is_valid(AssessmentPath::BankingCreditCard, 3, &context));
    }
}
