//! Figures derived from slider and number answers, shown under the inputs.

use serde::Serialize;
use serde_json::Value;
use wizard_flow::Context;

use crate::tasks::types::fields;

/// Monthly education contribution assumed until the user moves the slider
pub const DEFAULT_MONTHLY_CONTRIBUTION: i64 = 208;
/// Government matches this share of annual contributions
pub const GRANT_RATE: f64 = 0.2;
/// Yearly grant ceiling
pub const MAX_ANNUAL_GRANT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EducationProjection {
    pub annual_contribution: i64,
    pub government_grant: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MortgageBreakdown {
    pub down_payment_percent: f64,
    pub mortgage_needed: i64,
}

/// Whole number read from a form value.
///
/// Text inputs hand us strings, sliders hand us numbers. Strings are read up
/// to the first non-digit, so `"35 years"` is 35 and `"abc"` is nothing.
pub fn as_whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n.trunc() as i64)),
        Value::String(text) => leading_integer(text),
        _ => None,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn number_field(context: &Context, key: &str) -> Option<i64> {
    context.get_value(key).as_ref().and_then(as_whole_number)
}

/// Years left to save, when the target age is after the current one.
pub fn years_to_retirement(context: &Context) -> Option<i64> {
    let current = number_field(context, fields::CURRENT_AGE)?;
    let target = number_field(context, fields::RETIREMENT_AGE)?;
    target.checked_sub(current).filter(|years| *years > 0)
}

/// `None` when the typed monthly amount is too large to annualise.
pub fn education_projection(context: &Context) -> Option<EducationProjection> {
    let monthly = number_field(context, fields::MONTHLY_CONTRIBUTION)
        .unwrap_or(DEFAULT_MONTHLY_CONTRIBUTION);
    let annual_contribution = monthly.checked_mul(12)?;
    Some(EducationProjection {
        annual_contribution,
        government_grant: (annual_contribution as f64 * GRANT_RATE).min(MAX_ANNUAL_GRANT),
    })
}

pub fn mortgage_breakdown(context: &Context) -> Option<MortgageBreakdown> {
    let price = number_field(context, fields::PURCHASE_PRICE).filter(|price| *price != 0)?;
    let down = number_field(context, fields::DOWN_PAYMENT).filter(|down| *down != 0)?;
    Some(MortgageBreakdown {
        down_payment_percent: down as f64 / price as f64 * 100.0,
        mortgage_needed: price.checked_sub(down)?,
    })
}
