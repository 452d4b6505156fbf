//! What each needs-assessment sub-step asks, for rendering.

use serde_json::Value;

use crate::path::AssessmentPath;
use crate::tasks::types::fields::*;

#[derive(Debug, Clone, Copy)]
pub struct Choice {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub enum Input {
    Choice(&'static [Choice]),
    MultiChoice(&'static [Choice]),
    Number {
        min: i64,
        max: Option<i64>,
        step: i64,
    },
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub field: &'static str,
    pub prompt: &'static str,
    pub input: Input,
}

impl Choice {
    /// Whether a stored form value picks this option; numbers match their text form.
    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::String(text) => text == self.id,
            Value::Number(number) => number.to_string() == self.id,
            Value::Array(items) => items.iter().any(|item| self.matches(item)),
            _ => false,
        }
    }
}

const fn c(id: &'static str, label: &'static str) -> Choice {
    Choice { id, label }
}

const fn q(field: &'static str, prompt: &'static str, input: Input) -> Question {
    Question {
        field,
        prompt,
        input,
    }
}

const PURPOSES: &[Choice] = &[
    c("income", "Income Replacement"),
    c("mortgage", "Mortgage Protection"),
    c("final", "Final Expenses"),
    c("legacy", "Legacy Planning"),
];

const LIFE_1: &[Question] = &[q(
    PURPOSE,
    "What is the primary purpose of this coverage?",
    Input::Choice(PURPOSES),
)];

const COVERAGE_DURATIONS: &[Choice] = &[
    c("term10", "Specific Term (10 years)"),
    c("term20", "Specific Term (20 years)"),
    c("term30", "Specific Term (30 years)"),
    c("whole", "Whole Life/Permanent"),
];

const LIFE_2: &[Question] = &[
    q(
        COVERAGE_AMOUNT,
        "Estimated Coverage Amount",
        Input::Number {
            min: 100_000,
            max: Some(5_000_000),
            step: 50_000,
        },
    ),
    q(
        COVERAGE_DURATION,
        "How long do you need coverage?",
        Input::Choice(COVERAGE_DURATIONS),
    ),
];

const COVERED_PEOPLE: &[Choice] = &[
    c("individual", "Just Me"),
    c("couple", "Me + Spouse"),
    c("family", "Family (Me, Spouse, Children)"),
];

const HEALTH_1: &[Question] = &[q(
    WHO_NEEDS_COVERAGE,
    "Who needs coverage?",
    Input::Choice(COVERED_PEOPLE),
)];

const HEALTH_BENEFITS: &[Choice] = &[
    c("prescription", "Prescription Drugs"),
    c("dental", "Dental Care"),
    c("vision", "Vision Care"),
    c("paramedical", "Paramedical Services (Massage, Physio)"),
];

const HEALTH_2: &[Question] = &[q(
    BENEFITS,
    "Which specific benefits are most important? (select all that apply)",
    Input::MultiChoice(HEALTH_BENEFITS),
)];

const CRITICAL_1: &[Question] = &[q(
    FINANCIAL_SUPPORT,
    "How much financial support would you need if you couldn't work for 6 months due to illness?",
    Input::Number {
        min: 10_000,
        max: Some(200_000),
        step: 5_000,
    },
)];

const CONDITION_FOCI: &[Choice] = &[
    c("cancer", "Cancer coverage focus"),
    c("heart", "Heart condition focus"),
    c("comprehensive", "Comprehensive coverage"),
];

const CRITICAL_2: &[Question] = &[q(
    CONDITION_FOCUS,
    "What type of coverage focus do you prefer? (select all that apply)",
    Input::MultiChoice(CONDITION_FOCI),
)];

const DESTINATIONS: &[Choice] = &[
    c("outOfProvince", "Out-of-province (within Canada)"),
    c("usa", "United States"),
    c("international", "International (outside North America)"),
];

const TRAVEL_1: &[Question] = &[q(
    DESTINATION,
    "Where are you traveling?",
    Input::Choice(DESTINATIONS),
)];

const TRIP_DURATIONS: &[Choice] = &[
    c("1-7", "1-7 days"),
    c("8-14", "8-14 days"),
    c("15-30", "15-30 days"),
    c("31+", "31+ days"),
];

const TRIP_TYPES: &[Choice] = &[
    c("leisure", "Leisure/Vacation"),
    c("business", "Business"),
    c("family", "Family visit"),
    c("adventure", "Adventure/Sports"),
];

const TRAVEL_2: &[Question] = &[
    q(
        TRIP_DURATION,
        "How long is your trip?",
        Input::Choice(TRIP_DURATIONS),
    ),
    q(DEPARTURE_DATE, "When do you depart?", Input::Date),
    q(
        TRIP_TYPE,
        "What type of trip is this?",
        Input::Choice(TRIP_TYPES),
    ),
];

const TIME_HORIZONS: &[Choice] = &[
    c("short", "Less than 3 years"),
    c("medium", "3-7 years"),
    c("long", "7+ years"),
];

const FUNDS_1: &[Question] = &[q(
    TIME_HORIZON,
    "When do you plan to use this money?",
    Input::Choice(TIME_HORIZONS),
)];

const RISK_PROFILES: &[Choice] = &[
    c("low", "Low Risk Tolerance"),
    c("moderate-low", "Moderate-Low Risk Tolerance"),
    c("moderate", "Moderate Risk Tolerance"),
    c("moderate-high", "Moderate-High Risk Tolerance"),
    c("high", "High Risk Tolerance"),
];

const FUNDS_2: &[Question] = &[q(
    RISK_MANAGEMENT,
    "How would you describe your risk tolerance?",
    Input::Choice(RISK_PROFILES),
)];

const COMFORT_LEVELS: &[Choice] = &[
    c("1", "Conservative"),
    c("2", "Moderately Conservative"),
    c("3", "Moderate"),
    c("4", "Moderately Aggressive"),
    c("5", "Aggressive"),
];

const FUNDS_3: &[Question] = &[q(
    RISK_TOLERANCE,
    "Let's confirm your investment comfort level",
    Input::Choice(COMFORT_LEVELS),
)];

const RETIREMENT_1: &[Question] = &[
    q(
        CURRENT_AGE,
        "Current Age",
        Input::Number {
            min: 18,
            max: Some(75),
            step: 1,
        },
    ),
    q(
        RETIREMENT_AGE,
        "Target Retirement Age",
        Input::Number {
            min: 50,
            max: Some(80),
            step: 1,
        },
    ),
];

const CONTRIBUTION_STYLES: &[Choice] = &[
    c("lumpSum", "Lump Sum deposits"),
    c("monthly", "Regular Monthly Contributions"),
];

const RETIREMENT_2: &[Question] = &[q(
    CONTRIBUTION_STYLE,
    "How do you prefer to contribute?",
    Input::Choice(CONTRIBUTION_STYLES),
)];

const LIQUIDITY_OPTIONS: &[Choice] = &[
    c("cashable", "Yes, make it Cashable"),
    c("locked", "No, lock it in"),
];

const GICS_1: &[Question] = &[q(
    LIQUIDITY_NEEDS,
    "Do you need access to these funds before the term ends?",
    Input::Choice(LIQUIDITY_OPTIONS),
)];

const TERM_LENGTHS: &[Choice] = &[c("1", "1 year"), c("2", "2 years"), c("3", "3 years"), c("5", "5 years")];

const GICS_2: &[Question] = &[q(
    TERM_LENGTH,
    "Select your term length (years)",
    Input::Choice(TERM_LENGTHS),
)];

const EDUCATION_1: &[Question] = &[q(
    CHILD_BIRTH_YEAR,
    "What is the birth year of the child?",
    Input::Number {
        min: 2000,
        max: None,
        step: 1,
    },
)];

const EDUCATION_2: &[Question] = &[q(
    MONTHLY_CONTRIBUTION,
    "What is your monthly contribution goal to maximize government grants?",
    Input::Number {
        min: 50,
        max: Some(500),
        step: 10,
    },
)];

const SAVINGS_GOALS: &[Choice] = &[
    c("emergency", "Emergency Fund"),
    c("largePurchase", "Large Purchase (Car/Home)"),
    c("general", "General Savings"),
];

const SAVINGS_1: &[Question] = &[q(
    SAVINGS_GOAL,
    "What are you saving for?",
    Input::Choice(SAVINGS_GOALS),
)];

const WITHDRAWAL_FREQUENCIES: &[Choice] = &[
    c("rarely", "Rarely/Never"),
    c("sometimes", "A few times a year"),
    c("frequently", "Frequently"),
];

const SAVINGS_2: &[Question] = &[q(
    WITHDRAWAL_FREQUENCY,
    "How often will you need to withdraw money?",
    Input::Choice(WITHDRAWAL_FREQUENCIES),
)];

const TRANSACTION_VOLUMES: &[Choice] = &[
    c("low", "Low (Under 15 transactions)"),
    c("medium", "Medium (15-40 transactions)"),
    c("unlimited", "Unlimited"),
];

const CHEQUING_1: &[Question] = &[q(
    MONTHLY_TRANSACTIONS,
    "Estimate your monthly transactions (Debit, Bill Pay, Transfers)",
    Input::Choice(TRANSACTION_VOLUMES),
)];

const CHEQUING_FEATURES: &[Choice] = &[
    c("eTransfers", "Unlimited E-Transfers"),
    c("overdraft", "Overdraft Protection"),
    c("noMinimum", "No minimum balance requirement"),
];

const CHEQUING_2: &[Question] = &[q(
    FEATURES,
    "Must-Have Features (select all that apply)",
    Input::MultiChoice(CHEQUING_FEATURES),
)];

const REWARD_PRIORITIES: &[Choice] = &[
    c("rewards", "Maximize Rewards/Points"),
    c("cashback", "Prioritize Cash Back"),
    c("flexible", "Flexible Options"),
    c("simplicity", "Keep It Simple"),
];

const CARD_1: &[Question] = &[q(
    REWARDS_PRIORITY,
    "What matters most to you in earning rewards?",
    Input::Choice(REWARD_PRIORITIES),
)];

const ANNUAL_FEE_OPTIONS: &[Choice] = &[
    c("yes", "Yes, higher rewards with annual fee"),
    c("no", "No annual fee, standard rewards"),
];

const CARD_2: &[Question] = &[q(
    ANNUAL_FEE_PREFERENCE,
    "Are you willing to pay an annual fee for higher reward earning potential?",
    Input::Choice(ANNUAL_FEE_OPTIONS),
)];

const REWARD_TYPES: &[Choice] = &[
    c("cashBack", "Cash Back"),
    c("travel", "Travel Points/Miles"),
    c("lowInterest", "Low Interest Rate"),
];

const CARD_3: &[Question] = &[q(
    REWARD_PREFERENCE,
    "What is your primary reward preference?",
    Input::Choice(REWARD_TYPES),
)];

const BUYER_STATUSES: &[Choice] = &[
    c("firstTime", "First-Time Buyer"),
    c("renewing", "Renewing/Refinancing"),
    c("nextHome", "Buying Next Home/Investment"),
];

const MORTGAGE_1: &[Question] = &[q(
    BUYER_STATUS,
    "What is your current status?",
    Input::Choice(BUYER_STATUSES),
)];

const MORTGAGE_2: &[Question] = &[
    q(
        PURCHASE_PRICE,
        "Estimated Purchase Price",
        Input::Number {
            min: 0,
            max: None,
            step: 1000,
        },
    ),
    q(
        DOWN_PAYMENT,
        "Available Down Payment",
        Input::Number {
            min: 0,
            max: None,
            step: 1000,
        },
    ),
];

/// Questions shown on `sub_step` of `path`; empty for steps the path does not have.
pub fn questions(path: AssessmentPath, sub_step: u8) -> &'static [Question] {
    use AssessmentPath::*;

    match (path, sub_step) {
        (InsuranceLife, 1) => LIFE_1,
        (InsuranceLife, 2) => LIFE_2,
        (InsuranceHealth, 1) => HEALTH_1,
        (InsuranceHealth, 2) => HEALTH_2,
        (InsuranceCritical, 1) => CRITICAL_1,
        (InsuranceCritical, 2) => CRITICAL_2,
        (InsuranceTravel, 1) => TRAVEL_1,
        (InsuranceTravel, 2) => TRAVEL_2,
        (InvestingMutualFunds, 1) => FUNDS_1,
        (InvestingMutualFunds, 2) => FUNDS_2,
        (InvestingMutualFunds, 3) => FUNDS_3,
        (InvestingRetirement, 1) => RETIREMENT_1,
        (InvestingRetirement, 2) => RETIREMENT_2,
        (InvestingGics, 1) => GICS_1,
        (InvestingGics, 2) => GICS_2,
        (InvestingEducation, 1) => EDUCATION_1,
        (InvestingEducation, 2) => EDUCATION_2,
        (BankingSavings, 1) => SAVINGS_1,
        (BankingSavings, 2) => SAVINGS_2,
        (BankingChequing, 1) => CHEQUING_1,
        (BankingChequing, 2) => CHEQUING_2,
        (BankingCreditCard, 1) => CARD_1,
        (BankingCreditCard, 2) => CARD_2,
        (BankingCreditCard, 3) => CARD_3,
        (BankingMortgage, 1) => MORTGAGE_1,
        (BankingMortgage, 2) => MORTGAGE_2,
        _ => &[],
    }
}
