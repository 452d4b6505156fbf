// Keys the wizard itself keeps in the session context
pub mod session_keys {
    pub const CATEGORY: &str = "category";
    pub const SUB_CATEGORY: &str = "subCategory";
    /// Current needs-assessment sub-step, starting at 1
    pub const ASSESSMENT_STEP: &str = "assessmentStep";
    /// Path whose answers the assessment fields currently hold
    pub const ASSESSMENT_PATH: &str = "assessmentPath";
    /// Title of the product resolved on the last screen
    pub const RECOMMENDATION: &str = "recommendation";
}

// Needs-assessment answers, named as the form fields are
pub mod fields {
    pub const PURPOSE: &str = "purpose";
    pub const COVERAGE_AMOUNT: &str = "coverageAmount";
    pub const COVERAGE_DURATION: &str = "coverageDuration";
    pub const WHO_NEEDS_COVERAGE: &str = "whoNeedsCoverage";
    pub const BENEFITS: &str = "benefits";
    pub const FINANCIAL_SUPPORT: &str = "financialSupport";
    pub const CONDITION_FOCUS: &str = "conditionFocus";
    pub const DESTINATION: &str = "destination";
    pub const TRIP_DURATION: &str = "tripDuration";
    pub const DEPARTURE_DATE: &str = "departureDate";
    pub const TRIP_TYPE: &str = "tripType";
    pub const TIME_HORIZON: &str = "timeHorizon";
    pub const RISK_MANAGEMENT: &str = "riskManagement";
    pub const RISK_TOLERANCE: &str = "riskTolerance";
    pub const CURRENT_AGE: &str = "currentAge";
    pub const RETIREMENT_AGE: &str = "retirementAge";
    pub const CONTRIBUTION_STYLE: &str = "contributionStyle";
    pub const LIQUIDITY_NEEDS: &str = "liquidityNeeds";
    pub const TERM_LENGTH: &str = "termLength";
    pub const CHILD_BIRTH_YEAR: &str = "childBirthYear";
    pub const MONTHLY_CONTRIBUTION: &str = "monthlyContribution";
    pub const SAVINGS_GOAL: &str = "savingsGoal";
    pub const WITHDRAWAL_FREQUENCY: &str = "withdrawalFrequency";
    pub const MONTHLY_TRANSACTIONS: &str = "monthlyTransactions";
    pub const FEATURES: &str = "features";
    pub const REWARDS_PRIORITY: &str = "rewardsPriority";
    pub const ANNUAL_FEE_PREFERENCE: &str = "annualFeePreference";
    pub const REWARD_PREFERENCE: &str = "rewardPreference";
    pub const BUYER_STATUS: &str = "buyerStatus";
    pub const PURCHASE_PRICE: &str = "purchasePrice";
    pub const DOWN_PAYMENT: &str = "downPayment";

    /// Every answer field, across all paths
    pub const ALL: &[&str] = &[
        PURPOSE,
        COVERAGE_AMOUNT,
        COVERAGE_DURATION,
        WHO_NEEDS_COVERAGE,
        BENEFITS,
        FINANCIAL_SUPPORT,
        CONDITION_FOCUS,
        DESTINATION,
        TRIP_DURATION,
        DEPARTURE_DATE,
        TRIP_TYPE,
        TIME_HORIZON,
        RISK_MANAGEMENT,
        RISK_TOLERANCE,
        CURRENT_AGE,
        RETIREMENT_AGE,
        CONTRIBUTION_STYLE,
        LIQUIDITY_NEEDS,
        TERM_LENGTH,
        CHILD_BIRTH_YEAR,
        MONTHLY_CONTRIBUTION,
        SAVINGS_GOAL,
        WITHDRAWAL_FREQUENCY,
        MONTHLY_TRANSACTIONS,
        FEATURES,
        REWARDS_PRIORITY,
        ANNUAL_FEE_PREFERENCE,
        REWARD_PREFERENCE,
        BUYER_STATUS,
        PURCHASE_PRICE,
        DOWN_PAYMENT,
    ];
}
