use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

use crate::tasks::types::fields;

/// Top level product family picked on the onboarding screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Insurance,
    Investing,
    Banking,
}

/// A subcategory choice as offered on the second screen
#[derive(Debug, Clone, Copy)]
pub struct SubCategoryOption {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn option(id: &'static str, title: &'static str, description: &'static str) -> SubCategoryOption {
    SubCategoryOption {
        id,
        title,
        description,
    }
}

const INSURANCE_OPTIONS: [SubCategoryOption; 4] = [
    option("life", "Life Insurance", "Financial protection for your loved ones"),
    option("health", "Health Insurance", "Coverage for medical and dental expenses"),
    option("travel", "Travel Insurance", "Protection for your trips abroad"),
    option("critical", "Critical Illness", "Support for major health events"),
];

const INVESTING_OPTIONS: [SubCategoryOption; 4] = [
    option("mutual-funds", "Mutual Funds", "Diversified investment portfolios"),
    option("retirement", "Retirement Plans", "Build wealth for your future"),
    option("gics", "GICs", "Guaranteed investment certificates"),
    option("education", "Education Savings", "Save for your child's education"),
];

const BANKING_OPTIONS: [SubCategoryOption; 4] = [
    option("savings", "Savings Account", "High-interest savings options"),
    option("chequing", "Chequing Account", "Everyday banking made easy"),
    option("credit-card", "Credit Card", "Earn rewards on purchases"),
    option("mortgage", "Mortgage", "Finance your dream home"),
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Insurance, Category::Investing, Category::Banking];

    pub fn name(self) -> &'static str {
        match self {
            Category::Insurance => "Insurance",
            Category::Investing => "Investing",
            Category::Banking => "Banking",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Category::Insurance => "Protect what matters most",
            Category::Investing => "Grow your wealth",
            Category::Banking => "Manage your money",
        }
    }

    pub fn sub_categories(self) -> &'static [SubCategoryOption] {
        match self {
            Category::Insurance => &INSURANCE_OPTIONS,
            Category::Investing => &INVESTING_OPTIONS,
            Category::Banking => &BANKING_OPTIONS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A (category, subcategory) pair. Selects both the questions asked and the
/// product recommended at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssessmentPath {
    InsuranceLife,
    InsuranceHealth,
    InsuranceTravel,
    InsuranceCritical,
    InvestingMutualFunds,
    InvestingRetirement,
    InvestingGics,
    InvestingEducation,
    BankingSavings,
    BankingChequing,
    BankingCreditCard,
    BankingMortgage,
}

impl AssessmentPath {
    pub const ALL: [AssessmentPath; 12] = [
        AssessmentPath::InsuranceLife,
        AssessmentPath::InsuranceHealth,
        AssessmentPath::InsuranceTravel,
        AssessmentPath::InsuranceCritical,
        AssessmentPath::InvestingMutualFunds,
        AssessmentPath::InvestingRetirement,
        AssessmentPath::InvestingGics,
        AssessmentPath::InvestingEducation,
        AssessmentPath::BankingSavings,
        AssessmentPath::BankingChequing,
        AssessmentPath::BankingCreditCard,
        AssessmentPath::BankingMortgage,
    ];

    /// Path used whenever a pair cannot be resolved
    pub const FALLBACK: AssessmentPath = AssessmentPath::InsuranceLife;

    pub fn category(self) -> Category {
        use AssessmentPath::*;
        match self {
            InsuranceLife | InsuranceHealth | InsuranceTravel | InsuranceCritical => {
                Category::Insurance
            }
            InvestingMutualFunds | InvestingRetirement | InvestingGics | InvestingEducation => {
                Category::Investing
            }
            BankingSavings | BankingChequing | BankingCreditCard | BankingMortgage => {
                Category::Banking
            }
        }
    }

    pub fn sub_category_id(self) -> &'static str {
        use AssessmentPath::*;
        match self {
            InsuranceLife => "life",
            InsuranceHealth => "health",
            InsuranceTravel => "travel",
            InsuranceCritical => "critical",
            InvestingMutualFunds => "mutual-funds",
            InvestingRetirement => "retirement",
            InvestingGics => "gics",
            InvestingEducation => "education",
            BankingSavings => "savings",
            BankingChequing => "chequing",
            BankingCreditCard => "credit-card",
            BankingMortgage => "mortgage",
        }
    }

    pub fn from_parts(category: Category, sub_category: &str) -> Option<Self> {
        // Older front ends spelled this one in camel case
        let sub_category = match sub_category.trim() {
            "creditCard" => "credit-card",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|path| path.category() == category && path.sub_category_id() == sub_category)
    }

    pub fn parse(category: &str, sub_category: &str) -> Option<Self> {
        let category = category.parse().ok()?;
        Self::from_parts(category, sub_category)
    }

    /// Parse the `Category-subcategory` form used as catalog keys.
    pub fn from_key(key: &str) -> Option<Self> {
        let (category, sub_category) = key.split_once('-')?;
        Self::parse(category, sub_category)
    }

    /// Number of needs-assessment sub-steps on this path
    pub fn total_sub_steps(self) -> u8 {
        match self {
            AssessmentPath::InvestingMutualFunds | AssessmentPath::BankingCreditCard => 3,
            _ => 2,
        }
    }

    /// Field values a fresh assessment starts with, so sliders begin at a
    /// sensible position before the user touches them.
    pub fn defaults(self) -> Vec<(&'static str, Value)> {
        match self {
            AssessmentPath::InsuranceLife => vec![(fields::COVERAGE_AMOUNT, json!(500_000))],
            AssessmentPath::InsuranceCritical => vec![(fields::FINANCIAL_SUPPORT, json!(50_000))],
            AssessmentPath::InvestingMutualFunds => vec![(fields::RISK_TOLERANCE, json!(3))],
            AssessmentPath::InvestingEducation => vec![(fields::MONTHLY_CONTRIBUTION, json!(208))],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for AssessmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category(), self.sub_category_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_path_round_trips_through_its_key() {
        for path in AssessmentPath::ALL {
            assert_eq!(AssessmentPath::from_key(&path.to_string()), Some(path));
        }
    }

    #[test]
    fn sub_categories_match_paths() {
        for category in Category::ALL {
            for option in category.sub_categories() {
                let path = AssessmentPath::from_parts(category, option.id).unwrap();
                assert_eq!(path.category(), category);
            }
        }
    }

    #[test]
    fn rejects_mismatched_pairs() {
        assert_eq!(AssessmentPath::parse("Banking", "life"), None);
        assert_eq!(AssessmentPath::parse("Pets", "life"), None);
        assert_eq!(
            AssessmentPath::parse("Banking", "creditCard"),
            Some(AssessmentPath::BankingCreditCard)
        );
        assert_eq!(
            AssessmentPath::from_key("Investing-mutual-funds"),
            Some(AssessmentPath::InvestingMutualFunds)
        );
    }

    #[test]
    fn three_step_paths() {
        let long: Vec<_> = AssessmentPath::ALL
            .into_iter()
            .filter(|path| path.total_sub_steps() == 3)
            .collect();
        assert_eq!(
            long,
            vec![AssessmentPath::InvestingMutualFunds, AssessmentPath::BankingCreditCard]
        );
    }
}
