use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use wizard_flow::Context;

use crate::tasks::session_keys;

/// Kind of expense being claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimCategory {
    Dental,
    Vision,
    Physio,
    Drug,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 4] = [
        ClaimCategory::Dental,
        ClaimCategory::Vision,
        ClaimCategory::Physio,
        ClaimCategory::Drug,
    ];

    /// Form value for this category
    pub fn id(self) -> &'static str {
        match self {
            ClaimCategory::Dental => "dental",
            ClaimCategory::Vision => "vision",
            ClaimCategory::Physio => "physio",
            ClaimCategory::Drug => "drug",
        }
    }

    /// Label on the selection tiles
    pub fn tile_name(self) -> &'static str {
        match self {
            ClaimCategory::Dental => "Dental",
            ClaimCategory::Vision => "Vision",
            ClaimCategory::Physio => "Physio",
            ClaimCategory::Drug => "Prescription",
        }
    }

    /// Name used in the claim list
    pub fn record_name(self) -> &'static str {
        match self {
            ClaimCategory::Dental => "Dental",
            ClaimCategory::Vision => "Vision",
            ClaimCategory::Physio => "Physiotherapy",
            ClaimCategory::Drug => "Prescription",
        }
    }

    /// Name of the service on the details, review and tracker screens
    pub fn service_name(self) -> &'static str {
        match self {
            ClaimCategory::Dental => "Dental Care",
            ClaimCategory::Vision => "Vision Care",
            ClaimCategory::Physio => "Physiotherapy",
            ClaimCategory::Drug => "Prescription Medication",
        }
    }

    pub fn coverage_bucket(self) -> CoverageBucket {
        match self {
            ClaimCategory::Dental => CoverageBucket::Dental,
            ClaimCategory::Vision => CoverageBucket::Vision,
            ClaimCategory::Physio | ClaimCategory::Drug => CoverageBucket::Paramedical,
        }
    }
}

impl FromStr for ClaimCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimCategory::ALL
            .into_iter()
            .find(|category| category.id() == s.trim())
            .ok_or(())
    }
}

/// Benefit pool a claim draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageBucket {
    Dental,
    Vision,
    Paramedical,
}

impl CoverageBucket {
    pub const ALL: [CoverageBucket; 3] = [
        CoverageBucket::Dental,
        CoverageBucket::Vision,
        CoverageBucket::Paramedical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CoverageBucket::Dental => "Dental",
            CoverageBucket::Vision => "Vision",
            CoverageBucket::Paramedical => "Paramedical",
        }
    }
}

/// Plan member the claim is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimFor {
    #[serde(rename = "Self")]
    Myself,
    Spouse,
    Child,
}

impl ClaimFor {
    pub const ALL: [ClaimFor; 3] = [ClaimFor::Myself, ClaimFor::Spouse, ClaimFor::Child];

    pub fn label(self) -> &'static str {
        match self {
            ClaimFor::Myself => "Self",
            ClaimFor::Spouse => "Spouse",
            ClaimFor::Child => "Child",
        }
    }
}

impl fmt::Display for ClaimFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimFor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimFor::ALL
            .into_iter()
            .find(|claim_for| claim_for.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

pub const PHYSIO_TYPES: [&str; 5] = [
    "Sports Injury",
    "Chronic Pain",
    "Post-Surgery",
    "Mobility Issues",
    "Other",
];

/// Attached receipt. Only the handle is kept, never the file content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl Receipt {
    /// Size as shown under the file name, e.g. `12.3 KB`
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }
}

/// Claim amount typed into the details form.
///
/// Accepts a JSON number or numeric text. Anything that is not a finite,
/// non-negative number is treated as not entered.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Typed view of the in-progress claim held in the session context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimDraft {
    pub category: Option<ClaimCategory>,
    pub claim_for: Option<ClaimFor>,
    pub physio_type: Option<String>,
    pub amount: Option<f64>,
    pub provider_name: String,
    pub service_date: String,
    pub receipts: Vec<Receipt>,
}

impl ClaimDraft {
    pub fn from_context(context: &Context) -> Self {
        let text = |key: &str| match context.get_value(key) {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };

        Self {
            category: text(session_keys::CATEGORY).parse().ok(),
            claim_for: text(session_keys::CLAIM_FOR).parse().ok(),
            physio_type: Some(text(session_keys::PHYSIO_TYPE)).filter(|kind| !kind.is_empty()),
            amount: context
                .get_value(session_keys::AMOUNT)
                .as_ref()
                .and_then(parse_amount),
            provider_name: text(session_keys::PROVIDER_NAME),
            service_date: text(session_keys::SERVICE_DATE),
            receipts: context.get_sync(session_keys::RECEIPTS).unwrap_or_default(),
        }
    }

    /// Gate of the selection quiz
    pub fn selection_complete(&self) -> bool {
        self.category.is_some() && self.claim_for.is_some()
    }

    /// Gate of the details form
    pub fn details_complete(&self) -> bool {
        self.category.is_some() && self.missing_details().is_empty()
    }

    /// Details-form fields still blocking Continue
    pub fn missing_details(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.category == Some(ClaimCategory::Physio)
            && !self
                .physio_type
                .as_deref()
                .is_some_and(|kind| PHYSIO_TYPES.contains(&kind))
        {
            missing.push(session_keys::PHYSIO_TYPE);
        }
        if self.amount.is_none() {
            missing.push(session_keys::AMOUNT);
        }
        if self.provider_name.is_empty() {
            missing.push(session_keys::PROVIDER_NAME);
        }
        if self.service_date.is_empty() {
            missing.push(session_keys::SERVICE_DATE);
        }
        missing
    }
}
