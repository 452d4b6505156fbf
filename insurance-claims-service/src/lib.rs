//! Health benefits claim filer.
//!
//! A five screen wizard over a shared claims ledger: pick what the claim is
//! for, enter the details, review the 80% coverage estimate, submit, track.

pub mod estimator;
pub mod ledger;
pub mod models;
pub mod receipts;
pub mod tasks;
pub mod workflow;

pub use estimator::{Estimate, estimate};
pub use ledger::{ClaimError, ClaimRecord, ClaimStatus, ClaimsLedger, CoverageLedger};
pub use models::{ClaimCategory, ClaimDraft, ClaimFor, Receipt};
pub use receipts::ReceiptCommands;
pub use workflow::{build_claims_workflow, create_flow_runner};
