pub mod claim_details;
pub mod dashboard;
pub mod estimate_review;
pub mod progress_tracker;
pub mod selection_quiz;
pub mod types;

pub use claim_details::ClaimDetailsTask;
pub use dashboard::DashboardTask;
pub use estimate_review::EstimateReviewTask;
pub use progress_tracker::ProgressTrackerTask;
pub use selection_quiz::SelectionQuizTask;
pub use types::session_keys;

use wizard_flow::Context;

use crate::models::ClaimFor;

/// Values a fresh claim draft starts with
pub fn seed_draft(context: &Context) {
    context.set_sync(session_keys::CATEGORY, "");
    context.set_sync(session_keys::CLAIM_FOR, ClaimFor::Myself);
}

/// Throw away the current draft and start a blank one
pub async fn reset_draft(context: &Context) {
    for key in session_keys::DRAFT {
        context.remove(key).await;
    }
    seed_draft(context);
}

pub(crate) fn money(amount: f64) -> String {
    format!("${amount:.2}")
}
