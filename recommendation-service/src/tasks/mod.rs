pub mod needs_assessment;
pub mod onboarding;
pub mod recommendation;
pub mod subcategory;
pub mod types;

pub use needs_assessment::NeedsAssessmentTask;
pub use onboarding::OnboardingTask;
pub use recommendation::RecommendationTask;
pub use subcategory::SubCategoryTask;
pub use types::{fields, session_keys};

use wizard_flow::Context;

use crate::path::{AssessmentPath, Category};

/// Screens in the wizard, for the progress header
pub const TOTAL_SCREENS: u8 = 4;

pub(crate) fn selected_category(context: &Context) -> Option<Category> {
    context
        .get_sync::<String>(session_keys::CATEGORY)
        .and_then(|category| category.parse().ok())
}

pub(crate) fn selected_path(context: &Context) -> Option<AssessmentPath> {
    let category = selected_category(context)?;
    let sub_category: String = context.get_sync(session_keys::SUB_CATEGORY)?;
    AssessmentPath::from_parts(category, &sub_category)
}

/// The selected path, once the subcategory screen has prepared its answers.
///
/// Editing `category` or `subCategory` afterwards leaves the prepared path
/// behind, and the new choice has to be confirmed on the subcategory screen.
pub(crate) fn prepared_path(context: &Context) -> Option<AssessmentPath> {
    let path = selected_path(context)?;
    let prepared = context
        .get_sync::<String>(session_keys::ASSESSMENT_PATH)
        .and_then(|key| AssessmentPath::from_key(&key))?;
    (prepared == path).then_some(path)
}

pub(crate) fn progress_header(screen: u8, title: &str) -> String {
    format!("[Step {screen} of {TOTAL_SCREENS}] {title}")
}
