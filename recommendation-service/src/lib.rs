//! Product recommendation wizard.
//!
//! Four screens: pick a category, narrow it to a product line, answer a short
//! questionnaire for that line, get one recommended product.

pub mod catalog;
pub mod estimates;
pub mod path;
pub mod questions;
pub mod tasks;
pub mod validation;
pub mod workflow;

pub use catalog::{Catalog, CatalogError, Recommendation};
pub use path::{AssessmentPath, Category};
pub use workflow::{build_recommendation_workflow, create_flow_runner};
