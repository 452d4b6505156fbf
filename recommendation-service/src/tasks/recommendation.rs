use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use wizard_flow::{Context, NextAction, Result, Task, TaskResult};

use super::{progress_header, session_keys};
use crate::catalog::{Catalog, Recommendation};

/// Last screen: the product that best matches the chosen path
pub struct RecommendationTask {
    catalog: Arc<Catalog>,
}

impl RecommendationTask {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    fn resolve(&self, context: &Context) -> &Recommendation {
        let category: String = context.get_sync(session_keys::CATEGORY).unwrap_or_default();
        let sub_category: String = context
            .get_sync(session_keys::SUB_CATEGORY)
            .unwrap_or_default();
        self.catalog.resolve(&category, &sub_category)
    }
}

#[async_trait]
impl Task for RecommendationTask {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let recommendation = self.resolve(&context);
        context
            .set(session_keys::RECOMMENDATION, &recommendation.title)
            .await;

        info!(task_id = %self.id(), product = %recommendation.title, "recommendation resolved");

        Ok(TaskResult::new_with_status(
            Some(format!("Your best match: {}", recommendation.title)),
            NextAction::End,
            Some("Recommendation ready".to_string()),
        ))
    }

    fn render(&self, context: &Context) -> String {
        let product = self.resolve(context);

        let mut out = progress_header(4, "Your personalized recommendation");
        out.push_str(&format!("\n\n** Best Match **\n{}\n{}\n\n", product.title, product.subtitle));
        out.push_str(&format!("{}\n\n", product.description));
        for feature in &product.features {
            out.push_str(&format!("  * {feature}\n"));
        }
        out.push_str(&format!("\n{}\n", product.estimated_cost));
        out.push_str("restart to start over");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task() -> RecommendationTask {
        RecommendationTask::new(Arc::new(Catalog::load().unwrap()))
    }

    #[tokio::test]
    async fn stores_the_resolved_title_and_ends() {
        let context = Context::new();
        context.set(session_keys::CATEGORY, "Banking").await;
        context.set(session_keys::SUB_CATEGORY, "credit-card").await;

        let result = task().run(context.clone()).await.unwrap();
        assert_eq!(result.next_action, NextAction::End);
        assert_eq!(
            context.get_value(session_keys::RECOMMENDATION),
            Some(json!("Manulife Cashback Rewards Card"))
        );
    }

    #[test]
    fn renders_the_default_card_for_an_empty_session() {
        let screen = task().render(&Context::new());
        assert!(screen.contains("Manulife Term Life Insurance"));
        assert!(screen.contains("Starting at $25/month"));
    }
}
