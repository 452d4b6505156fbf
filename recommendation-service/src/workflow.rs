use std::sync::Arc;
use wizard_flow::{FlowRunner, Graph, GraphBuilder, SessionStorage, Task};

use crate::catalog::Catalog;
use crate::tasks::*;

pub const GRAPH_ID: &str = "recommendation_workflow";

/// onboarding → subcategory → needs assessment → recommendation
pub fn build_recommendation_workflow(catalog: Arc<Catalog>) -> Graph {
    let onboarding_task = Arc::new(OnboardingTask);
    let onboarding_id = onboarding_task.id().to_string();

    let subcategory_task = Arc::new(SubCategoryTask);
    let subcategory_id = subcategory_task.id().to_string();

    let assessment_task = Arc::new(NeedsAssessmentTask);
    let assessment_id = assessment_task.id().to_string();

    let recommendation_task = Arc::new(RecommendationTask::new(catalog));
    let recommendation_id = recommendation_task.id().to_string();

    GraphBuilder::new(GRAPH_ID)
        .add_task(onboarding_task)
        .add_task(subcategory_task)
        .add_task(assessment_task)
        .add_task(recommendation_task)
        .add_edge(&onboarding_id, &subcategory_id)
        .add_edge(&subcategory_id, &assessment_id)
        .add_edge(&assessment_id, &recommendation_id)
        .build()
}

pub fn create_flow_runner(catalog: Arc<Catalog>, session_storage: Arc<dyn SessionStorage>) -> FlowRunner {
    let graph = Arc::new(build_recommendation_workflow(catalog));
    FlowRunner::new(graph, session_storage)
}
