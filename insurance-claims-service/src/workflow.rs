use std::sync::Arc;
use wizard_flow::{FlowRunner, Graph, GraphBuilder, SessionStorage, Task};

use crate::ledger::ClaimsLedger;
use crate::tasks::*;

pub const GRAPH_ID: &str = "claims_workflow";

/// dashboard → quiz → details → review → tracker, tracker loops home
pub fn build_claims_workflow(ledger: Arc<ClaimsLedger>) -> Graph {
    let dashboard_task = Arc::new(DashboardTask::new(ledger.clone()));
    let dashboard_id = dashboard_task.id().to_string();

    let quiz_task = Arc::new(SelectionQuizTask);
    let quiz_id = quiz_task.id().to_string();

    let details_task = Arc::new(ClaimDetailsTask);
    let details_id = details_task.id().to_string();

    let review_task = Arc::new(EstimateReviewTask::new(ledger.clone()));
    let review_id = review_task.id().to_string();

    let tracker_task = Arc::new(ProgressTrackerTask::new(ledger));
    let tracker_id = tracker_task.id().to_string();

    GraphBuilder::new(GRAPH_ID)
        .add_task(dashboard_task)
        .add_task(quiz_task)
        .add_task(details_task)
        .add_task(review_task)
        .add_task(tracker_task)
        .add_edge(&dashboard_id, &quiz_id)
        .add_edge(&quiz_id, &details_id)
        .add_edge(&details_id, &review_id)
        .add_edge(&review_id, &tracker_id)
        .set_initial_context(seed_draft)
        .build()
}

pub fn create_flow_runner(
    ledger: Arc<ClaimsLedger>,
    session_storage: Arc<dyn SessionStorage>,
) -> FlowRunner {
    let graph = Arc::new(build_claims_workflow(ledger));
    FlowRunner::new(graph, session_storage)
}
