use std::sync::Arc;

use crate::briefing::BriefingOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<BriefingOrchestrator>,
}
