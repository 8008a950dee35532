use std::sync::Arc;

use crate::calculate::DivergenceAnalyzer;
use crate::provider::RegionalRateProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RegionalRateProvider>,
    pub analyzer: Arc<DivergenceAnalyzer>,
}
