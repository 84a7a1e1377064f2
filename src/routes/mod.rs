// HTTP routes

mod chart;
mod error;
mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::SeriesAggregator;
use crate::config::AppConfig;
use crate::statistics_repo::StatisticsRepo;
use crate::topology::StaticTopology;

pub use chart::{ChartPathError, parse_chart_path};

/// Aggregator wired to the configured host list and the on-disk statistics tree.
pub type ChartAggregator = SeriesAggregator<StaticTopology, StatisticsRepo>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<ChartAggregator>,
    pub(crate) config: AppConfig,
}

pub fn app(aggregator: Arc<ChartAggregator>, config: AppConfig) -> Router {
    let state = AppState { aggregator, config };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/hosts", get(http::hosts_handler)) // GET /api/hosts
        .route("/chart/{*path}", get(chart::chart_handler)) // GET /chart/<type>/[<name>/]<property>
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
