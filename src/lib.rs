// Library for the binary and tests

pub mod aggregator;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod normalizer;
pub mod routes;
pub mod statistics_repo;
pub mod topology;
pub mod version;

pub use aggregator::{SeriesAggregator, StatisticsLocator, TopologyProvider};
pub use error::{ChartError, TopologyError};
pub use extractor::SeriesExtractor;
pub use normalizer::normalize;
