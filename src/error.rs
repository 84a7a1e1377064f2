// Error types for chart data retrieval

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

use crate::models::ResourceType;

/// Invalid resource reference (rejected before any file is touched).
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource name required for resource type {0}")]
    MissingName(ResourceType),

    #[error("resource property not specified")]
    MissingProperty,
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window start {start} is after window end {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("window of {duration_mins} minutes ending at {end} starts before the earliest date")]
    OutOfRange {
        end: NaiveDateTime,
        duration_mins: u32,
    },
}

/// Failure to enumerate the live hosts of the cluster.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("management endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("host list query failed: {0}")]
    Query(String),
}

/// Errors surfaced by `SeriesAggregator::collect`. Missing files and columns are not errors.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("topology: {0}")]
    Topology(#[from] TopologyError),

    #[error("statistics I/O: {0}")]
    Io(#[from] io::Error),
}
