// GET /chart/<type>/[<name>/]<property>?end=&duration=&scope=

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use super::AppState;
use super::error::ApiError;
use crate::error::ChartError;
use crate::models::{
    HOST_MACHINE_RESOURCE_NAME, ResourceReference, ResourceType, Scope, TimeWindow,
};

const PATH_SEPARATOR: char = '/';
const SUFFIX_SEPARATOR: char = '.';
const PAST_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Rejected chart path; `NotFound` for missing elements, `UnknownType` for bad types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartPathError {
    #[error("unable to locate resource property for: {0}")]
    MissingProperty(String),
    #[error("incorrect resource path elements specified to locate property for: {0}")]
    MissingElements(String),
    #[error("bad resource type specified in resource path: {0}")]
    UnknownType(String),
}

impl From<ChartPathError> for ApiError {
    fn from(e: ChartPathError) -> Self {
        match e {
            ChartPathError::UnknownType(_) => ApiError::BadRequest(e.to_string()),
            ChartPathError::MissingProperty(_) | ChartPathError::MissingElements(_) => {
                ApiError::NotFound(e.to_string())
            }
        }
    }
}

/// Parse `<type>/<name>/<property>` or `<type>/<property>` into a resource reference.
///
/// Host machine statistics always use the fixed `HostMachine` name. A file-style suffix
/// on the property (`HeapSizeCurrent.png`) is dropped.
pub fn parse_chart_path(path: &str) -> Result<ResourceReference, ChartPathError> {
    let tokens: Vec<&str> = path
        .split(PATH_SEPARATOR)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() <= 1 {
        return Err(ChartPathError::MissingProperty(path.to_string()));
    }

    let type_token = tokens[0];
    let (mut name, property) = if tokens.len() >= 3 {
        (Some(tokens[1]), tokens[2])
    } else {
        (None, tokens[1])
    };

    let resource_type = ResourceType::from_identifier(type_token);
    if resource_type == Some(ResourceType::HostMachine) {
        name = Some(HOST_MACHINE_RESOURCE_NAME);
    }
    if resource_type != Some(ResourceType::Core) && name.is_none() {
        return Err(ChartPathError::MissingElements(path.to_string()));
    }
    let Some(resource_type) = resource_type else {
        return Err(ChartPathError::UnknownType(path.to_string()));
    };

    let property = match property.rfind(SUFFIX_SEPARATOR) {
        Some(pos) if pos > 1 => &property[..pos],
        _ => property,
    };

    ResourceReference::new(resource_type, name.map(str::to_string), property)
        .map_err(|_| ChartPathError::MissingElements(path.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ChartQuery {
    end: Option<String>,
    duration: Option<String>,
    scope: Option<String>,
}

pub(super) async fn chart_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Response, ApiError> {
    let resource = parse_chart_path(&path)?;
    let window = parse_window(&query, &state)?;
    let scope = query.scope.as_deref().map(Scope::parse).unwrap_or_default();

    let aggregator = state.aggregator.clone();
    let result = tokio::task::spawn_blocking(move || {
        aggregator
            .collect(&resource, &window, &scope)
            .map(|data| (resource, data))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("chart task failed: {}", e)))?;

    match result {
        Ok((resource, data)) => {
            info!(
                resource_type = %resource.resource_type(),
                property = resource.property_name(),
                host_count = data.host_count,
                "chart data served"
            );
            Ok((
                StatusCode::OK,
                [
                    (header::PRAGMA, "no-cache"),
                    (header::CACHE_CONTROL, "no-cache"),
                    (header::EXPIRES, PAST_DATE),
                ],
                Json(data),
            )
                .into_response())
        }
        Err(e) => {
            error!(error = %e, path = %path, "chart data retrieval failed");
            Err(e.into())
        }
    }
}

// Every storage read failure is a server error. Writes to a client that has gone away
// happen after the handler returns and are handled by the server connection.
impl From<ChartError> for ApiError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::Topology(e) => ApiError::Topology(e.to_string()),
            ChartError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

fn parse_window(query: &ChartQuery, state: &AppState) -> Result<TimeWindow, ApiError> {
    let end = match query.end.as_deref() {
        Some(s) => s.trim().parse::<NaiveDateTime>().map_err(|e| {
            ApiError::BadRequest(format!(
                "invalid end {:?} (expected YYYY-MM-DDTHH:MM:SS): {}",
                s, e
            ))
        })?,
        None => chrono::Local::now().naive_local(),
    };

    let max = state.config.chart.max_duration_mins;
    let duration_mins = match query.duration.as_deref() {
        Some(s) => s
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|d| (1..=max).contains(d))
            .ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "invalid duration {:?} (minutes, 1..={})",
                    s, max
                ))
            })?,
        None => state.config.chart.default_duration_mins,
    };

    TimeWindow::ending_at(end, duration_mins).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_segments_are_type_name_property() {
        let r = parse_chart_path("datasource/OrdersPool/ActiveConnectionsCurrentCount").unwrap();
        assert_eq!(r.resource_type(), ResourceType::DataSource);
        assert_eq!(r.resource_name(), Some("OrdersPool"));
        assert_eq!(r.property_name(), "ActiveConnectionsCurrentCount");
    }

    #[test]
    fn core_takes_two_segments() {
        let r = parse_chart_path("/core/OpenSocketsCurrentCount").unwrap();
        assert_eq!(r.resource_type(), ResourceType::Core);
        assert_eq!(r.resource_name(), None);
    }

    #[test]
    fn hostmachine_uses_fixed_name() {
        let r = parse_chart_path("hostmachine/ProcessorLoad").unwrap();
        assert_eq!(r.resource_name(), Some(HOST_MACHINE_RESOURCE_NAME));
        let r = parse_chart_path("hostmachine/anything/ProcessorLoad").unwrap();
        assert_eq!(r.resource_name(), Some(HOST_MACHINE_RESOURCE_NAME));
    }

    #[test]
    fn property_suffix_is_stripped() {
        let r = parse_chart_path("core/HeapSizeCurrent.png").unwrap();
        assert_eq!(r.property_name(), "HeapSizeCurrent");
        // A dot in the first two characters is part of the name.
        let r = parse_chart_path("core/a.b").unwrap();
        assert_eq!(r.property_name(), "a.b");
    }

    #[test]
    fn missing_elements_are_not_found() {
        assert!(matches!(
            parse_chart_path("core"),
            Err(ChartPathError::MissingProperty(_))
        ));
        assert!(matches!(
            parse_chart_path(""),
            Err(ChartPathError::MissingProperty(_))
        ));
        assert!(matches!(
            parse_chart_path("destination/MessagesCurrentCount"),
            Err(ChartPathError::MissingElements(_))
        ));
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        use std::io;
        for kind in [
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::BrokenPipe,
            io::ErrorKind::PermissionDenied,
        ] {
            let err = ChartError::Io(io::Error::from(kind));
            assert!(matches!(ApiError::from(err), ApiError::Internal(_)), "{kind:?}");
        }
        let err = ChartError::Topology(crate::error::TopologyError::Query("timeout".into()));
        assert!(matches!(ApiError::from(err), ApiError::Topology(_)));
    }

    #[test]
    fn unknown_type_is_bad_request() {
        let err = parse_chart_path("jvm/Heap/Used").unwrap_err();
        assert!(matches!(err, ChartPathError::UnknownType(_)));
        assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
    }
}
