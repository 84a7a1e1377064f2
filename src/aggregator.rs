// Multi-host series retrieval: decides which hosts contribute and assembles the chart dataset.

use chrono::NaiveDate;
use std::io::{self, BufRead};
use tracing::{debug, instrument};

use crate::error::{ChartError, TopologyError};
use crate::extractor::SeriesExtractor;
use crate::models::{
    ChartData, NamedSeries, ResourceReference, ResourceType, Scope, TimeSeries, TimeWindow,
};

/// Source of the hosts currently live in the cluster, in display order.
pub trait TopologyProvider: Send + Sync {
    fn list_hosts(&self) -> Result<Vec<String>, TopologyError>;
}

/// Maps a resource + host + date to its statistics file and metric column.
///
/// Both lookups return `Ok(None)` when the file or column does not exist; `Err` is
/// reserved for unexpected I/O failures.
pub trait StatisticsLocator: Send + Sync {
    type Reader: BufRead;

    fn resolve_file(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
    ) -> io::Result<Option<Self::Reader>>;

    fn resolve_column_index(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
        property: &str,
    ) -> io::Result<Option<usize>>;
}

pub struct SeriesAggregator<T, L> {
    topology: T,
    locator: L,
    extractor: SeriesExtractor,
}

impl<T: TopologyProvider, L: StatisticsLocator> SeriesAggregator<T, L> {
    pub fn new(topology: T, locator: L, extractor: SeriesExtractor) -> Self {
        Self {
            topology,
            locator,
            extractor,
        }
    }

    pub fn topology(&self) -> &T {
        &self.topology
    }

    /// One named series per contributing host plus the number of hosts displayed.
    ///
    /// With `Scope::AllHosts` every host from the topology appears in its order, even
    /// when it has no statistics for this resource (its series is then empty).
    #[instrument(
        skip(self, resource, window),
        fields(
            resource_type = %resource.resource_type(),
            resource_name = resource.resource_name().unwrap_or(""),
            property = resource.property_name(),
        )
    )]
    pub fn collect(
        &self,
        resource: &ResourceReference,
        window: &TimeWindow,
        scope: &Scope,
    ) -> Result<ChartData, ChartError> {
        match scope {
            Scope::AllHosts => {
                let hosts = self.topology.list_hosts()?;
                let mut series = Vec::with_capacity(hosts.len());
                for host in hosts {
                    let points = self.host_series(resource, window, &host)?;
                    series.push(NamedSeries {
                        label: host,
                        points,
                    });
                }
                let host_count = series.len();
                Ok(ChartData { series, host_count })
            }
            Scope::Host(host) => {
                let points = self.host_series(resource, window, host)?;
                Ok(ChartData {
                    series: vec![NamedSeries {
                        label: host.clone(),
                        points,
                    }],
                    host_count: 1,
                })
            }
        }
    }

    /// Series for one host; an empty series when its file or column is missing.
    fn host_series(
        &self,
        resource: &ResourceReference,
        window: &TimeWindow,
        host: &str,
    ) -> Result<TimeSeries, ChartError> {
        let resource_type = resource.resource_type();
        let resource_name = resource.resource_name();
        let as_of = window.end().date();

        let Some(reader) = self
            .locator
            .resolve_file(resource_type, resource_name, host, as_of)?
        else {
            debug!(host, %as_of, "no statistics file");
            return Ok(TimeSeries::new());
        };

        let Some(column) = self.locator.resolve_column_index(
            resource_type,
            resource_name,
            host,
            as_of,
            resource.property_name(),
        )?
        else {
            debug!(host, %as_of, "property column not found");
            return Ok(TimeSeries::new());
        };

        let series = self.extractor.extract(reader, window, column)?;
        debug!(host, points = series.len(), "extracted series");
        Ok(series)
    }
}
