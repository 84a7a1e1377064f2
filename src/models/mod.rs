// Domain models: resource identity, request window/scope, series results

mod resource;
mod series;
mod window;

pub use resource::{HOST_MACHINE_RESOURCE_NAME, ResourceReference, ResourceType};
pub use series::{ChartData, NamedSeries, TimeSeries, TimeSeriesPoint};
pub use window::{ALL_HOSTS_SCOPE, Scope, TimeWindow};
