// Resource identity: which resource type/name/property a chart plots

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResourceError;

/// Fixed resource name used for host machine statistics (there is one per host).
pub const HOST_MACHINE_RESOURCE_NAME: &str = "HostMachine";

/// Kind of monitored resource; serializes to its lowercase identifier (e.g. "datasource").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Core,
    DataSource,
    Destination,
    WebApp,
    HostMachine,
}

impl ResourceType {
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Core,
        ResourceType::DataSource,
        ResourceType::Destination,
        ResourceType::WebApp,
        ResourceType::HostMachine,
    ];

    /// Parse from a URL path segment or directory name (e.g. "destination").
    pub fn from_identifier(s: &str) -> Option<Self> {
        match s {
            "core" => Some(ResourceType::Core),
            "datasource" => Some(ResourceType::DataSource),
            "destination" => Some(ResourceType::Destination),
            "webapp" => Some(ResourceType::WebApp),
            "hostmachine" => Some(ResourceType::HostMachine),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Core => "core",
            ResourceType::DataSource => "datasource",
            ResourceType::Destination => "destination",
            ResourceType::WebApp => "webapp",
            ResourceType::HostMachine => "hostmachine",
        }
    }

    /// Only the server core is a singleton; every other type needs a resource name.
    pub fn requires_name(&self) -> bool {
        !matches!(self, ResourceType::Core)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (type, name, property) triple identifying one metric to plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawResourceReference")]
pub struct ResourceReference {
    resource_type: ResourceType,
    resource_name: Option<String>,
    property_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceReference {
    resource_type: ResourceType,
    #[serde(default)]
    resource_name: Option<String>,
    property_name: String,
}

impl TryFrom<RawResourceReference> for ResourceReference {
    type Error = ResourceError;

    fn try_from(raw: RawResourceReference) -> Result<Self, Self::Error> {
        Self::new(raw.resource_type, raw.resource_name, raw.property_name)
    }
}

impl ResourceReference {
    pub fn new(
        resource_type: ResourceType,
        resource_name: Option<String>,
        property_name: impl Into<String>,
    ) -> Result<Self, ResourceError> {
        let property_name = property_name.into();
        if property_name.trim().is_empty() {
            return Err(ResourceError::MissingProperty);
        }
        let resource_name = resource_name.filter(|n| !n.trim().is_empty());
        if resource_type.requires_name() && resource_name.is_none() {
            return Err(ResourceError::MissingName(resource_type));
        }
        Ok(Self {
            resource_type,
            resource_name,
            property_name,
        })
    }

    /// Reference to a property of the singleton core resource.
    pub fn core(property_name: impl Into<String>) -> Result<Self, ResourceError> {
        Self::new(ResourceType::Core, None, property_name)
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}
