// Statistics files on disk, one directory per day and host:
//
//   <base>/<YYYY-MM-DD>/<host>/core.csv
//   <base>/<YYYY-MM-DD>/<host>/<type>/<normalised resource name>.csv
//
// The first line of each file is a header naming the columns ("DateTime,<property>,...").

use chrono::NaiveDate;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crate::aggregator::StatisticsLocator;
use crate::models::ResourceType;
use crate::normalizer::normalize;

const CSV_EXTENSION: &str = "csv";
const CORE_FILE_STEM: &str = "core";
const HEADER_SEPARATOR: char = ',';

/// Read-only view of the statistics directory tree.
#[derive(Debug, Clone)]
pub struct StatisticsRepo {
    base_path: PathBuf,
}

impl StatisticsRepo {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the statistics file for a resource on a host and day, or `None` when the
    /// host or name cannot form a single safe path component.
    pub fn file_path(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
    ) -> Option<PathBuf> {
        if !is_safe_component(host) {
            return None;
        }
        let mut path = self
            .base_path
            .join(as_of.format("%Y-%m-%d").to_string())
            .join(host);
        match resource_type {
            ResourceType::Core => path.push(format!("{CORE_FILE_STEM}.{CSV_EXTENSION}")),
            _ => {
                let name = normalize(resource_type, resource_name?);
                if !is_safe_component(&name) {
                    return None;
                }
                path.push(resource_type.as_str());
                path.push(format!("{name}.{CSV_EXTENSION}"));
            }
        }
        Some(path)
    }

    fn open(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
    ) -> io::Result<Option<BufReader<File>>> {
        let Some(path) = self.file_path(resource_type, resource_name, host, as_of) else {
            return Ok(None);
        };
        match File::open(&path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl StatisticsLocator for StatisticsRepo {
    type Reader = BufReader<File>;

    fn resolve_file(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
    ) -> io::Result<Option<Self::Reader>> {
        self.open(resource_type, resource_name, host, as_of)
    }

    fn resolve_column_index(
        &self,
        resource_type: ResourceType,
        resource_name: Option<&str>,
        host: &str,
        as_of: NaiveDate,
        property: &str,
    ) -> io::Result<Option<usize>> {
        let Some(mut reader) = self.open(resource_type, resource_name, host, as_of)? else {
            return Ok(None);
        };
        let mut header = String::new();
        reader.read_line(&mut header)?;
        Ok(column_index(&header, property))
    }
}

/// Position of `property` in a header line; column 0 is the timestamp and never matches.
pub fn column_index(header: &str, property: &str) -> Option<usize> {
    let property = property.trim();
    header
        .trim_end_matches(['\r', '\n'])
        .split(HEADER_SEPARATOR)
        .position(|col| col.trim() == property)
        .filter(|&i| i > 0)
}

fn is_safe_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}
