// Shared test helpers: synthetic statistics files and topologies

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use statchart::TopologyError;
use statchart::TopologyProvider;
use std::path::Path;

pub const HEADER: &str = "DateTime,HeapSizeCurrent,OpenSocketsCurrentCount,ThreadsTotal";

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

/// One row in the on-disk format: `dd/MM/yyyy HH:mm:ss,<v>,<v>,...,`
pub fn row(t: NaiveDateTime, values: &[&str]) -> String {
    let mut line = t.format("%d/%m/%Y %H:%M:%S").to_string();
    for v in values {
        line.push(',');
        line.push_str(v);
    }
    line.push_str(",\n");
    line
}

/// Header plus `n` rows one minute apart from 10:00; column 1 holds the row number
/// (1-based), column 2 holds ten times that, column 3 a constant.
pub fn minute_rows(n: u32) -> String {
    let mut csv = format!("{}\n", HEADER);
    for i in 0..n {
        let t = at(10, 0) + Duration::minutes(i64::from(i));
        let a = (i + 1).to_string();
        let b = ((i + 1) * 10).to_string();
        csv.push_str(&row(t, &[a.as_str(), b.as_str(), "7"]));
    }
    csv
}

/// Write a statistics file at `<base>/<YYYY-MM-DD>/<host>/<relative>`.
pub fn write_stats(base: &Path, date: NaiveDate, host: &str, relative: &str, contents: &str) {
    let path = base
        .join(date.format("%Y-%m-%d").to_string())
        .join(host)
        .join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Topology whose management endpoint is down.
pub struct UnreachableTopology;

impl TopologyProvider for UnreachableTopology {
    fn list_hosts(&self) -> Result<Vec<String>, TopologyError> {
        Err(TopologyError::Unreachable("t3://admin:7001".into()))
    }
}
