// Time series containers returned to the chart layer

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Samples in source append order. No sorting is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: NaiveDateTime, value: f64) {
        self.points.push(TimeSeriesPoint { timestamp, value });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeriesPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeSeriesPoint;
    type IntoIter = std::slice::Iter<'a, TimeSeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One host's series, labelled with the host identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSeries {
    pub label: String,
    pub points: TimeSeries,
}

/// Chart-ready dataset: one series per host plus the number of hosts displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub series: Vec<NamedSeries>,
    pub host_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, min, 0)
            .unwrap()
    }

    #[test]
    fn push_keeps_append_order() {
        let mut s = TimeSeries::new();
        assert!(s.is_empty());
        s.push(at(5), 1.0);
        s.push(at(1), 2.0);
        assert_eq!(s.len(), 2);
        let values: Vec<f64> = s.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(s.points()[1].timestamp, at(1));
    }

    #[test]
    fn chart_data_serializes_camel_case() {
        let mut points = TimeSeries::new();
        points.push(at(0), 3.5);
        let data = ChartData {
            series: vec![NamedSeries {
                label: "server1".into(),
                points,
            }],
            host_count: 1,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["hostCount"], 1);
        assert_eq!(json["series"][0]["label"], "server1");
        assert_eq!(json["series"][0]["points"][0]["value"], 3.5);
        assert_eq!(
            json["series"][0]["points"][0]["timestamp"],
            "2024-03-01T10:00:00"
        );
    }
}
