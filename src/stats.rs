use crate::types::DiagramDataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRateSummary {
    /// Truncated integer mean.
    pub average: i32,
    pub max: i32,
    pub min: i32,
}

/// `None` for an empty series.
pub fn heart_rate_summary(data: &[DiagramDataPoint]) -> Option<HeartRateSummary> {
    let max = data.iter().map(|p| p.heart_rate).max()?;
    let min = data.iter().map(|p| p.heart_rate).min()?;
    let sum: i64 = data.iter().map(|p| i64::from(p.heart_rate)).sum();
    let count = i64::try_from(data.len()).ok()?;
    let average = i32::try_from(sum / count).ok()?;
    Some(HeartRateSummary { average, max, min })
}

#[allow(clippy::cast_precision_loss)]
pub fn average_speed(data: &[DiagramDataPoint]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: f64 = data.iter().map(|p| p.speed_kmh).sum();
    Some(sum / data.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(t: i64, heart_rate: i32, speed_kmh: f64) -> DiagramDataPoint {
        DiagramDataPoint {
            time_numeric: t,
            heart_rate,
            speed_kmh,
            distance_meters: t * 100,
            steps: t * 50,
            elevation: 45.0,
            latitude: 55.7558,
            longitude: 37.6173,
            temperature_celsius: 12.5,
            current_layer: 0,
            current_sub_layer: 0,
            current_timestamp: NaiveDate::from_ymd_opt(2025, 11, 25)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_heart_rate_summary() {
        let data = [point(0, 72, 0.0), point(1, 85, 6.2), point(2, 92, 7.8)];
        let s = heart_rate_summary(&data).unwrap();
        // 249 / 3
        assert_eq!(s.average, 83);
        assert_eq!(s.max, 92);
        assert_eq!(s.min, 72);
    }

    #[test]
    fn test_average_truncates() {
        let data = [point(0, 70, 0.0), point(1, 71, 0.0)];
        assert_eq!(heart_rate_summary(&data).unwrap().average, 70);
    }

    #[test]
    fn test_average_speed() {
        let data = [point(0, 72, 0.0), point(1, 85, 6.0), point(2, 92, 9.0)];
        assert!((average_speed(&data).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(heart_rate_summary(&[]), None);
        assert_eq!(average_speed(&[]), None);
    }
}
