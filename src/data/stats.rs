/// Default cap on the printed temperature list.
pub const DEFAULT_LISTING_CAP: usize = 1000;

/// Summary of the Celsius series over its non-missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Mean/min/max over non-missing values; `None` when there are none.
pub fn summarize(series: &[Option<f64>]) -> Option<TemperatureStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in series.iter().flatten() {
        count += 1;
        sum += v;
        min = min.min(*v);
        max = max.max(*v);
    }

    (count > 0).then(|| TemperatureStats {
        mean: sum / count as f64,
        min,
        max,
        count,
    })
}

/// Bulleted, one-decimal rendering of the first `cap` temperatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureListing {
    pub lines: Vec<String>,
    /// Values left out because of the cap.
    pub omitted: usize,
}

impl TemperatureListing {
    pub fn is_truncated(&self) -> bool {
        self.omitted > 0
    }

    /// Note shown under a truncated list.
    pub fn truncation_note(&self) -> Option<String> {
        self.is_truncated()
            .then(|| format!("… and {} more", self.omitted))
    }
}

pub fn format_celsius(v: f64) -> String {
    format!("{v:.1}°C")
}

pub fn temperature_listing(series: &[Option<f64>], cap: usize) -> TemperatureListing {
    let valid: Vec<f64> = series.iter().flatten().copied().collect();
    let lines = valid
        .iter()
        .take(cap)
        .map(|v| format!("- {}", format_celsius(*v)))
        .collect::<Vec<_>>();
    TemperatureListing {
        omitted: valid.len() - lines.len(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_skips_missing_values() {
        let s = summarize(&[Some(0.0), None, Some(100.0)]).unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean - 50.0).abs() < 1e-12);
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 100.0);
    }

    #[test]
    fn summarize_without_values_is_none() {
        assert_eq!(summarize(&[]), None);
        assert_eq!(summarize(&[None, None]), None);
    }

    #[test]
    fn listing_formats_one_decimal() {
        let listing = temperature_listing(&[Some(21.04), None, Some(-3.26)], 10);
        assert_eq!(listing.lines, vec!["- 21.0°C", "- -3.3°C"]);
        assert!(!listing.is_truncated());
        assert_eq!(listing.truncation_note(), None);
    }

    #[test]
    fn listing_reports_truncation() {
        let series: Vec<Option<f64>> = (0..1005).map(|i| Some(i as f64)).collect();
        let listing = temperature_listing(&series, DEFAULT_LISTING_CAP);
        assert_eq!(listing.lines.len(), 1000);
        assert_eq!(listing.omitted, 5);
        assert_eq!(listing.truncation_note().as_deref(), Some("… and 5 more"));
    }
}
