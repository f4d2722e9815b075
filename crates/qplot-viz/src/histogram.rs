//! Histogram construction from measurement counts.

use std::cmp::Reverse;
use std::fmt;
use std::path::Path;

use qplot_hal::Counts;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{VizError, VizResult};
use crate::options::{HistogramOptions, SortOrder};

/// Label of the bar that collects keys dropped by `number_to_keep`.
pub const REST_LABEL: &str = "rest";

/// One set of counts drawn as one bar per key.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Legend label, if any.
    pub label: Option<String>,
    /// Raw counts, aligned with [`Histogram::keys`].
    pub counts: Vec<u64>,
    /// Probabilities (count / dataset total), aligned with the keys.
    pub values: Vec<f64>,
}

/// A histogram ready to render.
///
/// Keys are already sorted and trimmed; every dataset has one value per key.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub(crate) title: Option<String>,
    pub(crate) keys: Vec<String>,
    pub(crate) datasets: Vec<Dataset>,
    pub(crate) bar_labels: bool,
    pub(crate) bar_width: usize,
    pub(crate) figsize: (u32, u32),
}

impl Histogram {
    /// Build a histogram from one or more sets of counts.
    pub fn from_counts(data: &[&Counts], options: &HistogramOptions) -> VizResult<Self> {
        if data.is_empty() || data.iter().all(|counts| counts.is_empty()) {
            return Err(VizError::NoData);
        }
        if let Some(legend) = &options.legend {
            if legend.len() != data.len() {
                return Err(VizError::LegendMismatch {
                    datasets: data.len(),
                    labels: legend.len(),
                });
            }
        }

        let mut totals: FxHashMap<&str, u64> = FxHashMap::default();
        for counts in data {
            for (key, &n) in counts.iter() {
                *totals.entry(key.as_str()).or_default() += n;
            }
        }

        let mut keys: Vec<&str> = totals.keys().copied().collect();
        let mut rest = Vec::new();
        if let Some(keep) = options.number_to_keep {
            if keep < keys.len() {
                keys.sort_by_key(|k| (Reverse(totals[k]), *k));
                rest = keys.split_off(keep);
            }
        }

        sort_keys(&mut keys, &totals, options)?;

        let mut labels: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        if !rest.is_empty() {
            labels.push(REST_LABEL.to_string());
        }

        let datasets = data
            .iter()
            .enumerate()
            .map(|(i, counts)| {
                let mut row: Vec<u64> = keys.iter().map(|k| counts.get(k)).collect();
                if !rest.is_empty() {
                    row.push(rest.iter().map(|k| counts.get(k)).sum());
                }
                Dataset {
                    label: options.legend.as_ref().map(|legend| legend[i].clone()),
                    values: probabilities(&row, counts.total_shots()),
                    counts: row,
                }
            })
            .collect();

        debug!(
            "Histogram with {} bars over {} datasets ({} keys folded into rest)",
            labels.len(),
            data.len(),
            rest.len()
        );

        Ok(Self {
            title: options.title.clone(),
            keys: labels,
            datasets,
            bar_labels: options.bar_labels,
            bar_width: options.bar_width,
            figsize: options.figsize,
        })
    }

    /// Bar labels in drawing order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The datasets, in the order they were given.
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// The title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Largest probability across all bars.
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Write the histogram to `path`: SVG for a `.svg` extension, plain text
    /// otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> VizResult<()> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        let content = if is_svg {
            self.render_svg()
        } else {
            self.render_text(false)
        };
        std::fs::write(path, content)?;
        debug!("Saved histogram to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(false))
    }
}

#[allow(clippy::cast_precision_loss)]
fn probabilities(row: &[u64], total: u64) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; row.len()];
    }
    row.iter().map(|&n| n as f64 / total as f64).collect()
}

fn sort_keys(
    keys: &mut [&str],
    totals: &FxHashMap<&str, u64>,
    options: &HistogramOptions,
) -> VizResult<()> {
    match options.sort {
        SortOrder::Asc => keys.sort_unstable(),
        SortOrder::Desc => keys.sort_unstable_by(|a, b| b.cmp(a)),
        SortOrder::Value => keys.sort_by_key(|k| (totals[k], *k)),
        SortOrder::ValueDesc => keys.sort_by_key(|k| (Reverse(totals[k]), *k)),
        SortOrder::Hamming => {
            let target = options
                .target_string
                .as_deref()
                .ok_or(VizError::MissingTarget)?;
            let mut distances = FxHashMap::default();
            for &key in keys.iter() {
                distances.insert(key, hamming_distance(target, key)?);
            }
            keys.sort_by_key(|k| (distances[k], *k));
        }
    }
    Ok(())
}

/// Number of positions at which two bitstrings differ. Register separators
/// are ignored.
pub fn hamming_distance(target: &str, key: &str) -> VizResult<usize> {
    let a: Vec<char> = target.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = key.chars().filter(|c| !c.is_whitespace()).collect();
    if a.len() != b.len() {
        return Err(VizError::TargetLength {
            target: target.to_string(),
            key: key.to_string(),
        });
    }
    Ok(a.iter().zip(&b).filter(|(x, y)| x != y).count())
}

/// Plot one set of counts.
pub fn plot_histogram(counts: &Counts, options: &HistogramOptions) -> VizResult<Histogram> {
    Histogram::from_counts(&[counts], options)
}

/// Plot several sets of counts side by side, e.g. repeated runs.
pub fn plot_histogram_multi(data: &[&Counts], options: &HistogramOptions) -> VizResult<Histogram> {
    Histogram::from_counts(data, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_counts() -> Counts {
        Counts::from_pairs([("00", 520), ("11", 504)])
    }

    #[test]
    fn test_bell_histogram() {
        let hist = plot_histogram(&bell_counts(), &HistogramOptions::default()).unwrap();

        assert_eq!(hist.keys(), ["00", "11"]);
        let values = &hist.datasets()[0].values;
        assert!((values[0] - 520.0 / 1024.0).abs() < 1e-12);
        assert!((values[1] - 504.0 / 1024.0).abs() < 1e-12);
        assert!((hist.max_value() - 520.0 / 1024.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_data() {
        assert!(matches!(
            plot_histogram_multi(&[], &HistogramOptions::default()),
            Err(VizError::NoData)
        ));
        assert!(matches!(
            plot_histogram(&Counts::new(), &HistogramOptions::default()),
            Err(VizError::NoData)
        ));
    }

    #[test]
    fn test_sort_orders() {
        let counts = Counts::from_pairs([("00", 5), ("01", 9), ("10", 1), ("11", 5)]);
        let keys = |sort| {
            plot_histogram(&counts, &HistogramOptions::new().with_sort(sort))
                .unwrap()
                .keys()
                .to_vec()
        };

        assert_eq!(keys(SortOrder::Asc), ["00", "01", "10", "11"]);
        assert_eq!(keys(SortOrder::Desc), ["11", "10", "01", "00"]);
        assert_eq!(keys(SortOrder::Value), ["10", "00", "11", "01"]);
        assert_eq!(keys(SortOrder::ValueDesc), ["01", "00", "11", "10"]);
    }

    #[test]
    fn test_hamming_sort() {
        let counts = Counts::from_pairs([("000", 1), ("011", 1), ("111", 1), ("110", 1)]);
        let options = HistogramOptions::new()
            .with_sort(SortOrder::Hamming)
            .with_target_string("111");
        let hist = plot_histogram(&counts, &options).unwrap();
        assert_eq!(hist.keys(), ["111", "011", "110", "000"]);
    }

    #[test]
    fn test_hamming_errors() {
        let counts = bell_counts();
        let no_target = HistogramOptions::new().with_sort(SortOrder::Hamming);
        assert!(matches!(
            plot_histogram(&counts, &no_target),
            Err(VizError::MissingTarget)
        ));

        let wrong_len = no_target.with_target_string("101");
        assert!(matches!(
            plot_histogram(&counts, &wrong_len),
            Err(VizError::TargetLength { .. })
        ));
    }

    #[test]
    fn test_number_to_keep_folds_rest() {
        let counts = Counts::from_pairs([("00", 40), ("01", 5), ("10", 7), ("11", 48)]);
        let options = HistogramOptions::new().with_number_to_keep(2);
        let hist = plot_histogram(&counts, &options).unwrap();

        assert_eq!(hist.keys(), ["00", "11", "rest"]);
        assert_eq!(hist.datasets()[0].counts, vec![40, 48, 12]);
        assert!((hist.datasets()[0].values[2] - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_number_to_keep_larger_than_keys() {
        let options = HistogramOptions::new().with_number_to_keep(10);
        let hist = plot_histogram(&bell_counts(), &options).unwrap();
        assert_eq!(hist.keys(), ["00", "11"]);
    }

    #[test]
    fn test_multiple_datasets_share_keys() {
        let first = Counts::from_pairs([("00", 50), ("11", 50)]);
        let second = Counts::from_pairs([("00", 30), ("01", 10), ("11", 60)]);
        let options = HistogramOptions::new().with_legend(["ideal", "noisy"]);
        let hist = plot_histogram_multi(&[&first, &second], &options).unwrap();

        assert_eq!(hist.keys(), ["00", "01", "11"]);
        assert_eq!(hist.datasets()[0].counts, vec![50, 0, 50]);
        assert_eq!(hist.datasets()[1].label.as_deref(), Some("noisy"));
    }

    #[test]
    fn test_legend_mismatch() {
        let counts = bell_counts();
        let options = HistogramOptions::new().with_legend(["a", "b"]);
        assert!(matches!(
            plot_histogram(&counts, &options),
            Err(VizError::LegendMismatch {
                datasets: 1,
                labels: 2
            })
        ));
    }

    #[test]
    fn test_hamming_ignores_register_spaces() {
        assert_eq!(hamming_distance("10 1", "101").unwrap(), 0);
        assert_eq!(hamming_distance("00 0", "11 1").unwrap(), 3);
    }
}
