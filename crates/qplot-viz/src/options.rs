//! Histogram options.

use std::fmt;
use std::str::FromStr;

use crate::error::VizError;

/// Order of the bars along the x axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Bitstrings ascending.
    #[default]
    Asc,
    /// Bitstrings descending.
    Desc,
    /// Hamming distance to the target string, nearest first.
    Hamming,
    /// Count ascending.
    Value,
    /// Count descending.
    ValueDesc,
}

impl SortOrder {
    /// Every order, in declaration order.
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Asc,
        SortOrder::Desc,
        SortOrder::Hamming,
        SortOrder::Value,
        SortOrder::ValueDesc,
    ];

    /// The option spelling (`"value_desc"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::Hamming => "hamming",
            SortOrder::Value => "value",
            SortOrder::ValueDesc => "value_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| {
                VizError::InvalidOption(format!(
                    "unknown sort '{s}' (expected one of: asc, desc, hamming, value, value_desc)"
                ))
            })
    }
}

/// How to build and draw a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOptions {
    /// Bar order.
    pub sort: SortOrder,
    /// Reference bitstring for [`SortOrder::Hamming`].
    pub target_string: Option<String>,
    /// Keep only this many of the most frequent keys; the remainder is
    /// summed into a trailing `rest` bar.
    pub number_to_keep: Option<usize>,
    /// Print the value above or beside each bar.
    pub bar_labels: bool,
    /// Title drawn above the plot.
    pub title: Option<String>,
    /// One label per dataset.
    pub legend: Option<Vec<String>>,
    /// Width in terminal columns of the longest text bar.
    pub bar_width: usize,
    /// SVG size in pixels (width, height).
    pub figsize: (u32, u32),
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            sort: SortOrder::Asc,
            target_string: None,
            number_to_keep: None,
            bar_labels: true,
            title: None,
            legend: None,
            bar_width: 40,
            figsize: (700, 500),
        }
    }
}

impl HistogramOptions {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bar order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the Hamming reference.
    pub fn with_target_string(mut self, target: impl Into<String>) -> Self {
        self.target_string = Some(target.into());
        self
    }

    /// Keep only the `n` most frequent keys.
    pub fn with_number_to_keep(mut self, n: usize) -> Self {
        self.number_to_keep = Some(n);
        self
    }

    /// Toggle value labels.
    pub fn with_bar_labels(mut self, bar_labels: bool) -> Self {
        self.bar_labels = bar_labels;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set one legend label per dataset.
    pub fn with_legend<S: Into<String>>(mut self, legend: impl IntoIterator<Item = S>) -> Self {
        self.legend = Some(legend.into_iter().map(Into::into).collect());
        self
    }

    /// Set the text bar width.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Set the SVG size.
    pub fn with_figsize(mut self, width: u32, height: u32) -> Self {
        self.figsize = (width, height);
        self
    }
}
