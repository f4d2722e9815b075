//! qplot Histograms
//!
//! Turns measurement [`Counts`](qplot_hal::Counts) into a histogram of
//! outcome probabilities, drawn either as terminal text or as an SVG file.
//!
//! # Example
//!
//! ```rust
//! use qplot_hal::Counts;
//! use qplot_viz::{HistogramOptions, SortOrder, plot_histogram};
//!
//! let counts = Counts::from_pairs([("00", 509), ("11", 515)]);
//! let options = HistogramOptions::new()
//!     .with_sort(SortOrder::ValueDesc)
//!     .with_title("Bell state");
//!
//! let histogram = plot_histogram(&counts, &options).unwrap();
//! assert_eq!(histogram.keys(), ["11", "00"]);
//! println!("{}", histogram.render_text(true));
//! ```
//!
//! # Options
//!
//! | Option | Effect |
//! |--------|--------|
//! | `sort` | `asc`, `desc`, `hamming`, `value`, `value_desc` |
//! | `target_string` | Reference for `hamming` |
//! | `number_to_keep` | Keep the top N keys, fold the rest into `rest` |
//! | `bar_labels` | Print values next to bars |
//! | `title`, `legend` | Text decorations |
//! | `bar_width`, `figsize` | Text and SVG dimensions |

pub mod error;
pub mod histogram;
pub mod options;
mod svg;
mod text;

pub use error::{VizError, VizResult};
pub use histogram::{
    Dataset, Histogram, REST_LABEL, hamming_distance, plot_histogram, plot_histogram_multi,
};
pub use options::{HistogramOptions, SortOrder};
