//! Saving histograms to disk.

use qplot_hal::Counts;
use qplot_viz::{HistogramOptions, plot_histogram};
use tempfile::TempDir;

fn bell() -> Counts {
    Counts::from_pairs([("00", 498), ("11", 526)])
}

#[test]
fn svg_extension_writes_svg() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bell.SVG");

    let hist = plot_histogram(&bell(), &HistogramOptions::default()).unwrap();
    hist.save(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<svg "));
    assert_eq!(written, hist.render_svg());
}

#[test]
fn other_extension_writes_plain_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bell.txt");

    let hist = plot_histogram(&bell(), &HistogramOptions::default()).unwrap();
    hist.save(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, hist.render_text(false));
    assert!(!written.contains('\u{1b}'));
    assert!(written.contains("00 │"));
}

#[test]
fn missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("bell.svg");

    let hist = plot_histogram(&bell(), &HistogramOptions::default()).unwrap();
    assert!(matches!(hist.save(&path), Err(qplot_viz::VizError::Io(_))));
}
