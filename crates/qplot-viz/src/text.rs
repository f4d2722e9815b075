//! Terminal rendering.

use std::fmt::Write;

use console::{Color, style};

use crate::histogram::Histogram;

/// Bar colours, one per dataset, cycled.
const PALETTE: [Color; 5] = [
    Color::Green,
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
];

fn paint(text: String, color: Color, styled: bool) -> String {
    if styled {
        style(text).fg(color).to_string()
    } else {
        text
    }
}

impl Histogram {
    /// Render as rows of `█` bars scaled to the largest value.
    ///
    /// With `styled` the output carries terminal colours; without it the
    /// text is plain and suitable for files.
    pub fn render_text(&self, styled: bool) -> String {
        let mut out = String::new();
        let key_width = self.keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
        let max = self.max_value();

        if let Some(title) = &self.title {
            let title = if styled {
                style(title).bold().to_string()
            } else {
                title.clone()
            };
            let _ = writeln!(out, "{title}");
        }

        for (k, key) in self.keys.iter().enumerate() {
            for (d, dataset) in self.datasets.iter().enumerate() {
                let value = dataset.values[k];
                let bar = "█".repeat(bar_length(value, max, self.bar_width));
                let bar = format!("{bar:<width$}", width = self.bar_width);
                let label = if d == 0 { key.as_str() } else { "" };
                let key_cell = paint(format!("{label:>key_width$}"), Color::Cyan, styled);
                let bar_cell = paint(bar, PALETTE[d % PALETTE.len()], styled);

                if self.bar_labels {
                    let _ = writeln!(
                        out,
                        "  {key_cell} │{bar_cell} {value:.3} ({})",
                        dataset.counts[k]
                    );
                } else {
                    let _ = writeln!(out, "  {key_cell} │{}", bar_cell.trim_end());
                }
            }
        }

        let labels: Vec<_> = self
            .datasets
            .iter()
            .enumerate()
            .filter_map(|(d, dataset)| {
                let label = dataset.label.as_ref()?;
                let swatch = paint("■".to_string(), PALETTE[d % PALETTE.len()], styled);
                Some(format!("{swatch} {label}"))
            })
            .collect();
        if !labels.is_empty() {
            let _ = writeln!(out, "\n  {}", labels.join("   "));
        }

        out
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}
