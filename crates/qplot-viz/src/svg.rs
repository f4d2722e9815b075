//! SVG rendering.

use std::fmt::{self, Write};

use crate::histogram::Histogram;

/// Bar fills, one per dataset, cycled.
const FILLS: [&str; 5] = ["#648fff", "#dc267f", "#785ef0", "#ffb000", "#fe6100"];

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 72.0;
const LEGEND_WIDTH: f64 = 140.0;
const Y_TICKS: u32 = 5;

/// Escape text for use in SVG content and attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Top of the y axis: the largest value rounded up to a tenth.
fn axis_max(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    ((max * 10.0).ceil() / 10.0).min(1.0)
}

struct Svg<'a>(&'a Histogram);

impl fmt::Display for Svg<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hist = self.0;
        let (width, height) = (f64::from(hist.figsize.0), f64::from(hist.figsize.1));
        let has_legend = hist.datasets.iter().any(|d| d.label.is_some());
        let right = MARGIN_RIGHT + if has_legend { LEGEND_WIDTH } else { 0.0 };

        let plot_w = (width - MARGIN_LEFT - right).max(1.0);
        let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let x0 = MARGIN_LEFT;
        let y0 = MARGIN_TOP + plot_h;
        let y_max = axis_max(hist.max_value());

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="12">"#
        )?;
        writeln!(f, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        if let Some(title) = &hist.title {
            writeln!(
                f,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16">{}</text>"#,
                width / 2.0,
                MARGIN_TOP / 2.0 + 6.0,
                escape(title)
            )?;
        }

        // Y axis with gridlines and tick labels.
        for tick in 0..=Y_TICKS {
            let value = y_max * f64::from(tick) / f64::from(Y_TICKS);
            let y = y0 - plot_h * value / y_max;
            writeln!(
                f,
                "  <line x1=\"{x0:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#dddddd\"/>",
                x0 + plot_w
            )?;
            writeln!(
                f,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="end">{value:.2}</text>"#,
                x0 - 6.0,
                y + 4.0
            )?;
        }
        writeln!(
            f,
            r#"  <text transform="translate(16 {:.1}) rotate(-90)" text-anchor="middle">Probability</text>"#,
            MARGIN_TOP + plot_h / 2.0
        )?;

        // Bars, grouped per key.
        let n_keys = hist.keys.len().max(1) as f64;
        let n_sets = hist.datasets.len().max(1) as f64;
        let group_w = plot_w / n_keys;
        let bar_w = group_w * 0.8 / n_sets;
        let rotate = hist.keys.iter().any(|k| k.chars().count() > 4);

        for (k, key) in hist.keys.iter().enumerate() {
            let group_x = x0 + group_w * k as f64 + group_w * 0.1;

            for (d, dataset) in hist.datasets.iter().enumerate() {
                let value = dataset.values[k];
                let bar_h = plot_h * value / y_max;
                let x = group_x + bar_w * d as f64;
                let y = y0 - bar_h;
                writeln!(
                    f,
                    r#"  <rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                    FILLS[d % FILLS.len()],
                    escape(key),
                    dataset.counts[k]
                )?;
                if hist.bar_labels {
                    writeln!(
                        f,
                        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{value:.3}</text>"#,
                        x + bar_w / 2.0,
                        y - 4.0
                    )?;
                }
            }

            let label_x = x0 + group_w * (k as f64 + 0.5);
            let label_y = y0 + 16.0;
            if rotate {
                writeln!(
                    f,
                    r#"  <text transform="translate({label_x:.1} {label_y:.1}) rotate(-60)" text-anchor="end">{}</text>"#,
                    escape(key)
                )?;
            } else {
                writeln!(
                    f,
                    r#"  <text x="{label_x:.1}" y="{label_y:.1}" text-anchor="middle">{}</text>"#,
                    escape(key)
                )?;
            }
        }

        // Axes drawn last so they sit on top of the bars.
        writeln!(
            f,
            "  <line x1=\"{x0:.1}\" y1=\"{MARGIN_TOP:.1}\" x2=\"{x0:.1}\" y2=\"{y0:.1}\" stroke=\"black\"/>"
        )?;
        writeln!(
            f,
            "  <line x1=\"{x0:.1}\" y1=\"{y0:.1}\" x2=\"{:.1}\" y2=\"{y0:.1}\" stroke=\"black\"/>",
            x0 + plot_w
        )?;

        if has_legend {
            let lx = width - MARGIN_RIGHT - LEGEND_WIDTH + 16.0;
            for (d, dataset) in hist.datasets.iter().enumerate() {
                let Some(label) = &dataset.label else { continue };
                let ly = MARGIN_TOP + 20.0 * d as f64;
                writeln!(
                    f,
                    r#"  <rect x="{lx:.1}" y="{ly:.1}" width="12" height="12" fill="{}"/>"#,
                    FILLS[d % FILLS.len()]
                )?;
                writeln!(
                    f,
                    r#"  <text x="{:.1}" y="{:.1}">{}</text>"#,
                    lx + 18.0,
                    ly + 10.0,
                    escape(label)
                )?;
            }
        }

        writeln!(f, "</svg>")
    }
}

impl Histogram {
    /// Render as a standalone SVG document.
    pub fn render_svg(&self) -> String {
        Svg(self).to_string()
    }

    /// Stream the SVG document into `out`.
    pub fn write_svg(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "{}", Svg(self))
    }
}
