//! SVG line plot of a rich-club curve.
//!
//! x is the degree threshold, y the (normalized) coefficient. The plot is a
//! single polyline over a framed area with five ticks per axis and a dashed
//! reference line at y = 1 for normalized curves.

use std::fmt;

use crate::metrics::RichClubCurve;

const TICKS: usize = 5;

/// Plot dimensions in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            margin: 60.0,
        }
    }
}

/// Data range shown on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn covering(values: impl Iterator<Item = f64>, floor: Option<f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        if let Some(floor) = floor {
            min = min.min(floor);
            max = max.max(floor);
        }
        if !min.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if max - min < f64::EPSILON {
            return Self {
                min: min - 1.0,
                max: max + 1.0,
            };
        }
        Self { min, max }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    fn tick(&self, i: usize) -> f64 {
        self.min + (self.max - self.min) * i as f64 / (TICKS - 1) as f64
    }
}

/// SVG rendering of a [`RichClubCurve`].
pub struct RichClubPlot<'a> {
    curve: &'a RichClubCurve,
    title: String,
    style: PlotStyle,
}

impl<'a> RichClubPlot<'a> {
    pub fn new(curve: &'a RichClubCurve, title: impl Into<String>) -> Self {
        Self {
            curve,
            title: title.into(),
            style: PlotStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    fn spans(&self) -> (Span, Span) {
        let points = &self.curve.points;
        let x = Span::covering(points.iter().map(|p| f64::from(p.degree)), None);
        let reference = self.curve.normalized.then_some(1.0);
        let y = Span::covering(points.iter().map(|p| p.coefficient), reference.or(Some(0.0)));
        (x, y)
    }

    fn to_screen(&self, x: &Span, y: &Span, degree: f64, coefficient: f64) -> (f64, f64) {
        let s = &self.style;
        let inner_w = s.width - 2.0 * s.margin;
        let inner_h = s.height - 2.0 * s.margin;
        (
            s.margin + x.fraction(degree) * inner_w,
            s.height - s.margin - y.fraction(coefficient) * inner_h,
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for RichClubPlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.style;
        let (x_span, y_span) = self.spans();
        let left = s.margin;
        let right = s.width - s.margin;
        let top = s.margin;
        let bottom = s.height - s.margin;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = s.width,
            h = s.height
        )?;
        writeln!(f, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            f,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
            s.width / 2.0,
            s.margin / 2.0,
            escape(&self.title)
        )?;
        writeln!(
            f,
            r#"  <rect x="{left}" y="{top}" width="{}" height="{}" fill="none" stroke="black"/>"#,
            right - left,
            bottom - top
        )?;

        for i in 0..TICKS {
            let degree = x_span.tick(i);
            let (sx, _) = self.to_screen(&x_span, &y_span, degree, y_span.min);
            writeln!(
                f,
                r#"  <line x1="{sx:.2}" y1="{bottom}" x2="{sx:.2}" y2="{}" stroke="black"/>"#,
                bottom + 5.0
            )?;
            writeln!(
                f,
                r#"  <text x="{sx:.2}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{degree:.1}</text>"#,
                bottom + 20.0
            )?;

            let coefficient = y_span.tick(i);
            let (_, sy) = self.to_screen(&x_span, &y_span, x_span.min, coefficient);
            writeln!(
                f,
                r#"  <line x1="{}" y1="{sy:.2}" x2="{left}" y2="{sy:.2}" stroke="black"/>"#,
                left - 5.0
            )?;
            writeln!(
                f,
                r#"  <text x="{}" y="{:.2}" text-anchor="end" font-family="sans-serif" font-size="12">{coefficient:.2}</text>"#,
                left - 8.0,
                sy + 4.0
            )?;
        }

        writeln!(
            f,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="13">degree</text>"#,
            s.width / 2.0,
            s.height - 15.0
        )?;
        let y_label = if self.curve.normalized {
            "normalized rich-club coefficient"
        } else {
            "rich-club coefficient"
        };
        writeln!(
            f,
            r#"  <text x="15" y="{mid}" text-anchor="middle" font-family="sans-serif" font-size="13" transform="rotate(-90 15 {mid})">{y_label}</text>"#,
            mid = s.height / 2.0
        )?;

        if self.curve.normalized {
            let (_, sy) = self.to_screen(&x_span, &y_span, x_span.min, 1.0);
            writeln!(
                f,
                r##"  <line x1="{left}" y1="{sy:.2}" x2="{right}" y2="{sy:.2}" stroke="#999999" stroke-dasharray="4 4"/>"##
            )?;
        }

        let points: Vec<String> = self
            .curve
            .points
            .iter()
            .filter(|p| p.coefficient.is_finite())
            .map(|p| {
                let (sx, sy) = self.to_screen(&x_span, &y_span, f64::from(p.degree), p.coefficient);
                format!("{sx:.2},{sy:.2}")
            })
            .collect();
        if !points.is_empty() {
            writeln!(
                f,
                r##"  <polyline fill="none" stroke="#1f77b4" stroke-width="1.5" points="{}"/>"##,
                points.join(" ")
            )?;
        }

        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::RichClubPoint;

    fn curve(normalized: bool, values: &[(u32, f64)]) -> RichClubCurve {
        RichClubCurve {
            normalized,
            points: values
                .iter()
                .map(|&(degree, coefficient)| RichClubPoint { degree, coefficient })
                .collect(),
        }
    }

    #[test]
    fn test_renders_polyline() {
        let curve = curve(true, &[(0, 1.0), (1, 1.2), (2, 1.8)]);
        let svg = RichClubPlot::new(&curve, "rich club").to_string();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("normalized rich-club coefficient"));
    }

    #[test]
    fn test_points_map_into_plot_area() {
        let curve = curve(false, &[(0, 0.5), (4, 0.25)]);
        let plot = RichClubPlot::new(&curve, "t");
        let (x, y) = plot.spans();

        let (left, bottom) = plot.to_screen(&x, &y, 0.0, 0.0);
        assert_eq!((left, bottom), (60.0, 420.0));
        let (right, _) = plot.to_screen(&x, &y, 4.0, 0.25);
        assert_eq!(right, 580.0);
        let (_, top) = plot.to_screen(&x, &y, 0.0, 0.5);
        assert_eq!(top, 60.0);
    }

    #[test]
    fn test_empty_curve_renders_frame_only() {
        let curve = curve(true, &[]);
        let svg = RichClubPlot::new(&curve, "empty").to_string();
        assert!(!svg.contains("<polyline"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_title_is_escaped() {
        let curve = curve(false, &[(0, 1.0)]);
        let svg = RichClubPlot::new(&curve, "N<5 & \"x\"").to_string();
        assert!(svg.contains("N&lt;5 &amp; &quot;x&quot;"));
    }

    #[test]
    fn test_custom_style() {
        let curve = curve(false, &[(0, 1.0), (1, 2.0)]);
        let style = PlotStyle {
            width: 300.0,
            height: 200.0,
            margin: 20.0,
        };
        let svg = RichClubPlot::new(&curve, "small").with_style(style).to_string();
        assert!(svg.contains(r#"width="300" height="200""#));
    }
}
