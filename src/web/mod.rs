//! Dashboard presentation
//!
//! - [`figure`]: trend chart model for a selection
//! - [`chart`]: SVG rendering of that model with plotters
//! - [`page`]: the single HTML page with its tables and selector

pub mod chart;
pub mod figure;
pub mod page;

pub use chart::{render_svg, ChartError};
pub use figure::TrendFigure;
pub use page::{render_page, PageContext};

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format with three significant digits, dropping insignificant trailing zeros
pub fn format_significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    // Scientific form rounds first, so 99.96 carries exponent 2, not 1
    let scientific = format!("{:.2e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let (Ok(mantissa), Ok(exponent)) = (mantissa.parse::<f64>(), exponent.parse::<i32>()) else {
        return scientific;
    };

    let decimals = (2 - exponent).max(0) as usize;
    let formatted = format!("{:.*}", decimals, mantissa * 10f64.powi(exponent));
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
