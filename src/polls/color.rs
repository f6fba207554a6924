//! Net-approval color scale
//!
//! Positive nets fade from white toward green, negative nets toward red.
//! Used only for cell highlighting.

use serde::Serialize;
use std::fmt;

const BASE: f64 = 255.0;
const INTENSITY: f64 = 250.0;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        red: 255,
        green: 255,
        blue: 255,
    };

    /// Green minus red, the ordering the scale is monotonic in
    pub fn greenness(&self) -> i16 {
        self.green as i16 - self.red as i16
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map a net value (percentage points) to a highlight color
pub fn net_color(net: f64) -> Rgb {
    if net.is_nan() {
        return Rgb::WHITE;
    }

    let normalized = (net / 100.0).clamp(-1.0, 1.0);
    // Truncated toward zero, so nets within 0.4 of zero stay white
    let shift = (normalized * INTENSITY).trunc();

    if normalized > 0.0 {
        let faded = channel(BASE - shift);
        Rgb {
            red: faded,
            green: channel(BASE),
            blue: faded,
        }
    } else {
        let faded = channel(BASE + shift);
        Rgb {
            red: channel(BASE),
            green: faded,
            blue: faded,
        }
    }
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Cell highlight for rows whose net equals `net` exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRule {
    pub column: &'static str,
    pub net: f64,
    pub background: Rgb,
    pub color: &'static str,
}

impl HighlightRule {
    pub fn for_net(net: f64) -> Self {
        Self {
            column: "net",
            net,
            background: net_color(net),
            color: "black",
        }
    }
}

/// One rule per value, in input order
pub fn highlight_rules(nets: impl IntoIterator<Item = f64>) -> Vec<HighlightRule> {
    nets.into_iter().map(HighlightRule::for_net).collect()
}
