//! Multi-color detection
//!
//! Icons drawn in a single color get their fill/stroke rewritten to
//! `currentColor` so they follow the surrounding text color. Icons using two
//! or more distinct color literals keep their palette.
//!
//! The check is purely lexical: it counts distinct matches of hex literals
//! and the `rgb(` / `hsl(` function openers in the raw text. `#FFF` and
//! `#fff` count as two tokens, and an SVG without any color literal counts
//! as single-color.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_COLOR_TOKEN: Regex = Regex::new(r"#[0-9A-Fa-f]{3,6}|rgb\(|hsl\(").unwrap();
}

/// Result of the color heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    /// Zero or one distinct color token
    Single,
    /// Two or more distinct color tokens
    Multi,
}

impl ColorClass {
    pub fn is_multi_color(self) -> bool {
        self == ColorClass::Multi
    }
}

/// Distinct color tokens found in `svg`
pub fn color_tokens(svg: &str) -> BTreeSet<&str> {
    RE_COLOR_TOKEN.find_iter(svg).map(|m| m.as_str()).collect()
}

/// Classify an SVG document by its distinct color tokens
pub fn classify(svg: &str) -> ColorClass {
    if color_tokens(svg).len() > 1 {
        ColorClass::Multi
    } else {
        ColorClass::Single
    }
}
