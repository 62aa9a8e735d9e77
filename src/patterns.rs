//! # Text Patterns Module
//!
//! Regex patterns shared by ingredient-line parsing and share-link parsing.

use lazy_static::lazy_static;
use regex::Regex;

/// Vulgar fraction glyphs accepted in quantities
pub const FRACTION_GLYPHS: &str = "¼½¾⅓⅔⅛⅜⅝⅞";

// Leading quantity: mixed fraction, simple fraction, decimal with an optional
// glyph ("1½"), or a lone glyph. Alternatives are tried in that order.
pub const QUANTITY_PATTERN: &str =
    r"^(?P<qty>(?:\d+\s+)?\d+\s*/\s*\d+|\d+(?:[.,]\d+)?(?:\s*[¼½¾⅓⅔⅛⅜⅝⅞])?|[¼½¾⅓⅔⅛⅜⅝⅞])\s*(?P<rest>.*)$";

lazy_static! {
    /// Splits a line into its leading quantity and the remainder
    pub static ref QUANTITY_REGEX: Regex =
        Regex::new(QUANTITY_PATTERN).expect("Quantity pattern should be valid");

    /// `whole numerator/denominator` with an optional whole part
    pub static ref FRACTION_REGEX: Regex =
        Regex::new(r"^(?:(?P<whole>\d+)\s+)?(?P<num>\d+)\s*/\s*(?P<den>\d+)$")
            .expect("Fraction pattern should be valid");

    /// Trailing parenthetical notes: "flour (sifted)"
    pub static ref NOTES_REGEX: Regex =
        Regex::new(r"^(?P<body>.*?)\s*\((?P<notes>[^()]*)\)\s*$")
            .expect("Notes pattern should be valid");

    /// The `list` query parameter of a share URL
    pub static ref SHARE_LIST_PARAM_REGEX: Regex =
        Regex::new(r"[?&]list=(?P<code>[^&#\s]*)").expect("Share list pattern should be valid");
}
