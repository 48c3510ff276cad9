//! Unit conversions.

/// Twips per CSS pixel (1440 twips per inch, 96 px per inch).
pub const TWIPS_PER_PIXEL: f64 = 15.0;

/// Size used for images and drawings with missing or unusable dimensions.
pub const DEFAULT_OBJECT_SIZE: f64 = 100.0;

/// Base of the stacking counter used by the source format for anchored
/// objects; z-indices are relative to it.
pub const RELATIVE_HEIGHT_BASE: i64 = 251_658_240;

/// Convert twips to pixels.
pub fn twips_to_px(twips: f64) -> f64 {
    twips / TWIPS_PER_PIXEL
}

/// Convert points to pixels.
pub fn pt_to_px(pt: f64) -> f64 {
    pt * 96.0 / 72.0
}

/// Interpret an indent value of unknown unit.
///
/// Magnitudes up to `threshold` are taken as pixels, larger ones as twips.
/// Values in a band around the threshold are ambiguous and may be misread.
pub fn normalize_indent(value: f64, threshold: f64) -> f64 {
    if value.abs() <= threshold {
        value
    } else {
        twips_to_px(value)
    }
}

/// A usable dimension, or the default size.
pub fn dimension_or_default(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_OBJECT_SIZE,
    }
}

/// Z-index of an anchored object from its stacking counter.
///
/// Objects behind the text always get 0; others are clamped to at least 1.
pub fn z_index(relative_height: Option<i64>, behind_doc: bool) -> Option<i64> {
    if behind_doc {
        return Some(0);
    }
    relative_height.map(|height| height.saturating_sub(RELATIVE_HEIGHT_BASE).max(1))
}

/// Replace ASCII digits with their superscript forms.
pub fn superscript_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0' => '\u{2070}',
            '1' => '\u{b9}',
            '2' => '\u{b2}',
            '3' => '\u{b3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twips_and_points() {
        assert_eq!(twips_to_px(1440.0), 96.0);
        assert_eq!(pt_to_px(12.0), 16.0);
    }

    #[test]
    fn test_normalize_indent_boundary() {
        assert_eq!(normalize_indent(50.0, 50.0), 50.0);
        assert_eq!(normalize_indent(-40.0, 50.0), -40.0);
        assert_eq!(normalize_indent(720.0, 50.0), 48.0);
        // 51 twips is read as 3.4px even if it was meant as pixels.
        assert!((normalize_indent(51.0, 50.0) - 3.4).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_defaults() {
        assert_eq!(dimension_or_default(Some(300.0)), 300.0);
        assert_eq!(dimension_or_default(Some(f64::NAN)), DEFAULT_OBJECT_SIZE);
        assert_eq!(dimension_or_default(Some(f64::INFINITY)), DEFAULT_OBJECT_SIZE);
        assert_eq!(dimension_or_default(None), DEFAULT_OBJECT_SIZE);
    }

    #[test]
    fn test_z_index() {
        assert_eq!(z_index(Some(RELATIVE_HEIGHT_BASE + 5), false), Some(5));
        assert_eq!(z_index(Some(RELATIVE_HEIGHT_BASE - 100), false), Some(1));
        assert_eq!(z_index(Some(RELATIVE_HEIGHT_BASE + 5), true), Some(0));
        assert_eq!(z_index(None, false), None);
    }

    #[test]
    fn test_z_index_extreme_heights() {
        assert_eq!(z_index(Some(i64::MIN), false), Some(1));
        assert_eq!(z_index(Some(i64::MIN + 1), false), Some(1));
        assert_eq!(z_index(Some(i64::MAX), false), Some(i64::MAX - RELATIVE_HEIGHT_BASE));
    }

    #[test]
    fn test_superscript_digits() {
        assert_eq!(superscript_digits("12"), "\u{b9}\u{b2}");
        assert_eq!(superscript_digits("*"), "*");
    }
}
