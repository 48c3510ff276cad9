//! Block converters: node to flow blocks.
//!
//! Authored enum values (wrap types, anchor frames, alignment) are checked
//! against allow-lists here; invalid values are dropped with a debug log
//! and never reach the output.

pub(crate) mod breaks;
pub(crate) mod drawing;
pub(crate) mod image;
pub(crate) mod table;

use log::debug;

use crate::model::{
    AnchorSpec, BoxSpacing, FrameAlign, HorizontalFrame, ObjectAnchor, ObjectWrap, VerticalFrame,
    WrapSpec, WrapText, WrapType,
};

fn checked<T>(field: &str, value: Option<&str>, parse: fn(&str) -> Option<T>) -> Option<T> {
    let value = value?;
    let parsed = parse(value);
    if parsed.is_none() {
        debug!("dropping invalid {field} value {value:?}");
    }
    parsed
}

/// Validated wrapping. An invalid or missing wrap type omits the wrap.
pub(crate) fn validate_wrap(spec: Option<&WrapSpec>, distances: BoxSpacing) -> Option<ObjectWrap> {
    let spec = spec?;
    let wrap_type = checked("wrap type", spec.wrap_type.as_deref(), WrapType::parse)?;
    Some(ObjectWrap {
        wrap_type,
        wrap_text: checked("wrap text", spec.attrs.wrap_text.as_deref(), WrapText::parse),
        distances,
        behind_doc: spec.attrs.behind_doc.unwrap_or(false),
    })
}

/// Validated anchor placement; `None` when nothing valid remains.
pub(crate) fn validate_anchor(spec: Option<&AnchorSpec>) -> Option<ObjectAnchor> {
    let spec = spec?;
    let anchor = ObjectAnchor {
        h_relative_from: checked(
            "horizontal frame",
            spec.h_relative_from.as_deref(),
            HorizontalFrame::parse,
        ),
        v_relative_from: checked(
            "vertical frame",
            spec.v_relative_from.as_deref(),
            VerticalFrame::parse,
        ),
        align_h: checked("horizontal alignment", spec.align_h.as_deref(), FrameAlign::parse),
        align_v: checked("vertical alignment", spec.align_v.as_deref(), FrameAlign::parse),
        offset_h: spec.offset_h.filter(|v| v.is_finite()),
        offset_v: spec.offset_v.filter(|v| v.is_finite()),
    };
    (anchor != ObjectAnchor::default()).then_some(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WrapSpecAttrs;

    #[test]
    fn test_invalid_wrap_type_omits_wrap() {
        let spec = WrapSpec {
            wrap_type: Some("Wavy".into()),
            attrs: WrapSpecAttrs::default(),
        };
        assert_eq!(validate_wrap(Some(&spec), BoxSpacing::default()), None);
    }

    #[test]
    fn test_invalid_wrap_text_dropped() {
        let spec = WrapSpec {
            wrap_type: Some("Square".into()),
            attrs: WrapSpecAttrs {
                wrap_text: Some("everywhere".into()),
                behind_doc: Some(true),
                ..Default::default()
            },
        };
        let wrap = validate_wrap(Some(&spec), BoxSpacing::default()).unwrap();
        assert_eq!(wrap.wrap_type, WrapType::Square);
        assert_eq!(wrap.wrap_text, None);
        assert!(wrap.behind_doc);
    }

    #[test]
    fn test_anchor_validation() {
        let spec = AnchorSpec {
            h_relative_from: Some("page".into()),
            v_relative_from: Some("sideways".into()),
            align_h: Some("center".into()),
            ..Default::default()
        };
        let anchor = validate_anchor(Some(&spec)).unwrap();
        assert_eq!(anchor.h_relative_from, Some(HorizontalFrame::Page));
        assert_eq!(anchor.v_relative_from, None);
        assert_eq!(anchor.align_h, Some(FrameAlign::Center));

        let junk = AnchorSpec {
            align_v: Some("diagonal".into()),
            ..Default::default()
        };
        assert_eq!(validate_anchor(Some(&junk)), None);
    }
}
