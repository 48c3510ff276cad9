//! Structured content (SDT) metadata.

use serde::{Deserialize, Serialize};

use super::SdtAttrs;

/// What kind of wrapper produced the metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdtKind {
    /// A plain content control
    #[default]
    StructuredContent,
    /// A document part object (table of contents, bibliography, ...)
    DocumentPartObject,
    /// An index block
    Index,
}

/// Editing lock of a content control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdtLock {
    /// No lock
    Unlocked,
    /// The control cannot be deleted
    SdtLocked,
    /// The content cannot be edited
    ContentLocked,
    /// Neither the control nor its content can change
    SdtContentLocked,
}

impl SdtLock {
    /// Parse a lock value, returning `None` for anything unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unlocked" => Some(SdtLock::Unlocked),
            "sdtLocked" => Some(SdtLock::SdtLocked),
            "contentLocked" => Some(SdtLock::ContentLocked),
            "sdtContentLocked" => Some(SdtLock::SdtContentLocked),
            _ => None,
        }
    }
}

/// Descriptor of the structured content a run or paragraph sits in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdtMetadata {
    /// Wrapper kind
    pub kind: SdtKind,
    /// Control id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Control type (`text`, `richText`, `docPartObj`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<String>,
    /// Developer tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Document part gallery (`Table of Contents`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<String>,
    /// Unique id of the document part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Field instruction driving the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Editing lock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<SdtLock>,
}

impl SdtMetadata {
    /// Build metadata from a wrapper's attributes.
    ///
    /// Returns `None` when the attributes carry nothing identifying, in
    /// which case the caller keeps the ambient metadata.
    pub fn from_attrs(kind: SdtKind, attrs: &SdtAttrs) -> Option<Self> {
        let lock = attrs.lock.as_deref().and_then(|value| {
            let parsed = SdtLock::parse(value);
            if parsed.is_none() {
                log::debug!("dropping unknown sdt lock value {value:?}");
            }
            parsed
        });

        let meta = SdtMetadata {
            kind,
            id: attrs.id.clone(),
            control_type: attrs.control_type.clone(),
            tag: attrs.tag.clone(),
            alias: attrs.alias.clone(),
            gallery: attrs.gallery.clone(),
            unique_id: attrs.unique_id.clone(),
            instruction: attrs.instruction.clone(),
            lock,
        };

        let identifying = meta.id.is_some()
            || meta.control_type.is_some()
            || meta.tag.is_some()
            || meta.alias.is_some()
            || meta.gallery.is_some()
            || meta.unique_id.is_some()
            || meta.instruction.is_some();

        // Document part objects and indexes are meaningful by kind alone.
        if identifying || kind != SdtKind::StructuredContent {
            Some(meta)
        } else {
            None
        }
    }

    /// Resolve metadata for a nested wrapper.
    ///
    /// The node's own metadata wins; the document-part fields it leaves
    /// empty (gallery, unique id, instruction) come from the ambient
    /// wrapper. Without own metadata the ambient one is used as is.
    pub fn resolve(own: Option<SdtMetadata>, ambient: Option<&SdtMetadata>) -> Option<SdtMetadata> {
        match (own, ambient) {
            (Some(mut own), Some(ambient)) => {
                if own.gallery.is_none() {
                    own.gallery = ambient.gallery.clone();
                }
                if own.unique_id.is_none() {
                    own.unique_id = ambient.unique_id.clone();
                }
                if own.instruction.is_none() {
                    own.instruction = ambient.instruction.clone();
                }
                Some(own)
            }
            (Some(own), None) => Some(own),
            (None, ambient) => ambient.cloned(),
        }
    }
}
