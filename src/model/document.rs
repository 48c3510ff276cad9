//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{DocumentNode, NodeTag, SectionProperties};
use crate::convert::ConverterContext;
use crate::error::{Error, Result};

/// A document tree ready for conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    /// Top-level body nodes
    pub content: Vec<DocumentNode>,

    /// Properties of the final section of the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_section: Option<SectionProperties>,

    /// Resolved styling context supplied by the format translator
    pub context: ConverterContext,
}

impl Document {
    /// Create a document from top-level nodes.
    pub fn new(content: Vec<DocumentNode>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Set the final section properties.
    pub fn with_body_section(mut self, section: SectionProperties) -> Self {
        self.body_section = Some(section);
        self
    }

    /// Set the styling context.
    pub fn with_context(mut self, context: ConverterContext) -> Self {
        self.context = context;
        self
    }

    /// Check the structural rules the converter relies on.
    ///
    /// Table rows may only appear inside tables and cells only inside rows.
    pub fn validate(&self) -> Result<()> {
        fn check(node: &DocumentNode, parent: Option<NodeTag>) -> Result<()> {
            let tag = node.tag();
            let misplaced = match tag {
                NodeTag::TableRow => parent != Some(NodeTag::Table),
                NodeTag::TableCell => parent != Some(NodeTag::TableRow),
                _ => false,
            };
            if misplaced {
                return Err(Error::InvalidDocument(format!(
                    "{tag:?} node outside of its parent ({parent:?})"
                )));
            }
            node.children
                .iter()
                .try_for_each(|child| check(child, Some(tag)))
        }

        self.content.iter().try_for_each(|node| check(node, None))
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of body paragraphs, counting those nested in block-level
    /// structured content.
    pub fn paragraph_count(&self) -> usize {
        fn count(nodes: &[DocumentNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node.tag() {
                    NodeTag::Paragraph => 1,
                    tag if tag.is_block_container() => count(&node.children),
                    _ => 0,
                })
                .sum()
        }
        count(&self.content)
    }

    /// Plain text of the whole document, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|node| node.text_content())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
