//! Collaborators of a conversion: styling context, position lookup, style
//! resolution and the bookmark table.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::units::twips_to_px;
use crate::model::{
    Alignment, DocumentNode, Indent, NodeId, NodeKind, NumberingRef, ParagraphAttrs, PmRange,
    RunProperties, Spacing, TabStop,
};

/// Styling context produced by the format translator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterContext {
    /// Theme color name to hex value
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub theme_colors: BTreeMap<String, String>,

    /// Footnote id to 1-based display number
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub footnote_numbers: BTreeMap<String, u32>,

    /// Page background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Document default run properties
    pub default_run_properties: RunProperties,

    /// Character styles by id
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub character_styles: BTreeMap<String, RunProperties>,
}

impl ConverterContext {
    /// Resolve a theme color name; hex values and unknown names pass through.
    pub fn resolve_color(&self, color: &str) -> String {
        if color.starts_with('#') {
            return color.to_string();
        }
        self.theme_colors
            .get(color)
            .cloned()
            .unwrap_or_else(|| color.to_string())
    }

    /// Display number of a footnote.
    pub fn footnote_number(&self, id: &str) -> Option<u32> {
        self.footnote_numbers.get(id).copied()
    }
}

/// Maps nodes to their span in the flat document coordinate space.
pub trait PositionLookup {
    /// Span of `node`, if known.
    fn position(&self, node: &DocumentNode) -> Option<PmRange>;
}

/// Position lookup backed by a node id map.
#[derive(Debug, Clone, Default)]
pub struct PositionMap {
    positions: HashMap<NodeId, PmRange>,
}

impl PositionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the span of a node id.
    pub fn insert(&mut self, id: NodeId, range: PmRange) {
        self.positions.insert(id, range);
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if no node is recorded.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Derive positions from top-level nodes.
    ///
    /// Text counts one position per UTF-16 code unit, other leaves one
    /// position, and containers their content plus an opening and a closing
    /// position. Offsets start at 0 at the start of the body content. Nodes
    /// without an id are sized but not recorded.
    pub fn from_nodes(nodes: &[DocumentNode]) -> Self {
        let mut map = Self::new();
        let mut pos = 0u32;
        for node in nodes {
            pos = map.layout(node, pos);
        }
        map
    }

    fn layout(&mut self, node: &DocumentNode, start: u32) -> u32 {
        let end = match &node.kind {
            NodeKind::Text(attrs) => start + attrs.text.encode_utf16().count() as u32,
            _ if node.is_atom() => start + 1,
            _ => {
                let mut pos = start + 1;
                for child in &node.children {
                    pos = self.layout(child, pos);
                }
                pos + 1
            }
        };
        if let Some(id) = node.id {
            self.insert(id, PmRange::new(start, end));
        }
        end
    }
}

impl PositionLookup for PositionMap {
    fn position(&self, node: &DocumentNode) -> Option<PmRange> {
        node.id.and_then(|id| self.positions.get(&id).copied())
    }
}

/// Position lookup that knows no positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositions;

impl PositionLookup for NoPositions {
    fn position(&self, _node: &DocumentNode) -> Option<PmRange> {
        None
    }
}

/// Paragraph properties after style resolution. Lengths are pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParagraph {
    /// Paragraph style id
    pub style_id: Option<String>,
    /// Alignment
    pub alignment: Option<Alignment>,
    /// Spacing
    pub spacing: Option<Spacing>,
    /// Indentation
    pub indent: Option<Indent>,
    /// Tab stops
    pub tabs: Vec<TabStop>,
    /// Keep with next
    pub keep_next: bool,
    /// Keep lines together
    pub keep_lines: bool,
    /// Start on a new page
    pub page_break_before: bool,
    /// Right to left
    pub rtl: bool,
    /// List numbering
    pub numbering: Option<NumberingRef>,
    /// Effective properties of the paragraph mark
    pub mark_properties: RunProperties,
}

impl ResolvedParagraph {
    /// Check whether the paragraph mark is hidden.
    pub fn is_hidden(&self) -> bool {
        self.mark_properties.is_hidden()
    }
}

/// Resolves the style cascade. Implementations must be pure.
pub trait StyleResolver {
    /// Resolve paragraph attributes.
    fn resolve_paragraph(&self, attrs: &ParagraphAttrs, ctx: &ConverterContext)
        -> ResolvedParagraph;

    /// Resolve run properties as they apply to text.
    ///
    /// The result must only specify what the cascade above the run
    /// specifies; document defaults for font and size are applied by the
    /// text converters.
    fn resolve_run(
        &self,
        props: &RunProperties,
        paragraph: &ResolvedParagraph,
        ctx: &ConverterContext,
    ) -> RunProperties;
}

/// Resolver for direct formatting over character styles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectStyleResolver;

impl StyleResolver for DirectStyleResolver {
    fn resolve_paragraph(
        &self,
        attrs: &ParagraphAttrs,
        ctx: &ConverterContext,
    ) -> ResolvedParagraph {
        let spacing = attrs.spacing.map(|s| Spacing {
            before: s.before.map(twips_to_px),
            after: s.after.map(twips_to_px),
            line: s.line,
            line_rule: s.line_rule,
        });
        let tabs = attrs
            .tabs
            .iter()
            .map(|stop| TabStop {
                position: twips_to_px(stop.position),
                ..*stop
            })
            .collect();
        let mark_properties = match &attrs.run_properties {
            Some(props) => ctx.default_run_properties.overlay(props),
            None => ctx.default_run_properties.clone(),
        };

        ResolvedParagraph {
            style_id: attrs.style_id.clone(),
            alignment: attrs.alignment,
            spacing,
            indent: attrs.indent.map(|indent| indent.map(twips_to_px)),
            tabs,
            keep_next: attrs.keep_next.unwrap_or(false),
            keep_lines: attrs.keep_lines.unwrap_or(false),
            page_break_before: attrs.page_break_before.unwrap_or(false),
            rtl: attrs.rtl.unwrap_or(false),
            numbering: attrs.numbering,
            mark_properties,
        }
    }

    fn resolve_run(
        &self,
        props: &RunProperties,
        _paragraph: &ResolvedParagraph,
        ctx: &ConverterContext,
    ) -> RunProperties {
        let mut resolved = match props
            .style_id
            .as_ref()
            .and_then(|id| ctx.character_styles.get(id))
        {
            Some(style) => style.overlay(props),
            None => props.clone(),
        };
        resolved.color = resolved.color.map(|color| ctx.resolve_color(&color));
        resolved
    }
}

/// Bookmark name to start offset, filled during traversal.
///
/// Registrations can be captured so a cached paragraph can replay the
/// bookmarks it would have registered.
#[derive(Debug, Clone, Default)]
pub struct BookmarkTable {
    entries: BTreeMap<String, u32>,
    capture: Option<Vec<(String, u32)>>,
}

impl BookmarkTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bookmark start.
    pub fn register(&mut self, name: impl Into<String>, start: u32) {
        let name = name.into();
        if let Some(capture) = self.capture.as_mut() {
            capture.push((name.clone(), start));
        }
        self.entries.insert(name, start);
    }

    /// Start offset of a bookmark.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bookmarks in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, start)| (name.as_str(), *start))
    }

    /// Remove every bookmark.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn begin_capture(&mut self) {
        self.capture = Some(Vec::new());
    }

    pub(crate) fn end_capture(&mut self) -> Vec<(String, u32)> {
        self.capture.take().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParagraphAttrs, TabAttrs};

    #[test]
    fn test_position_map_sizes() {
        let nodes = vec![
            DocumentNode::paragraph(
                ParagraphAttrs::default(),
                vec![
                    DocumentNode::text("Héllo").with_id(2),
                    DocumentNode::new(NodeKind::Tab(TabAttrs::default())).with_id(3),
                ],
            )
            .with_id(1),
            DocumentNode::paragraph(ParagraphAttrs::default(), vec![]).with_id(4),
        ];
        let map = PositionMap::from_nodes(&nodes);

        assert_eq!(map.position(&nodes[0]), Some(PmRange::new(0, 8)));
        assert_eq!(map.position(&nodes[0].children[0]), Some(PmRange::new(1, 6)));
        assert_eq!(map.position(&nodes[0].children[1]), Some(PmRange::new(6, 7)));
        assert_eq!(map.position(&nodes[1]), Some(PmRange::new(8, 10)));
        assert_eq!(map.position(&DocumentNode::text("x")), None);
    }

    #[test]
    fn test_resolve_color() {
        let mut ctx = ConverterContext::default();
        ctx.theme_colors.insert("accent1".into(), "#4472C4".into());

        assert_eq!(ctx.resolve_color("accent1"), "#4472C4");
        assert_eq!(ctx.resolve_color("#FF0000"), "#FF0000");
        assert_eq!(ctx.resolve_color("unknown"), "unknown");
    }

    #[test]
    fn test_direct_resolver_units_and_styles() {
        let mut ctx = ConverterContext::default();
        ctx.character_styles.insert(
            "Hidden".into(),
            RunProperties {
                vanish: Some(true),
                italic: Some(true),
                ..Default::default()
            },
        );

        let attrs = ParagraphAttrs {
            indent: Some(Indent {
                left: Some(720.0),
                ..Default::default()
            }),
            page_break_before: Some(true),
            ..Default::default()
        };
        let para = DirectStyleResolver.resolve_paragraph(&attrs, &ctx);
        assert_eq!(para.indent.unwrap().left, Some(48.0));
        assert!(para.page_break_before);

        let run = RunProperties {
            style_id: Some("Hidden".into()),
            italic: Some(false),
            ..Default::default()
        };
        let resolved = DirectStyleResolver.resolve_run(&run, &para, &ctx);
        assert!(resolved.is_hidden());
        assert_eq!(resolved.italic, Some(false));
    }

    #[test]
    fn test_bookmark_capture() {
        let mut table = BookmarkTable::new();
        table.register("before", 1);
        table.begin_capture();
        table.register("inside", 5);
        let captured = table.end_capture();

        assert_eq!(captured, vec![("inside".to_string(), 5)]);
        assert_eq!(table.get("before"), Some(1));
        assert_eq!(table.len(), 2);
    }
}
