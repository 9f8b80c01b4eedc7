//! Table of contents extraction.

use serde::Serialize;

use crate::node::{Node, TextBlock};

/// Deepest heading level listed in the table of contents.
const MAX_TOC_LEVEL: u8 = 3;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Anchor id, matches the id the renderer puts on the heading.
    pub id: String,
    /// Heading text, marks stripped.
    pub text: String,
    /// Heading level (1-3).
    pub level: u8,
}

/// Anchor id of the heading at document position `index`.
pub fn heading_id(index: usize) -> String {
    format!("heading-{index}")
}

/// TOC level of a block, if its style is listed.
pub(crate) fn toc_level(block: &TextBlock) -> Option<u8> {
    block.style.heading_level().filter(|l| *l <= MAX_TOC_LEVEL)
}

/// Collect `h1`-`h3` headings in document order.
///
/// Ids are keyed by the heading's index in `nodes`, so they stay stable for
/// the same document. Headings with no text are skipped; whitespace counts as
/// text.
pub fn extract_toc(nodes: &[Node]) -> Vec<TocEntry> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let block = node.as_block()?;
            let level = toc_level(block)?;
            let text = block.plain_text();
            if text.is_empty() {
                return None;
            }
            Some(TocEntry {
                id: heading_id(index),
                text,
                level,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{BlockStyle, CodeBlock, Span};

    fn block(style: BlockStyle, text: &str) -> Node {
        Node::Block(TextBlock::new(style, text))
    }

    #[test]
    fn test_extract_headings_by_index() {
        let nodes = vec![
            block(BlockStyle::H1, "Intro"),
            block(BlockStyle::Normal, "x"),
            block(BlockStyle::H2, "Setup"),
            block(BlockStyle::H4, "Deep"),
        ];

        assert_eq!(
            extract_toc(&nodes),
            vec![
                TocEntry {
                    id: "heading-0".to_owned(),
                    text: "Intro".to_owned(),
                    level: 1,
                },
                TocEntry {
                    id: "heading-2".to_owned(),
                    text: "Setup".to_owned(),
                    level: 2,
                },
            ]
        );
    }

    #[test]
    fn test_skip_empty_heading() {
        let nodes = vec![
            block(BlockStyle::H2, ""),
            Node::Block(TextBlock {
                style: BlockStyle::H2,
                ..TextBlock::default()
            }),
        ];
        assert!(extract_toc(&nodes).is_empty());
    }

    #[test]
    fn test_whitespace_heading_is_kept() {
        let toc = extract_toc(&[block(BlockStyle::H2, " ")]);
        assert_eq!(
            toc,
            vec![TocEntry {
                id: "heading-0".to_owned(),
                text: " ".to_owned(),
                level: 2,
            }]
        );
    }

    #[test]
    fn test_text_joins_spans_without_marks() {
        let mut heading = TextBlock::new(BlockStyle::H3, "Using ");
        heading
            .children
            .push(Span::new("serde").with_marks(["code"]));
        let toc = extract_toc(&[Node::Block(heading)]);
        assert_eq!(toc[0].text, "Using serde");
        assert_eq!(toc[0].level, 3);
    }

    #[test]
    fn test_non_text_nodes_keep_index_positions() {
        let nodes = vec![
            Node::Code(CodeBlock {
                code: "fn main() {}".to_owned(),
                ..CodeBlock::default()
            }),
            block(BlockStyle::H2, "After code"),
        ];
        assert_eq!(extract_toc(&nodes)[0].id, "heading-1");
    }

    #[test]
    fn test_extract_is_deterministic() {
        let nodes = vec![block(BlockStyle::H1, "A"), block(BlockStyle::H2, "B")];
        assert_eq!(extract_toc(&nodes), extract_toc(&nodes));
    }
}
