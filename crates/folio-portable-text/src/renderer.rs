//! Portable text to HTML renderer.

use tracing::warn;

use crate::components::{Components, Mark};
use crate::node::{ListKind, MarkDef, Node, Span, TextBlock};
use crate::toc::{heading_id, toc_level};
use crate::util::escape_html;

/// Decorators in wrapping order, innermost first.
const DECORATOR_ORDER: &[&str] = &["strong", "em", "code", "underline", "strike-through"];

/// Rendered HTML for one top-level node, or one group of list items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Index of the (first) node in the document.
    pub index: usize,
    /// Rendered HTML.
    pub html: String,
}

/// Result of rendering a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Fragments in document order.
    pub fragments: Vec<Fragment>,
    /// Skipped nodes (malformed, unknown).
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// All fragments concatenated.
    pub fn html(&self) -> String {
        self.fragments.iter().map(|f| f.html.as_str()).collect()
    }
}

/// Renders a node sequence through a [`Components`] table.
///
/// Rendering is a pure function of the nodes and the table; one bad node never
/// affects its siblings.
#[derive(Debug)]
pub struct PortableTextRenderer {
    components: Components,
}

impl Default for PortableTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PortableTextRenderer {
    /// Renderer with the default HTML components.
    pub fn new() -> Self {
        Self {
            components: Components::html(),
        }
    }

    /// Replace the component table.
    #[must_use]
    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }

    /// Render `nodes` to HTML fragments.
    pub fn render(&self, nodes: &[Node]) -> RenderResult {
        let mut result = RenderResult::default();

        let mut index = 0;
        while index < nodes.len() {
            if let Some(kind) = list_kind(&nodes[index]) {
                let end = nodes[index..]
                    .iter()
                    .position(|n| list_kind(n).is_none())
                    .map_or(nodes.len(), |offset| index + offset);
                let items: Vec<(usize, &TextBlock)> = (index..end)
                    .filter_map(|i| nodes[i].as_block().map(|b| (i, b)))
                    .collect();
                let html = self.render_list(&items, kind);
                result.fragments.push(Fragment { index, html });
                index = end;
                continue;
            }

            let mut html = String::new();
            match &nodes[index] {
                Node::Block(block) => self.render_block(block, index, &mut html),
                Node::Unknown { type_name, .. }
                    if self.components.node_type(type_name).is_none() =>
                {
                    warn!(index, %type_name, "No component for node type");
                    result
                        .warnings
                        .push(format!("node {index}: no component for type '{type_name}'"));
                }
                Node::Malformed {
                    type_name, reason, ..
                } => {
                    warn!(index, %type_name, %reason, "Skipping malformed node");
                    result
                        .warnings
                        .push(format!("node {index}: malformed '{type_name}': {reason}"));
                }
                node => {
                    if let Some(component) = self.components.node_type(node.type_name()) {
                        component.render(node, index, &mut html);
                    }
                }
            }

            if !html.is_empty() {
                result.fragments.push(Fragment { index, html });
            }
            index += 1;
        }

        result
    }

    fn render_block(&self, block: &TextBlock, index: usize, out: &mut String) {
        let component = self
            .components
            .block(block.style.as_str())
            .or_else(|| self.components.block("normal"));
        if let Some(component) = component {
            let children = self.render_spans(block);
            component.render(block, index, &children, out);
        }
    }

    /// Render consecutive list items, nesting deeper levels in the open item.
    ///
    /// Items styled as TOC headings carry the heading anchor id.
    fn render_list(&self, items: &[(usize, &TextBlock)], first_kind: ListKind) -> String {
        let mut out = String::new();
        // Open lists, outermost first. Each has an unclosed `<li>`.
        let mut stack: Vec<(ListKind, u8)> = Vec::new();

        for &(index, item) in items {
            let kind = item.list_item.unwrap_or(first_kind);
            let level = item.level.unwrap_or(1).max(1);

            while let Some(&(open_kind, open_level)) = stack.last()
                && (open_level > level || (open_level == level && open_kind != kind))
            {
                out.push_str("</li>");
                out.push_str(list_close(open_kind));
                stack.pop();
            }

            match stack.last() {
                Some(&(_, open_level)) if open_level == level => out.push_str("</li>"),
                _ => {
                    out.push_str(list_open(kind));
                    stack.push((kind, level));
                }
            }

            if toc_level(item).is_some() {
                out.push_str(&format!(r#"<li id="{}">"#, heading_id(index)));
            } else {
                out.push_str("<li>");
            }
            out.push_str(&self.render_spans(item));
        }

        while let Some((open_kind, _)) = stack.pop() {
            out.push_str("</li>");
            out.push_str(list_close(open_kind));
        }
        out
    }

    fn render_spans(&self, block: &TextBlock) -> String {
        let mut out = String::new();
        for span in &block.children {
            self.render_span(span, &block.mark_defs, &mut out);
        }
        out
    }

    fn render_span(&self, span: &Span, mark_defs: &[MarkDef], out: &mut String) {
        let mut html = escape_html(&span.text).replace('\n', "<br>");

        for mark in ordered_marks(&span.marks, mark_defs) {
            if let Some(component) = self.components.mark(mark.name) {
                let mut wrapped = String::with_capacity(html.len() + 16);
                component.render(mark, &html, &mut wrapped);
                html = wrapped;
            }
        }

        out.push_str(&html);
    }
}

fn list_kind(node: &Node) -> Option<ListKind> {
    node.as_block().and_then(|b| b.list_item)
}

fn list_open(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Bullet => "<ul>",
        ListKind::Number => "<ol>",
    }
}

fn list_close(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Bullet => "</ul>",
        ListKind::Number => "</ol>",
    }
}

/// Resolve span marks and sort them innermost first.
///
/// Keys with a matching definition are annotations and go outside all
/// decorators. Duplicate decorators apply once.
fn ordered_marks<'a>(marks: &'a [String], mark_defs: &'a [MarkDef]) -> Vec<Mark<'a>> {
    let mut decorators: Vec<&str> = Vec::new();
    let mut annotations: Vec<Mark<'a>> = Vec::new();

    for key in marks {
        match mark_defs.iter().find(|d| d.key == *key) {
            Some(def) => annotations.push(Mark {
                name: &def.kind,
                def: Some(def),
            }),
            None => {
                if !decorators.contains(&key.as_str()) {
                    decorators.push(key);
                }
            }
        }
    }

    decorators.sort_by(|a, b| decorator_rank(a).cmp(&decorator_rank(b)).then(a.cmp(b)));
    annotations.sort_by(|a, b| a.name.cmp(b.name));

    decorators
        .into_iter()
        .map(|name| Mark { name, def: None })
        .chain(annotations)
        .collect()
}

fn decorator_rank(name: &str) -> usize {
    DECORATOR_ORDER
        .iter()
        .position(|d| *d == name)
        .unwrap_or(DECORATOR_ORDER.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::node::{BlockStyle, CodeBlock, ImageNode};
    use crate::toc::extract_toc;

    fn render(nodes: &[Node]) -> RenderResult {
        PortableTextRenderer::new().render(nodes)
    }

    fn nodes(value: serde_json::Value) -> Vec<Node> {
        serde_json::from_value(value).unwrap()
    }

    fn para(text: &str) -> Node {
        Node::Block(TextBlock::new(BlockStyle::Normal, text))
    }

    #[test]
    fn test_paragraph() {
        let result = render(&[para("Hello")]);
        assert_eq!(result.html(), "<p>Hello</p>");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render(&[para("<b>&</b>")]);
        assert_eq!(result.html(), "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
    }

    #[test]
    fn test_newline_renders_break() {
        let result = render(&[para("a\nb")]);
        assert_eq!(result.html(), "<p>a<br>b</p>");
    }

    #[test]
    fn test_heading_has_positional_id() {
        let result = render(&[para("x"), Node::Block(TextBlock::new(BlockStyle::H2, "Setup"))]);
        assert_eq!(result.fragments[1].html, r#"<h2 id="heading-1">Setup</h2>"#);
    }

    #[test]
    fn test_unknown_style_renders_as_normal() {
        let result = render(&[Node::Block(TextBlock::new(
            BlockStyle::Other("h6".to_owned()),
            "Odd",
        ))]);
        assert_eq!(result.html(), "<p>Odd</p>");
    }

    #[test]
    fn test_blockquote() {
        let result = render(&[Node::Block(TextBlock::new(BlockStyle::Blockquote, "Quote"))]);
        assert_eq!(result.html(), "<blockquote>Quote</blockquote>");
    }

    #[test]
    fn test_code_block_with_language_and_filename() {
        let result = render(&[Node::Code(CodeBlock {
            code: "print(1)".to_owned(),
            language: Some("python".to_owned()),
            filename: Some("a.py".to_owned()),
            ..CodeBlock::default()
        })]);

        let html = result.html();
        assert!(html.contains("print(1)"), "{html}");
        assert!(html.contains(r#"<figcaption class="code-filename">a.py</figcaption>"#));
        assert!(html.contains(r#"class="language-python""#));
    }

    #[test]
    fn test_code_block_without_language() {
        let result = render(&[Node::Code(CodeBlock {
            code: "plain".to_owned(),
            ..CodeBlock::default()
        })]);

        let html = result.html();
        assert!(html.contains(r#"class="language-text""#));
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn test_empty_code_block_renders_nothing() {
        let doc = nodes(json!([
            {"_type": "codeBlock", "code": "", "language": "rust"},
            {"_type": "block", "children": [{"_type": "span", "text": "after"}]}
        ]));

        let result = render(&doc);

        assert_eq!(result.fragments.len(), 1);
        assert_eq!(result.fragments[0].index, 1);
        assert_eq!(result.html(), "<p>after</p>");
    }

    #[test]
    fn test_code_block_escapes_code() {
        let result = render(&[Node::Code(CodeBlock {
            code: "if a < b && c > d {}".to_owned(),
            language: Some("rust".to_owned()),
            ..CodeBlock::default()
        })]);
        assert!(result.html().contains("if a &lt; b &amp;&amp; c &gt; d {}"));
    }

    #[test]
    fn test_code_block_highlight_lines() {
        let result = render(&[Node::Code(CodeBlock {
            code: "a\nb\nc".to_owned(),
            highlight_lines: Some("3, 1-2".to_owned()),
            ..CodeBlock::default()
        })]);
        assert!(result.html().contains(r#"data-highlight-lines="1-3""#));
    }

    #[test]
    fn test_unregistered_type_is_skipped() {
        let doc = nodes(json!([
            {"_type": "block", "children": [{"_type": "span", "text": "one"}]},
            {"_type": "youtube", "id": "abc"},
            {"_type": "block", "children": [{"_type": "span", "text": "two"}]}
        ]));

        let result = render(&doc);

        assert_eq!(
            result.fragments,
            vec![
                Fragment {
                    index: 0,
                    html: "<p>one</p>".to_owned(),
                },
                Fragment {
                    index: 2,
                    html: "<p>two</p>".to_owned(),
                },
            ]
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("youtube"));
    }

    #[test]
    fn test_registered_custom_type_renders() {
        let components = Components::html().with_type(
            "youtube",
            |node: &Node, _index: usize, out: &mut String| {
                if let Node::Unknown { value, .. } = node {
                    out.push_str(&format!(
                        "<iframe data-id=\"{}\"></iframe>",
                        value["id"].as_str().unwrap_or_default()
                    ));
                }
            },
        );
        let doc = nodes(json!([{"_type": "youtube", "id": "abc"}]));

        let result = PortableTextRenderer::new()
            .with_components(components)
            .render(&doc);

        assert_eq!(result.html(), r#"<iframe data-id="abc"></iframe>"#);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_malformed_node_is_isolated() {
        let doc = nodes(json!([
            {"_type": "codeBlock", "language": "rust"},
            {"_type": "block", "children": [{"_type": "span", "text": "ok"}]}
        ]));

        let result = render(&doc);

        assert_eq!(result.html(), "<p>ok</p>");
        assert_eq!(result.fragments[0].index, 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("codeBlock"));
    }

    #[test]
    fn test_image_uses_url_then_asset_url() {
        let doc = nodes(json!([
            {"_type": "image", "url": "https://cdn/a.png", "alt": "A"},
            {"_type": "image", "asset": {"_ref": "image-x", "url": "https://cdn/b.png"}},
            {"_type": "image", "asset": {"_ref": "image-y"}}
        ]));

        let result = render(&doc);

        assert_eq!(result.fragments.len(), 2);
        assert!(result.fragments[0].html.contains(r#"src="https://cdn/a.png" alt="A""#));
        assert!(result.fragments[1].html.contains(r#"src="https://cdn/b.png" alt="""#));
    }

    #[test]
    fn test_image_caption() {
        let result = render(&[Node::Image(ImageNode {
            url: Some("https://cdn/a.png".to_owned()),
            caption: Some("Figure 1".to_owned()),
            ..ImageNode::default()
        })]);
        assert!(result.html().contains("<figcaption>Figure 1</figcaption>"));
    }

    #[test]
    fn test_decorators_nest_in_fixed_order() {
        let a = render(&[Node::Block(TextBlock {
            children: vec![Span::new("x").with_marks(["em", "strong"])],
            ..TextBlock::default()
        })]);
        let b = render(&[Node::Block(TextBlock {
            children: vec![Span::new("x").with_marks(["strong", "em"])],
            ..TextBlock::default()
        })]);

        assert_eq!(a.html(), "<p><em><strong>x</strong></em></p>");
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_decorators() {
        let result = render(&[Node::Block(TextBlock {
            children: vec![
                Span::new("x").with_marks(["strike-through", "underline", "code"]),
            ],
            ..TextBlock::default()
        })]);
        assert_eq!(result.html(), "<p><s><u><code>x</code></u></s></p>");
    }

    #[test]
    fn test_unknown_decorator_renders_children() {
        let result = render(&[Node::Block(TextBlock {
            children: vec![Span::new("x").with_marks(["sparkle"])],
            ..TextBlock::default()
        })]);
        assert_eq!(result.html(), "<p>x</p>");
    }

    #[test]
    fn test_link_wraps_decorators() {
        let result = render(&[Node::Block(TextBlock {
            children: vec![Span::new("site").with_marks(["k1", "strong"])],
            mark_defs: vec![MarkDef::link("k1", "https://example.com", true)],
            ..TextBlock::default()
        })]);

        assert_eq!(
            result.html(),
            r#"<p><a href="https://example.com" target="_blank" rel="noopener noreferrer"><strong>site</strong></a></p>"#
        );
    }

    #[test]
    fn test_link_without_blank() {
        let result = render(&[Node::Block(TextBlock {
            children: vec![Span::new("home").with_marks(["k1"])],
            mark_defs: vec![MarkDef::link("k1", "/", false)],
            ..TextBlock::default()
        })]);
        assert_eq!(result.html(), r#"<p><a href="/">home</a></p>"#);
    }

    #[test]
    fn test_unsafe_link_renders_text_only() {
        let result = render(&[Node::Block(TextBlock {
            children: vec![Span::new("click").with_marks(["k1"])],
            mark_defs: vec![MarkDef::link("k1", "javascript:alert(1)", false)],
            ..TextBlock::default()
        })]);
        assert_eq!(result.html(), "<p>click</p>");
    }

    #[test]
    fn test_bullet_list_groups_items() {
        let doc = nodes(json!([
            {"_type": "block", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "text": "a"}]},
            {"_type": "block", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "text": "b"}]},
            {"_type": "block", "children": [{"_type": "span", "text": "after"}]}
        ]));

        let result = render(&doc);

        assert_eq!(result.fragments.len(), 2);
        assert_eq!(result.fragments[0].html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(result.fragments[1].index, 2);
    }

    #[test]
    fn test_nested_list() {
        let doc = nodes(json!([
            {"_type": "block", "listItem": "number", "level": 1, "children": [{"_type": "span", "text": "one"}]},
            {"_type": "block", "listItem": "bullet", "level": 2, "children": [{"_type": "span", "text": "sub"}]},
            {"_type": "block", "listItem": "number", "level": 1, "children": [{"_type": "span", "text": "two"}]}
        ]));

        let result = render(&doc);

        assert_eq!(
            result.html(),
            "<ol><li>one<ul><li>sub</li></ul></li><li>two</li></ol>"
        );
    }

    #[test]
    fn test_list_kind_change_starts_new_list() {
        let doc = nodes(json!([
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "a"}]},
            {"_type": "block", "listItem": "number", "children": [{"_type": "span", "text": "1"}]}
        ]));

        let result = render(&doc);

        assert_eq!(result.html(), "<ul><li>a</li></ul><ol><li>1</li></ol>");
    }

    #[test]
    fn test_toc_anchors_resolve() {
        let doc = nodes(json!([
            {"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "A"}]},
            {"_type": "block", "children": [{"_type": "span", "text": "x"}]},
            {"_type": "block", "style": "h2", "listItem": "bullet", "children": [{"_type": "span", "text": "Step"}]},
            {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "plain"}]},
            {"_type": "block", "style": "h3", "children": [{"_type": "span", "text": "C"}]}
        ]));

        let html = render(&doc).html();
        let toc = extract_toc(&doc);

        assert_eq!(toc.len(), 3);
        for entry in &toc {
            assert!(
                html.contains(&format!(r#"id="{}""#, entry.id)),
                "missing anchor {} in {html}",
                entry.id
            );
        }
        assert!(html.contains(r#"<ul><li id="heading-2">Step</li><li>plain</li></ul>"#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = vec![para("a"), Node::Block(TextBlock::new(BlockStyle::H3, "b"))];
        let renderer = PortableTextRenderer::new();
        assert_eq!(renderer.render(&doc), renderer.render(&doc));
    }

    #[test]
    fn test_empty_components_render_nothing() {
        let result = PortableTextRenderer::new()
            .with_components(Components::new())
            .render(&[para("x")]);
        assert!(result.fragments.is_empty());
    }
}
