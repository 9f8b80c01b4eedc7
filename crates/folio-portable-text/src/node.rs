//! Portable text node model.
//!
//! A rich-text document is an ordered `Vec<Node>`. Nodes are decoded one at
//! a time from JSON: a node with a known `_type` but missing or mistyped
//! fields becomes [`Node::Malformed`] instead of failing the whole document.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminant of text blocks.
pub const BLOCK_TYPE: &str = "block";
/// Discriminant of code block objects.
pub const CODE_BLOCK_TYPE: &str = "codeBlock";
/// Discriminant of image objects.
pub const IMAGE_TYPE: &str = "image";

/// A top-level rich-text node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Text block with inline spans.
    Block(TextBlock),
    /// Code block object.
    Code(CodeBlock),
    /// Image object.
    Image(ImageNode),
    /// Custom object of a type this crate does not model.
    Unknown {
        /// The node's `_type`.
        type_name: String,
        /// Raw node value.
        value: Value,
    },
    /// Node of a known type that failed to decode.
    Malformed {
        /// The node's `_type`, empty when absent.
        type_name: String,
        /// Decode error.
        reason: String,
        /// Raw node value.
        value: Value,
    },
}

impl Node {
    /// The node's `_type` discriminant.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Block(_) => BLOCK_TYPE,
            Self::Code(_) => CODE_BLOCK_TYPE,
            Self::Image(_) => IMAGE_TYPE,
            Self::Unknown { type_name, .. } | Self::Malformed { type_name, .. } => type_name,
        }
    }

    /// Decode a node from a raw JSON value.
    pub fn from_value(value: Value) -> Self {
        let type_name = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        match type_name.as_str() {
            BLOCK_TYPE | CODE_BLOCK_TYPE | IMAGE_TYPE => {
                match serde_json::from_value::<Typed>(value.clone()) {
                    Ok(Typed::Block(block)) => Self::Block(block),
                    Ok(Typed::Code(code)) => Self::Code(code),
                    Ok(Typed::Image(image)) => Self::Image(image),
                    Err(err) => Self::Malformed {
                        type_name,
                        reason: err.to_string(),
                        value,
                    },
                }
            }
            "" => Self::Malformed {
                type_name,
                reason: "missing _type".to_owned(),
                value,
            },
            _ => Self::Unknown { type_name, value },
        }
    }

    /// Text block, if this node is one.
    pub fn as_block(&self) -> Option<&TextBlock> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// Tagged form of the modelled node types.
#[derive(Serialize, Deserialize)]
#[serde(tag = "_type")]
enum Typed {
    #[serde(rename = "block")]
    Block(TextBlock),
    #[serde(rename = "codeBlock")]
    Code(CodeBlock),
    #[serde(rename = "image")]
    Image(ImageNode),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Block(block) => Typed::Block(block.clone()).serialize(serializer),
            Self::Code(code) => Typed::Code(code.clone()).serialize(serializer),
            Self::Image(image) => Typed::Image(image.clone()).serialize(serializer),
            Self::Unknown { value, .. } | Self::Malformed { value, .. } => {
                value.serialize(serializer)
            }
        }
    }
}

/// Block style tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockStyle {
    /// Paragraph.
    #[default]
    Normal,
    /// Heading level 1.
    H1,
    /// Heading level 2.
    H2,
    /// Heading level 3.
    H3,
    /// Heading level 4.
    H4,
    /// Quotation.
    Blockquote,
    /// Style not in the closed set.
    Other(String),
}

impl BlockStyle {
    /// Style tag as stored.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::Blockquote => "blockquote",
            Self::Other(s) => s,
        }
    }

    /// Heading level (1-4) for heading styles.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::H4 => Some(4),
            _ => None,
        }
    }
}

impl From<String> for BlockStyle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "normal" => Self::Normal,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "blockquote" => Self::Blockquote,
            _ => Self::Other(s),
        }
    }
}

impl From<BlockStyle> for String {
    fn from(style: BlockStyle) -> Self {
        style.as_str().to_owned()
    }
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List flavour of a list-item block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Unordered list.
    Bullet,
    /// Ordered list.
    Number,
}

/// Text block: a style and inline spans.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Block key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Style tag.
    #[serde(default)]
    pub style: BlockStyle,
    /// Inline spans.
    #[serde(default)]
    pub children: Vec<Span>,
    /// Annotation definitions referenced by span marks.
    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
    /// List flavour when the block is a list item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListKind>,
    /// List nesting level (1-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl TextBlock {
    /// Create a block of the given style with one unmarked span.
    pub fn new(style: BlockStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            children: vec![Span::new(text)],
            ..Self::default()
        }
    }

    /// Concatenated span text, marks ignored.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    /// Find the annotation definition for a mark key.
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|d| d.key == key)
    }
}

/// Inline span.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Span key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Raw text.
    #[serde(default)]
    pub text: String,
    /// Decorator names and annotation keys.
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Span {
    /// Unmarked span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            key: None,
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Span with the given marks.
    #[must_use]
    pub fn with_marks<I, S>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marks = marks.into_iter().map(Into::into).collect();
        self
    }
}

/// Annotation definition (e.g. a link).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    /// Key referenced from span marks.
    #[serde(rename = "_key")]
    pub key: String,
    /// Annotation type (e.g. `link`).
    #[serde(rename = "_type")]
    pub kind: String,
    /// Annotation fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MarkDef {
    /// Link annotation.
    pub fn link(key: impl Into<String>, href: impl Into<String>, blank: bool) -> Self {
        let mut fields = Map::new();
        fields.insert("href".to_owned(), Value::String(href.into()));
        fields.insert("blank".to_owned(), Value::Bool(blank));
        Self {
            key: key.into(),
            kind: "link".to_owned(),
            fields,
        }
    }

    /// Link target.
    pub fn href(&self) -> Option<&str> {
        self.fields.get("href").and_then(Value::as_str)
    }

    /// Whether the link opens in a new tab.
    pub fn blank(&self) -> bool {
        self.fields
            .get("blank")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Code block object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Block key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Source text.
    pub code: String,
    /// Language tag as stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Optional filename caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Line highlight spec (e.g. `1,3-5,10`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_lines: Option<String>,
}

impl CodeBlock {
    /// Language, falling back to [`CodeLanguage::Text`] when absent or unknown.
    pub fn language(&self) -> CodeLanguage {
        self.language
            .as_deref()
            .and_then(CodeLanguage::from_tag)
            .unwrap_or_default()
    }
}

/// Closed set of code block languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CodeLanguage {
    JavaScript,
    TypeScript,
    Python,
    Html,
    Css,
    Json,
    Bash,
    Sql,
    Php,
    Java,
    Cpp,
    Go,
    Rust,
    Swift,
    Kotlin,
    Dart,
    /// Plain text.
    #[default]
    Text,
}

impl CodeLanguage {
    /// All languages in authoring order.
    pub const ALL: [Self; 17] = [
        Self::JavaScript,
        Self::TypeScript,
        Self::Python,
        Self::Html,
        Self::Css,
        Self::Json,
        Self::Bash,
        Self::Sql,
        Self::Php,
        Self::Java,
        Self::Cpp,
        Self::Go,
        Self::Rust,
        Self::Swift,
        Self::Kotlin,
        Self::Dart,
        Self::Text,
    ];

    /// Parse a stored language tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }

    /// Stored tag, also used for the `language-*` class.
    pub fn tag(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::Sql => "sql",
            Self::Php => "php",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Dart => "dart",
            Self::Text => "text",
        }
    }

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Bash => "Bash",
            Self::Sql => "SQL",
            Self::Php => "PHP",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Swift => "Swift",
            Self::Kotlin => "Kotlin",
            Self::Dart => "Dart",
            Self::Text => "Other",
        }
    }
}

/// Image object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    /// Block key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// URL resolved by the query layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
    /// Alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImageNode {
    /// Display source: `url`, else the dereferenced asset URL.
    pub fn src(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| {
                self.asset
                    .as_ref()
                    .and_then(|a| a.url.as_deref())
                    .filter(|u| !u.is_empty())
            })
    }
}

/// Reference to a stored asset, optionally dereferenced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset document id.
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Asset URL when the asset was dereferenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_text_block() {
        let node: Node = serde_json::from_value(json!({
            "_type": "block",
            "_key": "a1",
            "style": "h2",
            "children": [{"_type": "span", "text": "Hello", "marks": ["strong"]}],
            "markDefs": []
        }))
        .unwrap();

        let Node::Block(block) = node else {
            panic!("expected block, got {node:?}");
        };
        assert_eq!(block.style, BlockStyle::H2);
        assert_eq!(block.key.as_deref(), Some("a1"));
        assert_eq!(block.plain_text(), "Hello");
        assert_eq!(block.children[0].marks, vec!["strong".to_owned()]);
    }

    #[test]
    fn test_decode_unknown_style_kept() {
        let node = Node::from_value(json!({"_type": "block", "style": "h6", "children": []}));
        assert_eq!(
            node.as_block().unwrap().style,
            BlockStyle::Other("h6".to_owned())
        );
    }

    #[test]
    fn test_decode_code_block() {
        let node = Node::from_value(json!({
            "_type": "codeBlock",
            "code": "print(1)",
            "language": "python",
            "filename": "a.py",
            "highlightLines": "1"
        }));

        let Node::Code(code) = node else {
            panic!("expected code block, got {node:?}");
        };
        assert_eq!(code.code, "print(1)");
        assert_eq!(code.language(), CodeLanguage::Python);
        assert_eq!(code.filename.as_deref(), Some("a.py"));
        assert_eq!(code.highlight_lines.as_deref(), Some("1"));
    }

    #[test]
    fn test_code_block_without_code_is_malformed() {
        let node = Node::from_value(json!({"_type": "codeBlock", "language": "rust"}));
        assert!(
            matches!(&node, Node::Malformed { type_name, .. } if type_name == "codeBlock"),
            "got {node:?}"
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_text() {
        let code = CodeBlock {
            code: "x".to_owned(),
            language: Some("cobol".to_owned()),
            ..CodeBlock::default()
        };
        assert_eq!(code.language(), CodeLanguage::Text);
        assert_eq!(CodeBlock::default().language(), CodeLanguage::Text);
    }

    #[test]
    fn test_decode_unknown_type() {
        let node = Node::from_value(json!({"_type": "youtube", "url": "https://y"}));
        assert_eq!(node.type_name(), "youtube");
        assert!(matches!(node, Node::Unknown { .. }));
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let node = Node::from_value(json!({"text": "orphan"}));
        assert!(matches!(node, Node::Malformed { .. }));
    }

    #[test]
    fn test_document_with_bad_node_still_decodes() {
        let nodes: Vec<Node> = serde_json::from_value(json!([
            {"_type": "block", "children": [{"_type": "span", "text": "a"}]},
            {"_type": "image", "alt": 42},
            {"_type": "block", "children": [{"_type": "span", "text": "b"}]}
        ]))
        .unwrap();

        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[1], Node::Malformed { .. }));
        assert_eq!(nodes[2].as_block().unwrap().plain_text(), "b");
    }

    #[test]
    fn test_image_src_resolution() {
        let with_url = ImageNode {
            url: Some("https://cdn/a.png".to_owned()),
            asset: Some(AssetRef {
                reference: None,
                url: Some("https://cdn/b.png".to_owned()),
            }),
            ..ImageNode::default()
        };
        assert_eq!(with_url.src(), Some("https://cdn/a.png"));

        let asset_only = ImageNode {
            asset: Some(AssetRef {
                reference: Some("image-abc-10x10-png".to_owned()),
                url: Some("https://cdn/b.png".to_owned()),
            }),
            ..ImageNode::default()
        };
        assert_eq!(asset_only.src(), Some("https://cdn/b.png"));

        let unresolved = ImageNode {
            url: Some(String::new()),
            asset: Some(AssetRef {
                reference: Some("image-abc-10x10-png".to_owned()),
                url: None,
            }),
            ..ImageNode::default()
        };
        assert_eq!(unresolved.src(), None);
    }

    #[test]
    fn test_serialize_keeps_type_tag() {
        let node = Node::Block(TextBlock::new(BlockStyle::H1, "Title"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["_type"], "block");
        assert_eq!(value["style"], "h1");
        assert_eq!(value["children"][0]["text"], "Title");
    }

    #[test]
    fn test_serialize_unknown_is_raw() {
        let raw = json!({"_type": "youtube", "id": "xyz"});
        let node = Node::from_value(raw.clone());
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn test_link_mark_def() {
        let def: MarkDef = serde_json::from_value(json!({
            "_key": "k1", "_type": "link", "href": "https://example.com", "blank": true
        }))
        .unwrap();
        assert_eq!(def.kind, "link");
        assert_eq!(def.href(), Some("https://example.com"));
        assert!(def.blank());
    }
}
