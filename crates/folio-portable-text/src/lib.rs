//! Portable text model and HTML renderer with pluggable components.
//!
//! Rich text is an ordered sequence of [`Node`]s: text blocks with styled,
//! marked spans, plus code blocks, images and custom objects. The
//! [`PortableTextRenderer`] turns a sequence into one HTML [`Fragment`] per
//! top-level node using a [`Components`] table keyed by block style, node
//! type and mark name.
//!
//! # Example
//!
//! ```
//! use folio_portable_text::{BlockStyle, Node, PortableTextRenderer, TextBlock, extract_toc};
//!
//! let nodes = vec![
//!     Node::Block(TextBlock::new(BlockStyle::H1, "Hello")),
//!     Node::Block(TextBlock::new(BlockStyle::Normal, "World")),
//! ];
//! let result = PortableTextRenderer::new().render(&nodes);
//! let toc = extract_toc(&nodes);
//!
//! assert_eq!(result.html(), r#"<h1 id="heading-0">Hello</h1><p>World</p>"#);
//! assert_eq!(toc[0].id, "heading-0");
//! ```

mod components;
mod highlight;
mod html;
mod node;
mod renderer;
mod toc;
mod util;

pub use components::{BlockComponent, Components, Mark, MarkComponent, TypeComponent};
pub use highlight::HighlightLines;
pub use node::{
    AssetRef, BLOCK_TYPE, BlockStyle, CODE_BLOCK_TYPE, CodeBlock, CodeLanguage, IMAGE_TYPE,
    ImageNode, ListKind, MarkDef, Node, Span, TextBlock,
};
pub use renderer::{Fragment, PortableTextRenderer, RenderResult};
pub use toc::{TocEntry, extract_toc, heading_id};
pub use util::{escape_html, is_safe_href};
