//! Pluggable render components.
//!
//! Three tables drive rendering: block styles, custom object types and marks.
//! Each entry is a boxed component; closures with the right signature are
//! components too.

use std::collections::HashMap;

use crate::node::{MarkDef, Node, TextBlock};

/// Renders a text block of one style.
pub trait BlockComponent: Send + Sync {
    /// Write the block wrapping the already rendered `children` to `out`.
    ///
    /// `index` is the block's position in the document.
    fn render(&self, block: &TextBlock, index: usize, children: &str, out: &mut String);
}

impl<F> BlockComponent for F
where
    F: Fn(&TextBlock, usize, &str, &mut String) + Send + Sync,
{
    fn render(&self, block: &TextBlock, index: usize, children: &str, out: &mut String) {
        self(block, index, children, out);
    }
}

/// Renders a non-text node (code block, image, custom object).
pub trait TypeComponent: Send + Sync {
    /// Write the node at `index` to `out`.
    fn render(&self, node: &Node, index: usize, out: &mut String);
}

impl<F> TypeComponent for F
where
    F: Fn(&Node, usize, &mut String) + Send + Sync,
{
    fn render(&self, node: &Node, index: usize, out: &mut String) {
        self(node, index, out);
    }
}

/// A mark applied to a span.
#[derive(Clone, Copy, Debug)]
pub struct Mark<'a> {
    /// Decorator name or annotation type.
    pub name: &'a str,
    /// Annotation definition; `None` for decorators.
    pub def: Option<&'a MarkDef>,
}

/// Wraps span content in a mark.
pub trait MarkComponent: Send + Sync {
    /// Write `children` wrapped in `mark` to `out`.
    fn render(&self, mark: Mark<'_>, children: &str, out: &mut String);
}

impl<F> MarkComponent for F
where
    F: Fn(Mark<'_>, &str, &mut String) + Send + Sync,
{
    fn render(&self, mark: Mark<'_>, children: &str, out: &mut String) {
        self(mark, children, out);
    }
}

/// Component tables keyed by style, type and mark name.
#[derive(Default)]
pub struct Components {
    blocks: HashMap<String, Box<dyn BlockComponent>>,
    types: HashMap<String, Box<dyn TypeComponent>>,
    marks: HashMap<String, Box<dyn MarkComponent>>,
}

impl Components {
    /// Empty tables. Nothing renders until components are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block style component, replacing any existing one.
    #[must_use]
    pub fn with_block(mut self, style: impl Into<String>, c: impl BlockComponent + 'static) -> Self {
        self.blocks.insert(style.into(), Box::new(c));
        self
    }

    /// Register a node type component, replacing any existing one.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>, c: impl TypeComponent + 'static) -> Self {
        self.types.insert(type_name.into(), Box::new(c));
        self
    }

    /// Register a mark component, replacing any existing one.
    #[must_use]
    pub fn with_mark(mut self, name: impl Into<String>, c: impl MarkComponent + 'static) -> Self {
        self.marks.insert(name.into(), Box::new(c));
        self
    }

    /// Component for a block style.
    pub fn block(&self, style: &str) -> Option<&dyn BlockComponent> {
        self.blocks.get(style).map(AsRef::as_ref)
    }

    /// Component for a node type.
    pub fn node_type(&self, type_name: &str) -> Option<&dyn TypeComponent> {
        self.types.get(type_name).map(AsRef::as_ref)
    }

    /// Component for a mark name.
    pub fn mark(&self, name: &str) -> Option<&dyn MarkComponent> {
        self.marks.get(name).map(AsRef::as_ref)
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut blocks: Vec<_> = self.blocks.keys().collect();
        let mut types: Vec<_> = self.types.keys().collect();
        let mut marks: Vec<_> = self.marks.keys().collect();
        blocks.sort();
        types.sort();
        marks.sort();
        f.debug_struct("Components")
            .field("blocks", &blocks)
            .field("types", &types)
            .field("marks", &marks)
            .finish()
    }
}
