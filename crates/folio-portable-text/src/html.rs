//! Default HTML components.
//!
//! Produces semantic HTML5:
//! - `<p>`, `<h1>`-`<h4>` (with `heading-<index>` ids) and `<blockquote>` for blocks
//! - `<figure>` with a filename caption and `<pre><code>` for code blocks
//! - `<figure>`/`<img>` for images
//! - `<strong>`, `<em>`, `<code>`, `<u>`, `<s>` and `<a>` for marks

use tracing::debug;

use crate::components::{Components, Mark};
use crate::highlight::HighlightLines;
use crate::node::{Node, TextBlock};
use crate::toc::heading_id;
use crate::util::{escape_html, is_safe_href};

impl Components {
    /// Default HTML component set.
    pub fn html() -> Self {
        Self::new()
            .with_block("normal", paragraph)
            .with_block("h1", heading)
            .with_block("h2", heading)
            .with_block("h3", heading)
            .with_block("h4", heading)
            .with_block("blockquote", blockquote)
            .with_type("codeBlock", code_block)
            .with_type("image", image)
            .with_mark("strong", decorator("strong"))
            .with_mark("em", decorator("em"))
            .with_mark("code", decorator("code"))
            .with_mark("underline", decorator("u"))
            .with_mark("strike-through", decorator("s"))
            .with_mark("link", link)
    }
}

fn paragraph(_block: &TextBlock, _index: usize, children: &str, out: &mut String) {
    out.push_str("<p>");
    out.push_str(children);
    out.push_str("</p>");
}

fn heading(block: &TextBlock, index: usize, children: &str, out: &mut String) {
    let level = block.style.heading_level().unwrap_or(2);
    out.push_str(&format!(
        r#"<h{level} id="{}">{children}</h{level}>"#,
        heading_id(index)
    ));
}

fn blockquote(_block: &TextBlock, _index: usize, children: &str, out: &mut String) {
    out.push_str("<blockquote>");
    out.push_str(children);
    out.push_str("</blockquote>");
}

fn code_block(node: &Node, _index: usize, out: &mut String) {
    let Node::Code(code) = node else {
        return;
    };
    if code.code.is_empty() {
        debug!(key = ?code.key, "Code block without code");
        return;
    }
    let language = code.language();

    out.push_str(r#"<figure class="code-block">"#);
    if let Some(filename) = code.filename.as_deref().filter(|f| !f.is_empty()) {
        out.push_str(&format!(
            r#"<figcaption class="code-filename">{}</figcaption>"#,
            escape_html(filename)
        ));
    }

    let highlight = code
        .highlight_lines
        .as_deref()
        .map(HighlightLines::parse)
        .filter(|h| !h.is_empty());
    match highlight {
        Some(lines) => out.push_str(&format!(
            r#"<pre data-highlight-lines="{lines}"><code class="language-{}">"#,
            language.tag()
        )),
        None => out.push_str(&format!(
            r#"<pre><code class="language-{}">"#,
            language.tag()
        )),
    }
    out.push_str(&escape_html(&code.code));
    out.push_str("</code></pre></figure>");
}

fn image(node: &Node, _index: usize, out: &mut String) {
    let Node::Image(image) = node else {
        return;
    };
    let Some(src) = image.src() else {
        debug!(key = ?image.key, "Image without resolvable URL");
        return;
    };
    let alt = image.alt.as_deref().unwrap_or_default();

    out.push_str(&format!(
        r#"<figure class="image"><img src="{}" alt="{}" loading="lazy">"#,
        escape_html(src),
        escape_html(alt)
    ));
    if let Some(caption) = image.caption.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
    }
    out.push_str("</figure>");
}

fn decorator(tag: &'static str) -> impl Fn(Mark<'_>, &str, &mut String) + Send + Sync {
    move |_mark: Mark<'_>, children: &str, out: &mut String| {
        out.push_str(&format!("<{tag}>{children}</{tag}>"));
    }
}

fn link(mark: Mark<'_>, children: &str, out: &mut String) {
    let Some(def) = mark.def else {
        out.push_str(children);
        return;
    };
    match def.href().map(str::trim) {
        Some(href) if is_safe_href(href) => {
            let target = if def.blank() {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            out.push_str(&format!(
                r#"<a href="{}"{target}>{children}</a>"#,
                escape_html(href)
            ));
        }
        href => {
            debug!(?href, "Dropping link with unsafe or missing href");
            out.push_str(children);
        }
    }
}
