//! `folio render` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use folio_config::{CliSettings, Config};
use folio_portable_text::{Node, PortableTextRenderer, RenderResult, TocEntry, extract_toc};
use folio_store::Fetcher;
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Document type to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DocumentKind {
    Blog,
    Project,
}

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// HTML on stdout, table of contents on stderr.
    #[default]
    Html,
    /// `{ toc, content, warnings }` as JSON on stdout.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document type.
    kind: DocumentKind,

    /// Document slug.
    slug: String,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read from a dataset export instead of the remote store.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Serialize)]
struct Rendered<'a> {
    toc: &'a [TocEntry],
    content: String,
    warnings: &'a [String],
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or does not exist.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            export_file: self.export.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let fetcher = Fetcher::from_config(config.require_store()?)?;

        let (nodes, toc) = self.fetch(&fetcher)?;
        let result = PortableTextRenderer::new().render(&nodes);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        match self.format {
            Format::Html => {
                print_toc(&output, &toc);
                output.print(&result.html())?;
            }
            Format::Json => output.print(&render_json(&result, &toc)?)?,
        }
        Ok(())
    }

    /// Fetch the document body and its table of contents.
    fn fetch(&self, fetcher: &Fetcher) -> Result<(Vec<Node>, Vec<TocEntry>), CliError> {
        let not_found = || {
            CliError::NotFound(format!(
                "No {} with slug '{}'",
                self.kind_name(),
                self.slug
            ))
        };
        match self.kind {
            DocumentKind::Blog => {
                let post = fetcher.blog_post(&self.slug)?.ok_or_else(not_found)?;
                let toc = post.table_of_contents();
                Ok((post.body, toc))
            }
            DocumentKind::Project => {
                let project = fetcher.project(&self.slug)?.ok_or_else(not_found)?;
                let toc = extract_toc(&project.overview);
                Ok((project.overview, toc))
            }
        }
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            DocumentKind::Blog => "blog post",
            DocumentKind::Project => "project",
        }
    }
}

fn print_toc(output: &Output, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    output.highlight("Table of contents:");
    for entry in toc {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        output.info(&format!("{indent}- {} (#{})", entry.text, entry.id));
    }
}

fn render_json(result: &RenderResult, toc: &[TocEntry]) -> Result<String, CliError> {
    let rendered = Rendered {
        toc,
        content: result.html(),
        warnings: &result.warnings,
    };
    Ok(serde_json::to_string_pretty(&rendered)?)
}

#[cfg(test)]
mod tests {
    use folio_portable_text::{BlockStyle, TextBlock};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_json_shape() {
        let nodes = vec![Node::Block(TextBlock::new(BlockStyle::H2, "Intro"))];
        let result = PortableTextRenderer::new().render(&nodes);
        let toc = extract_toc(&nodes);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&result, &toc).unwrap()).unwrap();

        assert_eq!(json["content"], r#"<h2 id="heading-0">Intro</h2>"#);
        assert_eq!(json["toc"][0]["level"], 2);
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
