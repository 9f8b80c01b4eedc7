//! Content schema for the portfolio.
//!
//! Declares the authorable document types ([`Schema::portfolio`]), validates
//! stored documents against them ([`Schema::validate`]) and derives slugs
//! from titles ([`slugify`]).
//!
//! The schema is data: it serializes to JSON for tooling, and validation walks
//! it generically rather than hard-coding per-type checks.

mod documents;
mod types;
mod validation;

use serde::Serialize;

pub use documents::{
    ABOUT_PAGE, BLOG, BLOG_AUTHOR, BLOG_CATEGORY, CODE_LANGUAGES, HOMEPAGE, PROJECT,
    PROJECT_STATUSES, SITE_SETTINGS, SKILL_LEVELS, SLUG_MAX_LENGTH, SOCIAL_PLATFORMS,
};
pub use types::{BlockContent, Field, FieldKind, Rule, SchemaType, TypeKind, link_annotation};
pub use validation::ValidationIssue;

/// A set of document and object types.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schema {
    pub types: Vec<SchemaType>,
}

impl Schema {
    /// The portfolio schema: blog posts, authors, categories, projects and
    /// the site settings, homepage and about page singletons.
    pub fn portfolio() -> Self {
        Self {
            types: documents::all(),
        }
    }

    /// Document type by name.
    pub fn document(&self, name: &str) -> Option<&SchemaType> {
        self.types
            .iter()
            .find(|t| t.kind == TypeKind::Document && t.name == name)
    }
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, transliterates to ASCII, joins words with `-` and truncates to
/// [`SLUG_MAX_LENGTH`] characters without leaving a trailing dash.
///
/// # Examples
///
/// ```
/// use folio_schema::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
/// ```
pub fn slugify(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.len() <= SLUG_MAX_LENGTH {
        return slug;
    }
    // slugify output is ASCII, byte slicing is safe.
    slug[..SLUG_MAX_LENGTH].trim_end_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_portfolio_has_seven_documents() {
        let schema = Schema::portfolio();
        let names: Vec<&str> = schema.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                BLOG_AUTHOR,
                BLOG_CATEGORY,
                BLOG,
                PROJECT,
                SITE_SETTINGS,
                HOMEPAGE,
                ABOUT_PAGE
            ]
        );
    }

    #[test]
    fn test_singletons() {
        let schema = Schema::portfolio();
        let singletons: Vec<&str> = schema
            .types
            .iter()
            .filter(|t| t.singleton)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(singletons, vec![SITE_SETTINGS, HOMEPAGE, ABOUT_PAGE]);
    }

    #[test]
    fn test_blog_field_rules() {
        let schema = Schema::portfolio();
        let blog = schema.document(BLOG).unwrap();

        let title = blog.field("title").unwrap();
        assert!(title.is_required());
        assert!(title.rules.contains(&Rule::Max { value: 100.0 }));

        let related = blog.field("relatedPosts").unwrap();
        assert!(!related.is_required());
        assert!(related.rules.contains(&Rule::Max { value: 3.0 }));

        let FieldKind::BlockContent(content) = &blog.field("content").unwrap().kind else {
            panic!("content should be block content");
        };
        assert!(content.decorators.contains(&"strike-through".to_owned()));
        assert_eq!(content.types.len(), 2);
    }

    #[test]
    fn test_schema_serializes_to_json() {
        let value = serde_json::to_value(Schema::portfolio()).unwrap();
        let blog = &value["types"][2];
        assert_eq!(blog["name"], "blog");
        assert_eq!(blog["type"], "document");
        assert_eq!(blog["fields"][0]["name"], "title");
        assert_eq!(blog["fields"][0]["type"], "string");
        assert_eq!(blog["fields"][1]["type"], "slug");
        assert_eq!(blog["fields"][1]["maxLength"], 96);
        assert_eq!(blog["fields"][0]["rules"][0]["rule"], "required");
    }

    #[test]
    fn test_unknown_document() {
        assert!(Schema::portfolio().document("widget").is_none());
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My First Post"), "my-first-post");
        assert_eq!(slugify("  Rust & WebAssembly  "), "rust-webassembly");
    }

    #[test]
    fn test_slugify_truncates() {
        let slug = slugify(&"word ".repeat(40));
        assert!(slug.len() <= SLUG_MAX_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(slug.starts_with("word-word"));
    }
}
