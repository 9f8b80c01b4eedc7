//! Blog page data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_portable_text::{Node, TocEntry, extract_toc};

use super::{Seo, nullable, parse_timestamp};
use crate::query::MAX_RELATED_POSTS;

/// Post author.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename(deserialize = "image"))]
    pub image_url: Option<String>,
}

/// Post category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
}

/// Full blog post.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub image_url: Option<String>,
    pub read_time_minutes: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
    /// `None` when the author reference is dangling.
    pub author: Option<Author>,
    /// `None` when the category reference is dangling.
    pub category: Option<Category>,
    pub body: Vec<Node>,
    /// At most three, in stored order, dangling entries dropped.
    pub related_posts: Vec<BlogPostSummary>,
    pub enable_toc: bool,
    pub seo: Seo,
}

impl BlogPost {
    /// Table of contents, empty unless enabled on the post.
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        if self.enable_toc {
            extract_toc(&self.body)
        } else {
            Vec::new()
        }
    }

    /// Summary view of this post.
    pub fn summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            read_time_minutes: self.read_time_minutes,
            published_at: self.published_at,
            author: self.author.clone(),
            category: self.category.clone(),
            seo: self.seo.clone(),
        }
    }
}

/// Blog post listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub image_url: Option<String>,
    pub read_time_minutes: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<Author>,
    pub category: Option<Category>,
    pub seo: Seo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBlogPostSummary {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "nullable")]
    slug: String,
    #[serde(default, deserialize_with = "nullable")]
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    read_time: Option<f64>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    meta_title: Option<String>,
    #[serde(default)]
    meta_description: Option<String>,
    #[serde(default)]
    meta_keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBlogPost {
    #[serde(flatten)]
    summary: RawBlogPostSummary,
    #[serde(default, deserialize_with = "nullable")]
    content: Vec<Node>,
    #[serde(default, deserialize_with = "nullable")]
    related_posts: Vec<Option<RawBlogPostSummary>>,
    #[serde(default, deserialize_with = "nullable")]
    enable_table_of_contents: bool,
}

/// Whole minutes from a stored number; negative or non-finite values are dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes(value: Option<f64>) -> Option<u32> {
    value
        .filter(|m| m.is_finite() && *m >= 0.0 && *m <= f64::from(u32::MAX))
        .map(|m| m.round() as u32)
}

impl From<RawBlogPostSummary> for BlogPostSummary {
    fn from(raw: RawBlogPostSummary) -> Self {
        Self {
            seo: Seo::from_wire(
                raw.meta_title,
                raw.meta_description,
                raw.meta_keywords.as_deref(),
            ),
            id: raw.id,
            slug: raw.slug,
            title: raw.title,
            image_url: raw.image,
            read_time_minutes: minutes(raw.read_time),
            published_at: parse_timestamp(raw.published_date.as_deref()),
            author: raw.author,
            category: raw.category,
        }
    }
}

impl From<RawBlogPost> for BlogPost {
    fn from(raw: RawBlogPost) -> Self {
        let related_posts = raw
            .related_posts
            .into_iter()
            .flatten()
            .take(MAX_RELATED_POSTS)
            .map(BlogPostSummary::from)
            .collect();
        let summary = BlogPostSummary::from(raw.summary);

        Self {
            id: summary.id,
            slug: summary.slug,
            title: summary.title,
            image_url: summary.image_url,
            read_time_minutes: summary.read_time_minutes,
            published_at: summary.published_at,
            author: summary.author,
            category: summary.category,
            body: raw.content,
            related_posts,
            enable_toc: raw.enable_table_of_contents,
            seo: summary.seo,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw_post(value: serde_json::Value) -> BlogPost {
        serde_json::from_value::<RawBlogPost>(value).unwrap().into()
    }

    #[test]
    fn test_convert_full_post() {
        let post = raw_post(json!({
            "_id": "p1",
            "slug": "hello",
            "title": "Hello",
            "image": "https://cdn/hero.png",
            "readTime": 5,
            "publishedDate": "2025-01-02T10:00:00Z",
            "enableTableOfContents": true,
            "author": {"name": "Ada", "description": "Writer", "image": "https://cdn/ada.png"},
            "category": {"title": "Rust", "slug": "rust"},
            "content": [
                {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Intro"}]}
            ],
            "relatedPosts": [],
            "metaTitle": "Hello!",
            "metaDescription": null,
            "metaKeywords": "rust, web"
        }));

        assert_eq!(post.id, "p1");
        assert_eq!(post.read_time_minutes, Some(5));
        assert_eq!(
            post.author.as_ref().unwrap().image_url.as_deref(),
            Some("https://cdn/ada.png")
        );
        assert_eq!(post.category.as_ref().unwrap().slug, "rust");
        assert_eq!(post.seo.keywords, vec!["rust".to_owned(), "web".to_owned()]);
        assert_eq!(post.seo.description, None);
        assert_eq!(post.table_of_contents()[0].id, "heading-0");
    }

    #[test]
    fn test_related_posts_first_three_non_dangling() {
        let related: Vec<_> = ["r1", "r2", "r3", "r4"]
            .iter()
            .map(|id| json!({"_id": id, "slug": id, "title": id}))
            .collect();
        let post = raw_post(json!({"_id": "p1", "slug": "p", "title": "P", "relatedPosts": related}));
        let ids: Vec<&str> = post.related_posts.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);

        let post = raw_post(json!({
            "_id": "p1",
            "slug": "p",
            "title": "P",
            "relatedPosts": [null, {"_id": "r2", "slug": "r2", "title": "R2"}]
        }));
        assert_eq!(post.related_posts.len(), 1);
        assert_eq!(post.related_posts[0].id, "r2");
    }

    #[test]
    fn test_dangling_author_is_none() {
        let post = raw_post(json!({"_id": "p1", "slug": "p", "title": "P", "author": null}));
        assert_eq!(post.author, None);
        assert!(post.body.is_empty());
        assert!(!post.enable_toc);
    }

    #[test]
    fn test_toc_disabled_is_empty() {
        let post = raw_post(json!({
            "_id": "p1",
            "slug": "p",
            "title": "P",
            "content": [{"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "A"}]}]
        }));
        assert!(post.table_of_contents().is_empty());
    }

    #[test]
    fn test_serialize_page_shape() {
        let post = raw_post(json!({"_id": "p1", "slug": "p", "title": "P", "readTime": 3}));
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["readTimeMinutes"], 3);
        assert_eq!(value["enableToc"], false);
        assert!(value["relatedPosts"].as_array().unwrap().is_empty());
        assert!(value.get("seo").is_some());
    }

    #[test]
    fn test_minutes() {
        assert_eq!(minutes(Some(4.6)), Some(5));
        assert_eq!(minutes(Some(-1.0)), None);
        assert_eq!(minutes(None), None);
    }
}
