//! Typed page data.
//!
//! Each public type has a private wire counterpart matching the query
//! projection; conversion drops dangling references, splits SEO keywords and
//! parses enumerations and timestamps leniently.

mod blog;
mod project;
mod site;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use blog::{Author, BlogPost, BlogPostSummary, Category};
pub(crate) use blog::{RawBlogPost, RawBlogPostSummary};
pub use project::{GalleryImage, Project, ProjectStatus, ProjectSummary};
pub(crate) use project::{RawProject, RawProjectSummary};
pub use site::{
    AboutPage, Experience, Homepage, SiteSettings, Skill, SkillCategory, SkillLevel, SocialLink,
    SocialPlatform,
};

/// SEO metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Keywords split on commas, trimmed, empties dropped.
    pub keywords: Vec<String>,
}

impl Seo {
    pub(crate) fn from_wire(
        title: Option<String>,
        description: Option<String>,
        keywords: Option<&str>,
    ) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            description: description.filter(|d| !d.is_empty()),
            keywords: split_keywords(keywords.unwrap_or_default()),
        }
    }
}

/// Split a comma-separated keyword string.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Deserialize `null` as the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse an RFC 3339 timestamp, `None` if absent or malformed.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
