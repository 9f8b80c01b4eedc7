//! Project page data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use folio_portable_text::Node;

use super::{Seo, nullable};

/// Project lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    InProgress,
    /// Default for projects without a stored status.
    #[default]
    Completed,
    OnHold,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "on-hold" => Ok(Self::OnHold),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown project status '{other}'")),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gallery image with a resolved URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Full project case study.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub image_caption: Option<String>,
    pub short_description: String,
    pub url: Option<String>,
    pub overview: Vec<Node>,
    pub gallery: Vec<GalleryImage>,
    pub technologies: Vec<String>,
    pub seo: Seo,
    pub status: ProjectStatus,
    pub featured: bool,
}

/// Project listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub short_description: String,
    pub url: Option<String>,
    pub status: ProjectStatus,
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProjectSummary {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "nullable")]
    title: String,
    #[serde(default, deserialize_with = "nullable")]
    slug: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_alt: Option<String>,
    #[serde(default)]
    image_caption: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    short_description: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProject {
    #[serde(flatten)]
    summary: RawProjectSummary,
    #[serde(default, deserialize_with = "nullable")]
    overview: Vec<Node>,
    #[serde(default, deserialize_with = "nullable")]
    image_gallery: Vec<GalleryImage>,
    #[serde(default, deserialize_with = "nullable")]
    technologies: Vec<String>,
    #[serde(default)]
    meta_title: Option<String>,
    #[serde(default)]
    meta_description: Option<String>,
    #[serde(default)]
    meta_keywords: Option<String>,
}

fn status(raw: Option<&str>) -> ProjectStatus {
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

impl From<RawProjectSummary> for ProjectSummary {
    fn from(raw: RawProjectSummary) -> Self {
        Self {
            status: status(raw.status.as_deref()),
            id: raw.id,
            title: raw.title,
            slug: raw.slug,
            image_url: raw.image,
            image_alt: raw.image_alt,
            short_description: raw.short_description,
            url: raw.url,
            featured: raw.featured,
        }
    }
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        let s = raw.summary;
        Self {
            status: status(s.status.as_deref()),
            id: s.id,
            title: s.title,
            slug: s.slug,
            image_url: s.image,
            image_alt: s.image_alt,
            image_caption: s.image_caption,
            short_description: s.short_description,
            url: s.url,
            overview: raw.overview,
            gallery: raw.image_gallery,
            technologies: raw.technologies,
            seo: Seo::from_wire(
                raw.meta_title,
                raw.meta_description,
                raw.meta_keywords.as_deref(),
            ),
            featured: s.featured,
        }
    }
}
