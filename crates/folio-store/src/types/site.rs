//! Singleton page data: site settings, homepage and about page.
//!
//! These deserialize straight from the query projection; field names are the
//! same on the wire and in page data.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use folio_portable_text::Node;

use super::nullable;

/// Social network of a profile link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Linkedin,
    Github,
    Twitter,
    Instagram,
    Facebook,
    Youtube,
    #[default]
    #[serde(other)]
    Other,
}

/// Skill proficiency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Global site settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub social_links: Vec<SocialLink>,
    /// Resume file URL.
    pub resume_file: Option<String>,
    /// Default social sharing image URL.
    pub seo_image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "nullable")]
    pub platform: SocialPlatform,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Custom label, mainly for [`SocialPlatform::Other`].
    pub label: Option<String>,
}

impl SocialLink {
    /// Label to display: custom label, else the platform name.
    pub fn display_label(&self) -> String {
        match self.label.as_deref().filter(|l| !l.is_empty()) {
            Some(label) => label.to_owned(),
            None => format!("{:?}", self.platform),
        }
    }
}

/// Homepage content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Homepage {
    #[serde(deserialize_with = "nullable")]
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    /// Hero background image URL.
    pub hero_image: Option<String>,
    #[serde(rename = "heroCTAText")]
    pub hero_cta_text: Option<String>,
    #[serde(rename = "heroCTALink")]
    pub hero_cta_link: Option<String>,
    pub about_title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub about_text: Vec<Node>,
    /// About section image URL.
    pub about_image: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "default_true")]
    pub show_featured_projects: bool,
    pub featured_projects_title: Option<String>,
    #[serde(deserialize_with = "default_true")]
    pub show_latest_blogs: bool,
    pub latest_blogs_title: Option<String>,
    pub cta_title: Option<String>,
    pub cta_text: Option<String>,
    pub cta_button_text: Option<String>,
    pub cta_button_link: Option<String>,
}

impl Default for Homepage {
    fn default() -> Self {
        Self {
            hero_title: String::new(),
            hero_subtitle: None,
            hero_image: None,
            hero_cta_text: None,
            hero_cta_link: None,
            about_title: None,
            about_text: Vec::new(),
            about_image: None,
            skills: Vec::new(),
            show_featured_projects: true,
            featured_projects_title: None,
            show_latest_blogs: true,
            latest_blogs_title: None,
            cta_title: None,
            cta_text: None,
            cta_button_text: None,
            cta_button_link: None,
        }
    }
}

/// About page content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutPage {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Profile image URL.
    pub profile_image: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub bio: Vec<Node>,
    #[serde(deserialize_with = "nullable")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "nullable")]
    pub skill_categories: Vec<SkillCategory>,
}

/// Experience timeline entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    /// Company logo URL.
    pub company_logo: Option<String>,
    pub company_logo_alt: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// Absent for the current position.
    #[serde(deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "nullable")]
    pub current: bool,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub technologies: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// `None` when unset or not a known level.
    #[serde(deserialize_with = "lenient_level")]
    pub level: Option<SkillLevel>,
}

fn default_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(|v| v.unwrap_or(true))
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

fn lenient_level<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SkillLevel>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}
