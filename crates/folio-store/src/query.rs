//! Parameterized read queries.
//!
//! Each [`Query`] has a GROQ text for the remote store and an in-process
//! evaluation (see [`crate::projection`]) producing the same JSON shape.

use serde_json::Value;

use folio_schema::{ABOUT_PAGE, BLOG, HOMEPAGE, PROJECT, SITE_SETTINGS};

/// Maximum number of related posts kept on a blog post.
pub const MAX_RELATED_POSTS: usize = 3;

/// Author projection shared by post queries.
const AUTHOR: &str = r#"author->{
    name,
    description,
    "image": image.asset->url
  }"#;

const CATEGORY: &str = r#"category->{
    title,
    "slug": slug.current
  }"#;

/// Rich text with code block fields listed and image URLs resolved.
fn rich_text(field: &str) -> String {
    format!(
        r#"{field}[]{{
    ...,
    _type == "codeBlock" => {{
      _key,
      _type,
      code,
      language,
      filename,
      highlightLines
    }},
    _type == "image" => {{
      ...,
      "url": asset->url
    }}
  }}"#
    )
}

fn blog_summary() -> String {
    format!(
        r#"{{
  _id,
  "slug": slug.current,
  title,
  "image": image.asset->url,
  readTime,
  publishedDate,
  {AUTHOR},
  {CATEGORY},
  metaTitle,
  metaDescription,
  metaKeywords
}}"#
    )
}

fn blog_detail() -> String {
    format!(
        r#"{{
  _id,
  "slug": slug.current,
  title,
  "image": image.asset->url,
  readTime,
  publishedDate,
  enableTableOfContents,
  {AUTHOR},
  {content},
  {CATEGORY},
  "relatedPosts": relatedPosts[]->{summary},
  metaTitle,
  metaDescription,
  metaKeywords
}}"#,
        content = rich_text("content"),
        summary = blog_summary(),
    )
}

const PROJECT_SUMMARY: &str = r#"{
  _id,
  title,
  "slug": slug.current,
  "image": image.asset->url,
  "imageAlt": image.alt,
  "imageCaption": image.caption,
  shortDescription,
  url,
  status,
  featured
}"#;

fn project_detail() -> String {
    format!(
        r#"{{
  _id,
  title,
  "slug": slug.current,
  "image": image.asset->url,
  "imageAlt": image.alt,
  "imageCaption": image.caption,
  shortDescription,
  url,
  {overview},
  "imageGallery": imageGallery[]{{
    "url": asset->url,
    alt,
    caption
  }},
  technologies,
  status,
  featured,
  metaTitle,
  metaDescription,
  metaKeywords
}}"#,
        overview = rich_text("overview"),
    )
}

const SITE_SETTINGS_PROJECTION: &str = r#"{
  title,
  description,
  "logo": logo.asset->url,
  email,
  phone,
  address,
  socialLinks[]{
    platform,
    url,
    label
  },
  "resumeFile": resumeFile.asset->url,
  "seoImage": seoImage.asset->url
}"#;

fn homepage() -> String {
    format!(
        r#"{{
  heroTitle,
  heroSubtitle,
  "heroImage": heroImage.asset->url,
  heroCTAText,
  heroCTALink,
  aboutTitle,
  {about_text},
  "aboutImage": aboutImage.asset->url,
  skills,
  showFeaturedProjects,
  featuredProjectsTitle,
  showLatestBlogs,
  latestBlogsTitle,
  ctaTitle,
  ctaText,
  ctaButtonText,
  ctaButtonLink
}}"#,
        about_text = rich_text("aboutText"),
    )
}

fn about_page() -> String {
    format!(
        r#"{{
  title,
  "profileImage": profileImage.asset->url,
  {bio},
  experience[]{{
    title,
    company,
    "companyLogo": companyLogo.asset->url,
    "companyLogoAlt": companyLogo.alt,
    location,
    startDate,
    endDate,
    current,
    description,
    technologies
  }},
  skillCategories[]{{
    category,
    skills[]{{
      name,
      level
    }}
  }}
}}"#,
        bio = rich_text("bio"),
    )
}

/// A read query against the content store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// All blog posts, newest first, full detail.
    AllBlogPosts,
    /// First blog post with this exact slug, or null.
    BlogPostBySlug { slug: String },
    /// Posts in a category, newest first, summary projection.
    BlogPostsByCategory { category_slug: String },
    /// The `limit` newest posts, summary projection.
    LatestBlogPosts { limit: usize },
    /// All projects, newest first.
    AllProjects,
    /// First project with this exact slug, or null.
    ProjectBySlug { slug: String },
    /// The `limit` newest projects, summary projection.
    FeaturedProjects { limit: usize },
    SiteSettings,
    Homepage,
    AboutPage,
}

impl Query {
    /// Short name for logs and mocks.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllBlogPosts => "all_blog_posts",
            Self::BlogPostBySlug { .. } => "blog_post_by_slug",
            Self::BlogPostsByCategory { .. } => "blog_posts_by_category",
            Self::LatestBlogPosts { .. } => "latest_blog_posts",
            Self::AllProjects => "all_projects",
            Self::ProjectBySlug { .. } => "project_by_slug",
            Self::FeaturedProjects { .. } => "featured_projects",
            Self::SiteSettings => "site_settings",
            Self::Homepage => "homepage",
            Self::AboutPage => "about_page",
        }
    }

    /// Whether the result is a single document (or null) rather than a list.
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            Self::BlogPostBySlug { .. }
                | Self::ProjectBySlug { .. }
                | Self::SiteSettings
                | Self::Homepage
                | Self::AboutPage
        )
    }

    /// GROQ query text. Parameters are referenced as `$name`.
    pub fn groq(&self) -> String {
        match self {
            Self::AllBlogPosts => {
                format!(r#"*[_type == "{BLOG}"] | order(_createdAt desc){}"#, blog_detail())
            }
            Self::BlogPostBySlug { .. } => format!(
                r#"*[_type == "{BLOG}" && slug.current == $slug][0]{}"#,
                blog_detail()
            ),
            Self::BlogPostsByCategory { .. } => format!(
                r#"*[_type == "{BLOG}" && category->slug.current == $categorySlug] | order(_createdAt desc){}"#,
                blog_summary()
            ),
            Self::LatestBlogPosts { limit } => format!(
                r#"*[_type == "{BLOG}"] | order(_createdAt desc)[0...{limit}]{}"#,
                blog_summary()
            ),
            Self::AllProjects => format!(
                r#"*[_type == "{PROJECT}"] | order(_createdAt desc){}"#,
                project_detail()
            ),
            Self::ProjectBySlug { .. } => format!(
                r#"*[_type == "{PROJECT}" && slug.current == $slug][0]{}"#,
                project_detail()
            ),
            Self::FeaturedProjects { limit } => format!(
                r#"*[_type == "{PROJECT}"] | order(_createdAt desc)[0...{limit}]{PROJECT_SUMMARY}"#
            ),
            Self::SiteSettings => {
                format!(r#"*[_type == "{SITE_SETTINGS}"][0]{SITE_SETTINGS_PROJECTION}"#)
            }
            Self::Homepage => format!(r#"*[_type == "{HOMEPAGE}"][0]{}"#, homepage()),
            Self::AboutPage => format!(r#"*[_type == "{ABOUT_PAGE}"][0]{}"#, about_page()),
        }
    }

    /// Named parameters, without the `$` prefix.
    pub fn params(&self) -> Vec<(&'static str, Value)> {
        match self {
            Self::BlogPostBySlug { slug } | Self::ProjectBySlug { slug } => {
                vec![("slug", Value::from(slug.as_str()))]
            }
            Self::BlogPostsByCategory { category_slug } => {
                vec![("categorySlug", Value::from(category_slug.as_str()))]
            }
            _ => Vec::new(),
        }
    }
}
