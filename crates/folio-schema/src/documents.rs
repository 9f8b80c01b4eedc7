//! Portfolio document types.

use serde_json::Value;

use crate::types::{BlockContent, Field, FieldKind, SchemaType, link_annotation};

pub const BLOG: &str = "blog";
pub const BLOG_AUTHOR: &str = "blogAuthor";
pub const BLOG_CATEGORY: &str = "blogCategory";
pub const PROJECT: &str = "project";
pub const SITE_SETTINGS: &str = "siteSettings";
pub const HOMEPAGE: &str = "homepage";
pub const ABOUT_PAGE: &str = "aboutPage";

/// Maximum slug length in characters.
pub const SLUG_MAX_LENGTH: usize = 96;

pub const PROJECT_STATUSES: [&str; 4] = ["in-progress", "completed", "on-hold", "archived"];
pub const SKILL_LEVELS: [&str; 4] = ["beginner", "intermediate", "advanced", "expert"];
pub const SOCIAL_PLATFORMS: [&str; 7] = [
    "linkedin",
    "github",
    "twitter",
    "instagram",
    "facebook",
    "youtube",
    "other",
];
pub const CODE_LANGUAGES: [&str; 17] = [
    "javascript",
    "typescript",
    "python",
    "html",
    "css",
    "json",
    "bash",
    "sql",
    "php",
    "java",
    "cpp",
    "go",
    "rust",
    "swift",
    "kotlin",
    "dart",
    "text",
];

pub(crate) fn all() -> Vec<SchemaType> {
    vec![
        blog_author(),
        blog_category(),
        blog(),
        project(),
        site_settings(),
        homepage(),
        about_page(),
    ]
}

fn slug_from_title() -> FieldKind {
    FieldKind::Slug {
        source: "title".to_owned(),
        max_length: SLUG_MAX_LENGTH,
    }
}

fn plain_image() -> FieldKind {
    FieldKind::Image { fields: Vec::new() }
}

/// Image with required alt and optional caption.
fn captioned_image() -> FieldKind {
    FieldKind::Image {
        fields: vec![
            Field::new("alt", "Alt Text", FieldKind::String).required(),
            Field::new("caption", "Caption", FieldKind::String),
        ],
    }
}

fn seo_fields() -> [Field; 3] {
    [
        Field::new("metaTitle", "Meta Title", FieldKind::String)
            .max(60.0)
            .description("SEO title (max 60 characters)"),
        Field::new("metaDescription", "Meta Description", FieldKind::Text)
            .max(160.0)
            .description("SEO description (max 160 characters)"),
        Field::new("metaKeywords", "Meta Keywords", FieldKind::String)
            .description("Comma-separated keywords for SEO"),
    ]
}

fn tags() -> FieldKind {
    FieldKind::Array {
        of: vec![FieldKind::String],
    }
}

fn code_block() -> FieldKind {
    FieldKind::Object {
        name: Some("codeBlock".to_owned()),
        fields: vec![
            Field::new("code", "Code", FieldKind::Text).required(),
            Field::new("language", "Language", FieldKind::String)
                .one_of(CODE_LANGUAGES)
                .initial(Value::from("javascript"))
                .required(),
            Field::new("filename", "Filename (optional)", FieldKind::String)
                .description("e.g., index.js, component.tsx"),
            Field::new("highlightLines", "Highlight Lines (optional)", FieldKind::String)
                .description("e.g., 1,3-5,10 (line numbers to highlight)"),
        ],
    }
}

fn blog_author() -> SchemaType {
    SchemaType::document(
        BLOG_AUTHOR,
        "Blog Authors",
        vec![
            Field::new("name", "Name", FieldKind::String)
                .required()
                .max(100.0),
            Field::new("description", "Description", FieldKind::Text)
                .required()
                .max(300.0),
            Field::new("image", "Profile Image", plain_image()).required(),
        ],
    )
}

fn blog_category() -> SchemaType {
    SchemaType::document(
        BLOG_CATEGORY,
        "Blog Categories",
        vec![
            Field::new("title", "Title", FieldKind::String)
                .required()
                .max(50.0),
            Field::new("slug", "Slug", slug_from_title()).required(),
        ],
    )
}

fn blog() -> SchemaType {
    let content = BlockContent::standard()
        .with_styles(&["normal", "h1", "h2", "h3", "h4", "blockquote"])
        .with_type(code_block())
        .with_type(captioned_image());

    let mut fields = vec![
        Field::new("title", "Title", FieldKind::String)
            .required()
            .max(100.0),
        Field::new("slug", "Slug", slug_from_title()).required(),
        Field::new("image", "Featured Image", plain_image()).required(),
        Field::new("readTime", "Read Time (minutes)", FieldKind::Number)
            .required()
            .min(1.0)
            .max(60.0),
        Field::new("publishedDate", "Published Date", FieldKind::Datetime).required(),
        Field::new(
            "author",
            "Author",
            FieldKind::Reference {
                to: vec![BLOG_AUTHOR.to_owned()],
            },
        )
        .required(),
        Field::new(
            "category",
            "Category",
            FieldKind::Reference {
                to: vec![BLOG_CATEGORY.to_owned()],
            },
        )
        .required(),
        Field::new("content", "Content", FieldKind::BlockContent(content)).required(),
        Field::new(
            "enableTableOfContents",
            "Enable Table of Contents",
            FieldKind::Boolean,
        )
        .initial(Value::Bool(false))
        .description("Show table of contents based on headings (H1, H2, H3)"),
        Field::new(
            "relatedPosts",
            "Related Posts",
            FieldKind::Array {
                of: vec![FieldKind::Reference {
                    to: vec![BLOG.to_owned()],
                }],
            },
        )
        .max(3.0)
        .description("Select up to 3 related blog posts"),
    ];
    fields.extend(seo_fields());

    SchemaType::document(BLOG, "Blog Posts", fields)
}

fn project() -> SchemaType {
    let overview = BlockContent::standard()
        .with_styles(&["normal", "h1", "h2", "h3", "h4", "blockquote"])
        .with_decorators(&["strong", "em", "code", "underline"])
        .with_annotations(vec![link_annotation(&["http", "https", "mailto"], true)])
        .with_type(captioned_image());

    let mut fields = vec![
        Field::new("title", "Title", FieldKind::String)
            .required()
            .max(100.0),
        Field::new("slug", "Slug", slug_from_title())
            .required()
            .description("This will be used in the URL: /projects/your-slug"),
        Field::new("shortDescription", "Short Description", FieldKind::Text)
            .required()
            .max(200.0),
        Field::new("overview", "Overview", FieldKind::BlockContent(overview)).required(),
        Field::new(
            "image",
            "Featured Image",
            FieldKind::Image {
                fields: vec![Field::new("alt", "Alt Text", FieldKind::String).required()],
            },
        )
        .required(),
        Field::new(
            "imageGallery",
            "Image Gallery",
            FieldKind::Array {
                of: vec![captioned_image()],
            },
        ),
        Field::new("url", "Project URL", FieldKind::Url).uri_schemes(&["http", "https"]),
        Field::new("technologies", "Technologies", tags()),
        Field::new("status", "Project Status", FieldKind::String)
            .one_of(PROJECT_STATUSES)
            .initial(Value::from("completed")),
        Field::new("featured", "Featured Project", FieldKind::Boolean).initial(Value::Bool(false)),
    ];
    fields.extend(seo_fields());

    SchemaType::document(PROJECT, "Projects", fields)
}

fn site_settings() -> SchemaType {
    let social_link = FieldKind::Object {
        name: None,
        fields: vec![
            Field::new("platform", "Platform", FieldKind::String)
                .one_of(SOCIAL_PLATFORMS)
                .required(),
            Field::new("url", "URL", FieldKind::Url).required(),
            Field::new("label", "Custom Label", FieldKind::String),
        ],
    };

    SchemaType::document(
        SITE_SETTINGS,
        "Site Settings",
        vec![
            Field::new("title", "Site Title", FieldKind::String).required(),
            Field::new("description", "Site Description", FieldKind::Text)
                .required()
                .max(300.0),
            Field::new("logo", "Logo", plain_image()),
            Field::new("email", "Email", FieldKind::Email),
            Field::new("phone", "Phone", FieldKind::String),
            Field::new("address", "Address", FieldKind::Text),
            Field::new(
                "socialLinks",
                "Social Links",
                FieldKind::Array {
                    of: vec![social_link],
                },
            ),
            Field::new(
                "resumeFile",
                "Resume/CV File",
                FieldKind::File {
                    accept: Some(".pdf,.doc,.docx".to_owned()),
                },
            ),
            Field::new("seoImage", "Default SEO Image", plain_image()),
        ],
    )
    .singleton()
}

fn homepage() -> SchemaType {
    SchemaType::document(
        HOMEPAGE,
        "Homepage",
        vec![
            Field::new("heroTitle", "Hero Title", FieldKind::String).required(),
            Field::new("heroSubtitle", "Hero Subtitle", FieldKind::Text),
            Field::new("heroImage", "Hero Background Image", plain_image()),
            Field::new("heroCTAText", "Hero CTA Button Text", FieldKind::String)
                .initial(Value::from("View My Work")),
            Field::new("heroCTALink", "Hero CTA Link", FieldKind::String),
            Field::new("aboutTitle", "About Section Title", FieldKind::String)
                .initial(Value::from("About Me")),
            Field::new(
                "aboutText",
                "About Text",
                FieldKind::BlockContent(BlockContent::standard()),
            ),
            Field::new("aboutImage", "About Image", plain_image()),
            Field::new("skills", "Skills/Technologies", tags()),
            Field::new("showFeaturedProjects", "Show Featured Projects", FieldKind::Boolean)
                .initial(Value::Bool(true)),
            Field::new("featuredProjectsTitle", "Featured Projects Title", FieldKind::String)
                .initial(Value::from("Featured Projects")),
            Field::new("showLatestBlogs", "Show Latest Blog Posts", FieldKind::Boolean)
                .initial(Value::Bool(true)),
            Field::new("latestBlogsTitle", "Latest Blogs Title", FieldKind::String)
                .initial(Value::from("Latest Blog Posts")),
            Field::new("ctaTitle", "CTA Section Title", FieldKind::String)
                .initial(Value::from("Let's Work Together")),
            Field::new("ctaText", "CTA Text", FieldKind::Text),
            Field::new("ctaButtonText", "CTA Button Text", FieldKind::String)
                .initial(Value::from("Get In Touch")),
            Field::new("ctaButtonLink", "CTA Button Link", FieldKind::String),
        ],
    )
    .singleton()
}

fn about_page() -> SchemaType {
    let bio = BlockContent::standard()
        .with_styles(&["normal", "h2", "h3", "blockquote"])
        .with_type(FieldKind::Image {
            fields: vec![Field::new("alt", "Alt Text", FieldKind::String).required()],
        });

    let experience = FieldKind::Object {
        name: None,
        fields: vec![
            Field::new("title", "Job Title", FieldKind::String).required(),
            Field::new("company", "Company", FieldKind::String).required(),
            Field::new(
                "companyLogo",
                "Company Logo",
                FieldKind::Image {
                    fields: vec![Field::new("alt", "Alt Text", FieldKind::String)],
                },
            ),
            Field::new("location", "Location", FieldKind::String),
            Field::new("startDate", "Start Date", FieldKind::Date).required(),
            Field::new("endDate", "End Date", FieldKind::Date)
                .description("Leave empty if current position"),
            Field::new("current", "Current Position", FieldKind::Boolean)
                .initial(Value::Bool(false)),
            Field::new("description", "Description", FieldKind::Text),
            Field::new("technologies", "Technologies Used", tags()),
        ],
    };

    let skill = FieldKind::Object {
        name: None,
        fields: vec![
            Field::new("name", "Skill Name", FieldKind::String).required(),
            Field::new("level", "Proficiency Level", FieldKind::String).one_of(SKILL_LEVELS),
        ],
    };
    let skill_category = FieldKind::Object {
        name: None,
        fields: vec![
            Field::new("category", "Category Name", FieldKind::String).required(),
            Field::new("skills", "Skills", FieldKind::Array { of: vec![skill] }),
        ],
    };

    SchemaType::document(
        ABOUT_PAGE,
        "About Page",
        vec![
            Field::new("title", "Page Title", FieldKind::String)
                .required()
                .initial(Value::from("About Me")),
            Field::new("profileImage", "Profile Image", plain_image()),
            Field::new("bio", "Biography", FieldKind::BlockContent(bio)).required(),
            Field::new(
                "experience",
                "Experience Timeline",
                FieldKind::Array {
                    of: vec![experience],
                },
            ),
            Field::new(
                "skillCategories",
                "Skill Categories",
                FieldKind::Array {
                    of: vec![skill_category],
                },
            ),
        ],
    )
    .singleton()
}
