//! In-process query evaluation over a loaded dataset.
//!
//! Produces the same JSON shape as the GROQ projections in [`crate::query`]:
//! references are dereferenced into nested objects (null when dangling),
//! asset references become URLs, and rich-text nodes keep their stored
//! fields with per-type additions.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use folio_schema::{ABOUT_PAGE, BLOG, HOMEPAGE, PROJECT, SITE_SETTINGS};

use crate::query::Query;
use crate::types::parse_timestamp;

/// Asset CDN base URL.
const CDN_URL: &str = "https://cdn.sanity.io";

/// Id prefix of unpublished drafts.
const DRAFTS_PREFIX: &str = "drafts.";

/// Published documents of a dataset, indexed by id.
#[derive(Debug, Default)]
pub struct Dataset {
    documents: Vec<Value>,
    by_id: HashMap<String, usize>,
    project_id: String,
    dataset: String,
}

fn id_of(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

fn type_of(doc: &Value) -> Option<&str> {
    doc.get("_type").and_then(Value::as_str)
}

fn slug_of(doc: &Value) -> Option<&str> {
    doc.get("slug")
        .and_then(|s| s.get("current"))
        .and_then(Value::as_str)
}

/// Copy named fields, null when absent.
fn pick(doc: &Value, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .map(|&f| (f.to_owned(), doc.get(f).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Map each element of an array field, null when the field is not an array.
fn map_array(value: &Value, f: impl Fn(&Value) -> Value) -> Value {
    value
        .as_array()
        .map_or(Value::Null, |items| items.iter().map(f).collect())
}

impl Dataset {
    /// Build a dataset, dropping drafts.
    pub fn new(documents: Vec<Value>, project_id: &str, dataset: &str) -> Self {
        let documents: Vec<Value> = documents
            .into_iter()
            .filter(|doc| !id_of(doc).is_some_and(|id| id.starts_with(DRAFTS_PREFIX)))
            .collect();
        let by_id = documents
            .iter()
            .enumerate()
            .filter_map(|(index, doc)| id_of(doc).map(|id| (id.to_owned(), index)))
            .collect();

        Self {
            documents,
            by_id,
            project_id: project_id.to_owned(),
            dataset: dataset.to_owned(),
        }
    }

    /// Number of published documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.by_id.get(id).map(|&index| &self.documents[index])
    }

    /// Follow a `{_ref}` value. `None` when dangling.
    fn deref(&self, reference: &Value) -> Option<&Value> {
        reference
            .get("_ref")
            .and_then(Value::as_str)
            .and_then(|id| self.get(id))
    }

    /// Documents of a type, `_createdAt` descending, ties broken by `_id`.
    fn of_type(&self, type_name: &str) -> Vec<&Value> {
        let mut docs: Vec<&Value> = self
            .documents
            .iter()
            .filter(|doc| type_of(doc) == Some(type_name))
            .collect();
        docs.sort_by(|a, b| {
            let created = |doc: &Value| parse_timestamp(doc.get("_createdAt").and_then(Value::as_str));
            created(b)
                .cmp(&created(a))
                .then_with(|| id_of(a).cmp(&id_of(b)))
        });
        docs
    }

    /// URL of an image or file field: the asset document's `url`, else
    /// derived from the asset id.
    fn asset_url(&self, holder: &Value) -> Value {
        let Some(asset) = holder.get("asset") else {
            return Value::Null;
        };
        if let Some(url) = asset.get("url").and_then(Value::as_str) {
            return url.into();
        }
        let Some(id) = asset.get("_ref").and_then(Value::as_str) else {
            return Value::Null;
        };
        if let Some(url) = self
            .get(id)
            .and_then(|doc| doc.get("url"))
            .and_then(Value::as_str)
        {
            return url.into();
        }
        self.derive_asset_url(id).map_or(Value::Null, Value::from)
    }

    /// CDN URL from an asset id.
    ///
    /// `image-<hash>-<w>x<h>-<ext>` maps to `/images/<project>/<dataset>/<hash>-<w>x<h>.<ext>`
    /// and `file-<hash>-<ext>` to `/files/<project>/<dataset>/<hash>.<ext>`.
    pub fn derive_asset_url(&self, asset_id: &str) -> Option<String> {
        if let Some(rest) = asset_id.strip_prefix("image-") {
            let (rest, ext) = rest.rsplit_once('-')?;
            let (hash, dimensions) = rest.rsplit_once('-')?;
            let (width, height) = dimensions.split_once('x')?;
            if hash.is_empty()
                || width.is_empty()
                || height.is_empty()
                || !width.chars().chain(height.chars()).all(|c| c.is_ascii_digit())
            {
                return None;
            }
            return Some(format!(
                "{CDN_URL}/images/{}/{}/{hash}-{dimensions}.{ext}",
                self.project_id, self.dataset
            ));
        }
        let (hash, ext) = asset_id.strip_prefix("file-")?.rsplit_once('-')?;
        if hash.is_empty() {
            return None;
        }
        Some(format!(
            "{CDN_URL}/files/{}/{}/{hash}.{ext}",
            self.project_id, self.dataset
        ))
    }

    /// Evaluate a query.
    pub fn evaluate(&self, query: &Query) -> Value {
        match query {
            Query::AllBlogPosts => self.list(BLOG, |doc| self.blog_detail(doc)),
            Query::BlogPostBySlug { slug } => {
                self.first(BLOG, |doc| slug_of(doc) == Some(slug.as_str()), |doc| {
                    self.blog_detail(doc)
                })
            }
            Query::BlogPostsByCategory { category_slug } => self
                .of_type(BLOG)
                .into_iter()
                .filter(|doc| {
                    self.deref(&doc["category"]).and_then(slug_of) == Some(category_slug.as_str())
                })
                .map(|doc| self.blog_summary(doc))
                .collect(),
            Query::LatestBlogPosts { limit } => self
                .of_type(BLOG)
                .into_iter()
                .take(*limit)
                .map(|doc| self.blog_summary(doc))
                .collect(),
            Query::AllProjects => self.list(PROJECT, |doc| self.project_detail(doc)),
            Query::ProjectBySlug { slug } => {
                self.first(PROJECT, |doc| slug_of(doc) == Some(slug.as_str()), |doc| {
                    self.project_detail(doc)
                })
            }
            Query::FeaturedProjects { limit } => self
                .of_type(PROJECT)
                .into_iter()
                .take(*limit)
                .map(|doc| self.project_summary(doc))
                .collect(),
            Query::SiteSettings => self.first(SITE_SETTINGS, |_| true, |doc| self.site_settings(doc)),
            Query::Homepage => self.first(HOMEPAGE, |_| true, |doc| self.homepage(doc)),
            Query::AboutPage => self.first(ABOUT_PAGE, |_| true, |doc| self.about_page(doc)),
        }
    }

    fn list(&self, type_name: &str, project: impl Fn(&Value) -> Value) -> Value {
        self.of_type(type_name).into_iter().map(project).collect()
    }

    fn first(
        &self,
        type_name: &str,
        filter: impl Fn(&Value) -> bool,
        project: impl Fn(&Value) -> Value,
    ) -> Value {
        self.of_type(type_name)
            .into_iter()
            .find(|doc| filter(doc))
            .map_or(Value::Null, project)
    }

    fn author(&self, reference: &Value) -> Value {
        self.deref(reference).map_or(Value::Null, |author| {
            json!({
                "name": author["name"],
                "description": author["description"],
                "image": self.asset_url(&author["image"]),
            })
        })
    }

    fn category(&self, reference: &Value) -> Value {
        self.deref(reference).map_or(Value::Null, |category| {
            json!({
                "title": category["title"],
                "slug": slug_of(category),
            })
        })
    }

    /// Rich text with code block fields filled and image URLs resolved.
    ///
    /// A GROQ conditional after `...` adds its fields without dropping the
    /// stored ones, so missing code block fields become null.
    fn rich_text(&self, value: &Value) -> Value {
        map_array(value, |node| match type_of(node) {
            Some("codeBlock") => {
                let mut code = node.clone();
                if let Some(object) = code.as_object_mut() {
                    for field in ["code", "language", "filename", "highlightLines"] {
                        object.entry(field).or_insert(Value::Null);
                    }
                }
                code
            }
            Some("image") => {
                let mut image = node.clone();
                if let Some(object) = image.as_object_mut() {
                    object.insert("url".to_owned(), self.asset_url(node));
                }
                image
            }
            _ => node.clone(),
        })
    }

    fn blog_summary(&self, doc: &Value) -> Value {
        let mut out = pick(
            doc,
            &[
                "_id",
                "title",
                "readTime",
                "publishedDate",
                "metaTitle",
                "metaDescription",
                "metaKeywords",
            ],
        );
        out.insert("slug".to_owned(), slug_of(doc).into());
        out.insert("image".to_owned(), self.asset_url(&doc["image"]));
        out.insert("author".to_owned(), self.author(&doc["author"]));
        out.insert("category".to_owned(), self.category(&doc["category"]));
        Value::Object(out)
    }

    fn blog_detail(&self, doc: &Value) -> Value {
        let mut out = self.blog_summary(doc);
        if let Some(object) = out.as_object_mut() {
            object.insert(
                "enableTableOfContents".to_owned(),
                doc.get("enableTableOfContents").cloned().unwrap_or(Value::Null),
            );
            object.insert("content".to_owned(), self.rich_text(&doc["content"]));
            object.insert(
                "relatedPosts".to_owned(),
                map_array(&doc["relatedPosts"], |reference| {
                    self.deref(reference)
                        .map_or(Value::Null, |post| self.blog_summary(post))
                }),
            );
        }
        out
    }

    fn project_summary(&self, doc: &Value) -> Value {
        let mut out = pick(
            doc,
            &["_id", "title", "shortDescription", "url", "status", "featured"],
        );
        let image = &doc["image"];
        out.insert("slug".to_owned(), slug_of(doc).into());
        out.insert("image".to_owned(), self.asset_url(image));
        out.insert("imageAlt".to_owned(), image["alt"].clone());
        out.insert("imageCaption".to_owned(), image["caption"].clone());
        Value::Object(out)
    }

    fn project_detail(&self, doc: &Value) -> Value {
        let mut out = self.project_summary(doc);
        if let Some(object) = out.as_object_mut() {
            object.extend(pick(
                doc,
                &["technologies", "metaTitle", "metaDescription", "metaKeywords"],
            ));
            object.insert("overview".to_owned(), self.rich_text(&doc["overview"]));
            object.insert(
                "imageGallery".to_owned(),
                map_array(&doc["imageGallery"], |image| {
                    json!({
                        "url": self.asset_url(image),
                        "alt": image["alt"],
                        "caption": image["caption"],
                    })
                }),
            );
        }
        out
    }

    fn site_settings(&self, doc: &Value) -> Value {
        let mut out = pick(doc, &["title", "description", "email", "phone", "address"]);
        out.insert("logo".to_owned(), self.asset_url(&doc["logo"]));
        out.insert(
            "socialLinks".to_owned(),
            map_array(&doc["socialLinks"], |link| {
                Value::Object(pick(link, &["platform", "url", "label"]))
            }),
        );
        out.insert("resumeFile".to_owned(), self.asset_url(&doc["resumeFile"]));
        out.insert("seoImage".to_owned(), self.asset_url(&doc["seoImage"]));
        Value::Object(out)
    }

    fn homepage(&self, doc: &Value) -> Value {
        let mut out = pick(
            doc,
            &[
                "heroTitle",
                "heroSubtitle",
                "heroCTAText",
                "heroCTALink",
                "aboutTitle",
                "skills",
                "showFeaturedProjects",
                "featuredProjectsTitle",
                "showLatestBlogs",
                "latestBlogsTitle",
                "ctaTitle",
                "ctaText",
                "ctaButtonText",
                "ctaButtonLink",
            ],
        );
        out.insert("heroImage".to_owned(), self.asset_url(&doc["heroImage"]));
        out.insert("aboutText".to_owned(), self.rich_text(&doc["aboutText"]));
        out.insert("aboutImage".to_owned(), self.asset_url(&doc["aboutImage"]));
        Value::Object(out)
    }

    fn about_page(&self, doc: &Value) -> Value {
        let mut out = pick(doc, &["title"]);
        out.insert("profileImage".to_owned(), self.asset_url(&doc["profileImage"]));
        out.insert("bio".to_owned(), self.rich_text(&doc["bio"]));
        out.insert(
            "experience".to_owned(),
            map_array(&doc["experience"], |entry| {
                let mut item = pick(
                    entry,
                    &[
                        "title",
                        "company",
                        "location",
                        "startDate",
                        "endDate",
                        "current",
                        "description",
                        "technologies",
                    ],
                );
                item.insert("companyLogo".to_owned(), self.asset_url(&entry["companyLogo"]));
                item.insert("companyLogoAlt".to_owned(), entry["companyLogo"]["alt"].clone());
                Value::Object(item)
            }),
        );
        out.insert(
            "skillCategories".to_owned(),
            map_array(&doc["skillCategories"], |category| {
                json!({
                    "category": category["category"],
                    "skills": map_array(&category["skills"], |skill| {
                        Value::Object(pick(skill, &["name", "level"]))
                    }),
                })
            }),
        );
        Value::Object(out)
    }
}
