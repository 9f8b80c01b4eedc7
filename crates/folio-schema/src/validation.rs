//! Authoring-time validation of stored documents against the schema.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::Schema;
use crate::types::{BlockContent, Field, FieldKind, Rule, SchemaType};

/// Prefix of unpublished draft document ids.
const DRAFT_PREFIX: &str = "drafts.";

/// URL schemes accepted by `url` fields without an explicit rule.
const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https"];

/// A single validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub document_id: String,
    /// Dotted field path, with `[i]` for array items (e.g. `content[3].alt`).
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.document_id, self.message)
        } else {
            write!(f, "{}: {}: {}", self.document_id, self.path, self.message)
        }
    }
}

impl Schema {
    /// Validate a set of documents, e.g. a dataset export.
    ///
    /// Documents whose `_type` is not a schema document type (assets, system
    /// documents) are ignored. Besides per-field rules this checks reference
    /// target types, slug uniqueness per type and singleton counts.
    pub fn validate(&self, documents: &[Value]) -> Vec<ValidationIssue> {
        let types_by_id: HashMap<&str, &str> = documents
            .iter()
            .filter_map(|doc| Some((doc.get("_id")?.as_str()?, doc.get("_type")?.as_str()?)))
            .collect();

        let mut issues = Vec::new();
        let mut slugs: HashMap<(&str, &str), &str> = HashMap::new();
        let mut singletons: HashMap<&str, usize> = HashMap::new();
        let mut checked = 0usize;

        for doc in documents {
            let Some(schema_type) = doc
                .get("_type")
                .and_then(Value::as_str)
                .and_then(|t| self.document(t))
            else {
                continue;
            };
            let id = doc.get("_id").and_then(Value::as_str).unwrap_or_default();
            checked += 1;

            let mut ctx = Context {
                document_id: id,
                types_by_id: &types_by_id,
                issues: &mut issues,
            };
            ctx.validate_document(schema_type, doc);

            let published_id = id.strip_prefix(DRAFT_PREFIX).unwrap_or(id);
            if schema_type.singleton && !id.starts_with(DRAFT_PREFIX) {
                *singletons.entry(schema_type.name.as_str()).or_default() += 1;
            }

            let slug = doc
                .get("slug")
                .and_then(|s| s.get("current"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty());
            if let Some(slug) = slug {
                match slugs.get(&(schema_type.name.as_str(), slug)) {
                    Some(owner) if *owner != published_id => issues.push(ValidationIssue {
                        document_id: id.to_owned(),
                        path: "slug".to_owned(),
                        message: format!("slug '{slug}' is already used by {owner}"),
                    }),
                    Some(_) => {}
                    None => {
                        slugs.insert((schema_type.name.as_str(), slug), published_id);
                    }
                }
            }
        }

        let mut singleton_counts: Vec<_> = singletons.into_iter().filter(|(_, n)| *n > 1).collect();
        singleton_counts.sort_unstable();
        for (name, count) in singleton_counts {
            issues.push(ValidationIssue {
                document_id: String::new(),
                path: String::new(),
                message: format!("singleton type '{name}' has {count} documents"),
            });
        }

        debug!(documents = checked, issues = issues.len(), "Validated documents");
        issues
    }

    /// Validate one document on its own, without cross-document checks.
    pub fn validate_document(&self, doc: &Value) -> Vec<ValidationIssue> {
        let id = doc.get("_id").and_then(Value::as_str).unwrap_or_default();
        let mut issues = Vec::new();
        let type_name = doc.get("_type").and_then(Value::as_str).unwrap_or_default();

        let Some(schema_type) = self.document(type_name) else {
            issues.push(ValidationIssue {
                document_id: id.to_owned(),
                path: "_type".to_owned(),
                message: format!("unknown document type '{type_name}'"),
            });
            return issues;
        };

        let types_by_id = HashMap::new();
        let mut ctx = Context {
            document_id: id,
            types_by_id: &types_by_id,
            issues: &mut issues,
        };
        ctx.validate_document(schema_type, doc);
        issues
    }
}

struct Context<'a> {
    document_id: &'a str,
    types_by_id: &'a HashMap<&'a str, &'a str>,
    issues: &'a mut Vec<ValidationIssue>,
}

impl Context<'_> {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            document_id: self.document_id.to_owned(),
            path: path.to_owned(),
            message: message.into(),
        });
    }

    fn validate_document(&mut self, schema_type: &SchemaType, doc: &Value) {
        match doc.as_object() {
            Some(obj) => self.validate_fields(&schema_type.fields, obj, ""),
            None => self.issue("", "document must be an object"),
        }
    }

    fn validate_fields(&mut self, fields: &[Field], obj: &Map<String, Value>, prefix: &str) {
        for field in fields {
            let path = join(prefix, &field.name);
            let value = obj.get(&field.name);

            if is_missing(&field.kind, value) {
                if field.is_required() {
                    self.issue(&path, "required");
                }
                continue;
            }
            if let Some(value) = value {
                self.validate_value(&field.rules, &field.kind, value, &path);
            }
        }
    }

    fn validate_value(&mut self, rules: &[Rule], kind: &FieldKind, value: &Value, path: &str) {
        match kind {
            FieldKind::String | FieldKind::Text => {
                let Some(s) = self.expect_str(kind, value, path) else {
                    return;
                };
                self.check_bounds(rules, count(s.chars().count()), "characters", path);
                for rule in rules {
                    if let Rule::OneOf { values } = rule
                        && !values.iter().any(|v| v == s)
                    {
                        self.issue(path, format!("'{s}' is not one of: {}", values.join(", ")));
                    }
                }
            }
            FieldKind::Number => match value.as_f64() {
                Some(n) => self.check_bounds(rules, n, "", path),
                None => self.type_mismatch(kind, value, path),
            },
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    self.type_mismatch(kind, value, path);
                }
            }
            FieldKind::Date => {
                if let Some(s) = self.expect_str(kind, value, path)
                    && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err()
                {
                    self.issue(path, format!("'{s}' is not a YYYY-MM-DD date"));
                }
            }
            FieldKind::Datetime => {
                if let Some(s) = self.expect_str(kind, value, path)
                    && DateTime::parse_from_rfc3339(s).is_err()
                {
                    self.issue(path, format!("'{s}' is not an RFC 3339 datetime"));
                }
            }
            FieldKind::Url => {
                if let Some(s) = self.expect_str(kind, value, path) {
                    self.check_url(rules, s, path);
                }
            }
            FieldKind::Email => {
                if let Some(s) = self.expect_str(kind, value, path)
                    && !is_email(s)
                {
                    self.issue(path, format!("'{s}' is not an email address"));
                }
            }
            FieldKind::Slug { max_length, .. } => {
                let current = value.get("current").and_then(Value::as_str);
                match current {
                    Some(slug) if slug.chars().count() > *max_length => self.issue(
                        &join(path, "current"),
                        format!("must be at most {max_length} characters"),
                    ),
                    Some(_) => {}
                    None => self.issue(path, "slug must have a 'current' string"),
                }
            }
            FieldKind::Image { fields } => match value.as_object() {
                Some(obj) => self.validate_fields(fields, obj, path),
                None => self.type_mismatch(kind, value, path),
            },
            FieldKind::File { .. } => {
                if !value.is_object() {
                    self.type_mismatch(kind, value, path);
                }
            }
            FieldKind::Reference { to } => self.check_reference(to, value, path),
            FieldKind::Array { of } => {
                let Some(items) = value.as_array() else {
                    self.type_mismatch(kind, value, path);
                    return;
                };
                self.check_bounds(rules, count(items.len()), "items", path);
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match select_kind(of, item) {
                        Some(item_kind) => self.validate_value(&[], item_kind, item, &item_path),
                        None => self.issue(
                            &item_path,
                            format!("item type '{}' is not allowed", item_type(item)),
                        ),
                    }
                }
            }
            FieldKind::Object { fields, .. } => match value.as_object() {
                Some(obj) => self.validate_fields(fields, obj, path),
                None => self.type_mismatch(kind, value, path),
            },
            FieldKind::BlockContent(content) => {
                let Some(nodes) = value.as_array() else {
                    self.type_mismatch(kind, value, path);
                    return;
                };
                for (i, node) in nodes.iter().enumerate() {
                    self.validate_node(content, node, &format!("{path}[{i}]"));
                }
            }
        }
    }

    fn validate_node(&mut self, content: &BlockContent, node: &Value, path: &str) {
        let node_type = node.get("_type").and_then(Value::as_str).unwrap_or_default();
        if node_type != "block" {
            match content.types.iter().find(|k| k.type_name() == node_type) {
                Some(kind) => self.validate_value(&[], kind, node, path),
                None => self.issue(path, format!("block type '{node_type}' is not allowed")),
            }
            return;
        }

        let style = node.get("style").and_then(Value::as_str).unwrap_or("normal");
        if !content.styles.iter().any(|s| s == style) {
            self.issue(&join(path, "style"), format!("style '{style}' is not allowed"));
        }
        if let Some(list) = node.get("listItem").and_then(Value::as_str)
            && !content.lists.iter().any(|l| l == list)
        {
            self.issue(&join(path, "listItem"), format!("list '{list}' is not allowed"));
        }

        let mark_defs = node
            .get("markDefs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut def_keys: Vec<&str> = Vec::with_capacity(mark_defs.len());
        for (j, def) in mark_defs.iter().enumerate() {
            let def_path = format!("{path}.markDefs[{j}]");
            if let Some(key) = def.get("_key").and_then(Value::as_str) {
                def_keys.push(key);
            }
            let def_type = def.get("_type").and_then(Value::as_str).unwrap_or_default();
            match content.annotation(def_type) {
                Some(annotation) => {
                    self.validate_value(&annotation.rules, &annotation.kind, def, &def_path);
                }
                None => self.issue(&def_path, format!("annotation '{def_type}' is not allowed")),
            }
        }

        let children = node
            .get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (j, span) in children.iter().enumerate() {
            let marks = span.get("marks").and_then(Value::as_array);
            for mark in marks.into_iter().flatten().filter_map(Value::as_str) {
                if !def_keys.contains(&mark) && !content.decorators.iter().any(|d| d == mark) {
                    self.issue(
                        &format!("{path}.children[{j}].marks"),
                        format!("mark '{mark}' is not allowed"),
                    );
                }
            }
        }
    }

    fn expect_str<'v>(&mut self, kind: &FieldKind, value: &'v Value, path: &str) -> Option<&'v str> {
        let s = value.as_str();
        if s.is_none() {
            self.type_mismatch(kind, value, path);
        }
        s
    }

    fn type_mismatch(&mut self, kind: &FieldKind, value: &Value, path: &str) {
        self.issue(
            path,
            format!("expected {}, got {}", kind.type_name(), json_type(value)),
        );
    }

    fn check_bounds(&mut self, rules: &[Rule], actual: f64, unit: &str, path: &str) {
        let unit = if unit.is_empty() {
            String::new()
        } else {
            format!(" {unit}")
        };
        for rule in rules {
            match rule {
                Rule::Min { value } if actual < *value => {
                    self.issue(path, format!("must be at least {value}{unit}"));
                }
                Rule::Max { value } if actual > *value => {
                    self.issue(path, format!("must be at most {value}{unit}"));
                }
                _ => {}
            }
        }
    }

    fn check_url(&mut self, rules: &[Rule], url: &str, path: &str) {
        let allowed: Vec<&str> = rules
            .iter()
            .find_map(|r| match r {
                Rule::UriSchemes { schemes } => Some(schemes.iter().map(String::as_str).collect()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_URL_SCHEMES.to_vec());

        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)));
        match scheme {
            Some(scheme) if allowed.iter().any(|a| a.eq_ignore_ascii_case(scheme)) => {}
            Some(scheme) => self.issue(
                path,
                format!("scheme '{scheme}' is not allowed (expected {})", allowed.join(", ")),
            ),
            None => self.issue(path, format!("'{url}' is not an absolute URL")),
        }
    }

    fn check_reference(&mut self, to: &[String], value: &Value, path: &str) {
        let Some(target) = value.get("_ref").and_then(Value::as_str) else {
            self.issue(path, "reference must have a '_ref' string");
            return;
        };
        if let Some(target_type) = self.types_by_id.get(target)
            && !to.iter().any(|t| t == target_type)
        {
            self.issue(
                path,
                format!("references a '{target_type}', expected {}", to.join(" or ")),
            );
        }
    }
}

/// Whether a value counts as absent for the `required` rule.
fn is_missing(kind: &FieldKind, value: Option<&Value>) -> bool {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return true;
    };
    match kind {
        FieldKind::String
        | FieldKind::Text
        | FieldKind::Url
        | FieldKind::Email
        | FieldKind::Date
        | FieldKind::Datetime => value.as_str().is_some_and(|s| s.trim().is_empty()),
        FieldKind::Slug { .. } => value
            .get("current")
            .and_then(Value::as_str)
            .is_some_and(str::is_empty),
        FieldKind::Image { .. } | FieldKind::File { .. } => value.is_object()
            && value
                .get("asset")
                .and_then(|a| a.get("_ref"))
                .and_then(Value::as_str)
                .is_none(),
        FieldKind::Array { .. } | FieldKind::BlockContent(_) => {
            value.as_array().is_some_and(Vec::is_empty)
        }
        _ => false,
    }
}

fn select_kind<'k>(of: &'k [FieldKind], item: &Value) -> Option<&'k FieldKind> {
    if let [only] = of {
        return Some(only);
    }
    let item_type = item_type(item);
    of.iter().find(|k| k.type_name() == item_type)
}

fn item_type(item: &Value) -> &str {
    match item {
        Value::Object(obj) => obj.get("_type").and_then(Value::as_str).unwrap_or("object"),
        other => json_type(other),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn count(n: usize) -> f64 {
    u32::try_from(n).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn author(id: &str) -> Value {
        json!({
            "_id": id,
            "_type": "blogAuthor",
            "name": "Ada",
            "description": "Writes things",
            "image": {"asset": {"_ref": "image-abc-100x100-png"}}
        })
    }

    fn category(id: &str, slug: &str) -> Value {
        json!({
            "_id": id,
            "_type": "blogCategory",
            "title": "Rust",
            "slug": {"current": slug}
        })
    }

    fn post(id: &str, slug: &str) -> Value {
        json!({
            "_id": id,
            "_type": "blog",
            "title": "Hello",
            "slug": {"_type": "slug", "current": slug},
            "image": {"asset": {"_ref": "image-abc-100x100-png"}},
            "readTime": 5,
            "publishedDate": "2025-01-02T10:00:00Z",
            "author": {"_ref": "author-1"},
            "category": {"_ref": "cat-1"},
            "content": [
                {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Intro", "marks": []}], "markDefs": []}
            ]
        })
    }

    fn paths(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_valid_dataset_has_no_issues() {
        let docs = vec![author("author-1"), category("cat-1", "rust"), post("p1", "hello")];
        assert_eq!(Schema::portfolio().validate(&docs), vec![]);
    }

    #[test]
    fn test_required_fields() {
        let doc = json!({"_id": "a", "_type": "blogAuthor", "name": "", "image": {}});
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["name", "description", "image"]);
        assert!(issues.iter().all(|i| i.message == "required"));
    }

    #[test]
    fn test_string_length_counts_characters() {
        let mut doc = author("a");
        doc["name"] = Value::from("é".repeat(100));
        assert!(Schema::portfolio().validate_document(&doc).is_empty());

        doc["name"] = Value::from("é".repeat(101));
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "must be at most 100 characters");
    }

    #[test]
    fn test_number_bounds() {
        let mut doc = post("p1", "hello");
        doc["readTime"] = json!(0);
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(issues[0].path, "readTime");
        assert_eq!(issues[0].message, "must be at least 1");

        doc["readTime"] = json!(61);
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(issues[0].message, "must be at most 60");
    }

    #[test]
    fn test_related_posts_max_three() {
        let mut doc = post("p1", "hello");
        doc["relatedPosts"] = json!([
            {"_ref": "a"}, {"_ref": "b"}, {"_ref": "c"}, {"_ref": "d"}
        ]);
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["relatedPosts"]);
        assert_eq!(issues[0].message, "must be at most 3 items");
    }

    #[test]
    fn test_seo_limits() {
        let mut doc = post("p1", "hello");
        doc["metaTitle"] = Value::from("t".repeat(61));
        doc["metaDescription"] = Value::from("d".repeat(161));
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["metaTitle", "metaDescription"]);
    }

    #[test]
    fn test_project_status_enumeration() {
        let doc = json!({
            "_id": "pr1",
            "_type": "project",
            "title": "Folio",
            "slug": {"current": "folio"},
            "shortDescription": "A site",
            "overview": [{"_type": "block", "children": [{"_type": "span", "text": "x"}]}],
            "image": {"asset": {"_ref": "image-a-1x1-png"}, "alt": "Screenshot"},
            "status": "abandoned"
        });
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["status"]);
        assert!(issues[0].message.contains("in-progress"));
    }

    #[test]
    fn test_project_url_scheme() {
        let doc = json!({
            "_id": "pr1",
            "_type": "project",
            "title": "Folio",
            "slug": {"current": "folio"},
            "shortDescription": "A site",
            "overview": [{"_type": "block", "children": [{"_type": "span", "text": "x"}]}],
            "image": {"asset": {"_ref": "image-a-1x1-png"}, "alt": "Screenshot"},
            "url": "ftp://example.com"
        });
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["url"]);
        assert!(issues[0].message.contains("ftp"));
    }

    #[test]
    fn test_image_nodes_need_alt() {
        let mut doc = post("p1", "hello");
        doc["content"] = json!([
            {"_type": "image", "asset": {"_ref": "image-a-1x1-png"}},
            {"_type": "image", "asset": {"_ref": "image-b-1x1-png"}, "alt": "Diagram"}
        ]);
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["content[0].alt"]);
    }

    #[test]
    fn test_block_content_rules() {
        let mut doc = post("p1", "hello");
        doc["content"] = json!([
            {"_type": "block", "style": "h6", "children": []},
            {
                "_type": "block",
                "markDefs": [{"_key": "l1", "_type": "link", "href": "javascript:alert(1)"}],
                "children": [{"_type": "span", "text": "x", "marks": ["l1", "strong", "glow"]}]
            },
            {"_type": "codeBlock", "code": "x", "language": "cobol"},
            {"_type": "youtube"}
        ]);

        let issues = Schema::portfolio().validate_document(&doc);

        assert_eq!(
            paths(&issues),
            vec![
                "content[0].style",
                "content[1].markDefs[0].href",
                "content[1].children[0].marks",
                "content[2].language",
                "content[3]",
            ]
        );
    }

    #[test]
    fn test_project_overview_has_no_strike_through() {
        let doc = json!({
            "_id": "pr1",
            "_type": "project",
            "title": "Folio",
            "slug": {"current": "folio"},
            "shortDescription": "A site",
            "overview": [{"_type": "block", "children": [{"_type": "span", "text": "x", "marks": ["strike-through"]}]}],
            "image": {"asset": {"_ref": "image-a-1x1-png"}, "alt": "Screenshot"}
        });
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["overview[0].children[0].marks"]);
    }

    #[test]
    fn test_datetime_format() {
        let mut doc = post("p1", "hello");
        doc["publishedDate"] = json!("yesterday");
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["publishedDate"]);
    }

    #[test]
    fn test_reference_target_type() {
        let mut bad = post("p1", "hello");
        bad["author"] = json!({"_ref": "cat-1"});
        let docs = vec![category("cat-1", "rust"), bad];

        let issues = Schema::portfolio().validate(&docs);

        assert_eq!(paths(&issues), vec!["author"]);
        assert!(issues[0].message.contains("blogCategory"));
    }

    #[test]
    fn test_dangling_reference_is_not_an_issue() {
        let docs = vec![post("p1", "hello")];
        assert!(Schema::portfolio().validate(&docs).is_empty());
    }

    #[test]
    fn test_slug_uniqueness_per_type() {
        let docs = vec![
            author("author-1"),
            category("cat-1", "hello"),
            post("p1", "hello"),
            post("p2", "hello"),
        ];

        let issues = Schema::portfolio().validate(&docs);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].document_id, "p2");
        assert_eq!(issues[0].message, "slug 'hello' is already used by p1");
    }

    #[test]
    fn test_draft_shares_slug_with_published() {
        let docs = vec![
            author("author-1"),
            category("cat-1", "rust"),
            post("p1", "hello"),
            post("drafts.p1", "hello"),
        ];
        assert!(Schema::portfolio().validate(&docs).is_empty());
    }

    #[test]
    fn test_duplicate_singleton() {
        let docs = vec![
            json!({"_id": "s1", "_type": "siteSettings", "title": "A", "description": "d"}),
            json!({"_id": "s2", "_type": "siteSettings", "title": "B", "description": "d"}),
        ];
        let issues = Schema::portfolio().validate(&docs);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("siteSettings"));
    }

    #[test]
    fn test_social_links() {
        let doc = json!({
            "_id": "s1",
            "_type": "siteSettings",
            "title": "Site",
            "description": "d",
            "email": "not-an-email",
            "socialLinks": [
                {"platform": "github", "url": "https://github.com/me"},
                {"platform": "myspace", "url": "https://myspace.com"}
            ]
        });
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(paths(&issues), vec!["email", "socialLinks[1].platform"]);
    }

    #[test]
    fn test_experience_dates() {
        let doc = json!({
            "_id": "about",
            "_type": "aboutPage",
            "title": "About",
            "bio": [{"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Hi"}]}],
            "experience": [
                {"title": "Dev", "company": "Acme", "startDate": "2020-13-01"}
            ],
            "skillCategories": [
                {"category": "Lang", "skills": [{"name": "Rust", "level": "guru"}]}
            ]
        });
        let issues = Schema::portfolio().validate_document(&doc);
        assert_eq!(
            paths(&issues),
            vec!["experience[0].startDate", "skillCategories[0].skills[0].level"]
        );
    }

    #[test]
    fn test_unknown_document_type() {
        let issues = Schema::portfolio().validate_document(&json!({"_id": "x", "_type": "widget"}));
        assert_eq!(paths(&issues), vec!["_type"]);
    }

    #[test]
    fn test_non_schema_documents_ignored() {
        let docs = vec![json!({"_id": "image-abc", "_type": "sanity.imageAsset", "url": "x"})];
        assert!(Schema::portfolio().validate(&docs).is_empty());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue {
            document_id: "p1".to_owned(),
            path: "title".to_owned(),
            message: "required".to_owned(),
        };
        assert_eq!(issue.to_string(), "p1: title: required");
    }
}
