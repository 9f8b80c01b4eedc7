//! Declarative schema building blocks.

use serde::Serialize;
use serde_json::Value;

/// Whether a type is a top-level document or an embedded object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Document,
    Object,
}

/// A named document or object type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaType {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TypeKind,
    /// Only one document of this type exists.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub singleton: bool,
    pub fields: Vec<Field>,
}

impl SchemaType {
    /// New document type.
    pub fn document(name: impl Into<String>, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: TypeKind::Document,
            singleton: false,
            fields,
        }
    }

    /// Mark the type as a singleton.
    #[must_use]
    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field of a document or object type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub title: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind,
            rules: Vec::new(),
            description: None,
            initial_value: None,
        }
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    /// Lower bound: characters for strings, value for numbers, items for arrays.
    #[must_use]
    pub fn min(self, value: f64) -> Self {
        self.rule(Rule::Min { value })
    }

    /// Upper bound: characters for strings, value for numbers, items for arrays.
    #[must_use]
    pub fn max(self, value: f64) -> Self {
        self.rule(Rule::Max { value })
    }

    #[must_use]
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(Rule::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    #[must_use]
    pub fn uri_schemes(self, schemes: &[&str]) -> Self {
        self.rule(Rule::UriSchemes {
            schemes: schemes.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn initial(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Field value kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    String,
    /// Multi-line string.
    Text,
    Number,
    Boolean,
    /// `YYYY-MM-DD`.
    Date,
    /// RFC 3339 timestamp.
    Datetime,
    Url,
    Email,
    /// `{ current }` derived from another field.
    #[serde(rename_all = "camelCase")]
    Slug { source: String, max_length: usize },
    /// Image with an asset reference and extra fields (alt, caption).
    Image { fields: Vec<Field> },
    File {
        #[serde(skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
    },
    /// Reference to a document of one of the `to` types.
    Reference { to: Vec<String> },
    Array { of: Vec<FieldKind> },
    /// Inline object; `name` is its `_type` when it appears in an array.
    Object {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        fields: Vec<Field>,
    },
    /// Portable text.
    BlockContent(BlockContent),
}

impl FieldKind {
    /// Name used in messages and for matching `_type` in arrays.
    pub fn type_name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Url => "url",
            Self::Email => "email",
            Self::Slug { .. } => "slug",
            Self::Image { .. } => "image",
            Self::File { .. } => "file",
            Self::Reference { .. } => "reference",
            Self::Array { .. } => "array",
            Self::Object { name, .. } => name.as_deref().unwrap_or("object"),
            Self::BlockContent(_) => "blockContent",
        }
    }
}

/// Validation rule attached to a field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    Required,
    Min { value: f64 },
    Max { value: f64 },
    OneOf { values: Vec<String> },
    UriSchemes { schemes: Vec<String> },
}

/// Portable text declaration: what a rich-text field may contain.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockContent {
    pub styles: Vec<String>,
    pub decorators: Vec<String>,
    pub lists: Vec<String>,
    /// Annotation object types (e.g. `link`).
    pub annotations: Vec<Field>,
    /// Non-block node types allowed in the array.
    pub types: Vec<FieldKind>,
}

impl BlockContent {
    /// Unrestricted block: all heading levels, standard decorators and links.
    pub fn standard() -> Self {
        Self {
            styles: strings(&[
                "normal",
                "h1",
                "h2",
                "h3",
                "h4",
                "h5",
                "h6",
                "blockquote",
            ]),
            decorators: strings(&["strong", "em", "code", "underline", "strike-through"]),
            lists: strings(&["bullet", "number"]),
            annotations: vec![link_annotation(&["http", "https", "mailto", "tel"], false)],
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_styles(mut self, styles: &[&str]) -> Self {
        self.styles = strings(styles);
        self
    }

    #[must_use]
    pub fn with_decorators(mut self, decorators: &[&str]) -> Self {
        self.decorators = strings(decorators);
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Field>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_type(mut self, kind: FieldKind) -> Self {
        self.types.push(kind);
        self
    }

    /// Annotation declaration by type name.
    pub fn annotation(&self, name: &str) -> Option<&Field> {
        self.annotations.iter().find(|a| a.name == name)
    }
}

/// `link` annotation with `href` limited to `schemes` and a `blank` flag.
pub fn link_annotation(schemes: &[&str], blank_default: bool) -> Field {
    let blank = Field::new("blank", "Open in new tab", FieldKind::Boolean);
    let blank = if blank_default {
        blank.initial(Value::Bool(true))
    } else {
        blank
    };
    Field::new(
        "link",
        "URL",
        FieldKind::Object {
            name: Some("link".to_owned()),
            fields: vec![
                Field::new("href", "URL", FieldKind::Url).uri_schemes(schemes),
                blank,
            ],
        },
    )
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}
