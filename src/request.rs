//! The request value produced by the [`RequestBuilder`](crate::builder::RequestBuilder)
//!
//! A [`Request`] holds everything needed to reach the API: the method, a path
//! template and its named substitutions, the query parameters, headers, form
//! fields, the JSON body and the files to upload. It doesn't perform any I/O,
//! executing it is the job of a [`Transport`](crate::prelude::Transport).

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use serde_json::Value;
use url::Url;

/// The HTTP methods used by the API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The format expected for the request body and the response
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// The response content is handed back as is, without any decoding.
    #[default]
    Raw,
    /// The body is sent as JSON, without its null members.
    Json,
}

/// A file sent as a part of a multipart form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// Name of the form field
    pub field: Cow<'static, str>,
    /// Name of the file as announced to the server
    pub file_name: String,
    pub content: Bytes,
}

/// A fully formed request, ready to be executed.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    method: Method,
    template: Cow<'static, str>,
    format: Format,
    segments: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    headers: Vec<(&'static str, String)>,
    form: Vec<(&'static str, String)>,
    files: Vec<FilePart>,
    body: Option<Value>,
}

impl Request {
    pub(crate) fn new(method: Method, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            template: template.into(),
            format: Format::Raw,
            segments: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            form: Vec::new(),
            files: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Registers the value replacing the `{name}` placeholder of the template.
    pub(crate) fn add_segment(&mut self, name: &'static str, value: impl Into<String>) {
        self.segments.push((name, value.into()));
    }

    pub(crate) fn add_query(&mut self, name: &'static str, value: impl Into<String>) {
        self.query.push((name, value.into()));
    }

    pub(crate) fn add_header(&mut self, name: &'static str, value: impl Into<String>) {
        self.headers.push((name, value.into()));
    }

    pub(crate) fn add_form(&mut self, name: &'static str, value: impl Into<String>) {
        self.form.push((name, value.into()));
    }

    pub(crate) fn add_file(
        &mut self,
        field: &'static str,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) {
        self.files.push(FilePart {
            field: Cow::Borrowed(field),
            file_name: file_name.into(),
            content: content.into(),
        });
    }

    pub(crate) fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }
}

impl Request {
    pub fn method(&self) -> Method {
        self.method
    }

    /// The path template, with its `{name}` placeholders
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn segments(&self) -> &[(&'static str, String)] {
        &self.segments
    }

    /// Value registered for the `{name}` placeholder
    pub fn segment(&self, name: &str) -> Option<&str> {
        find(&self.segments, name)
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        find(&self.query, name)
    }

    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    /// Header value, the lookup ignores the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn form(&self) -> &[(&'static str, String)] {
        &self.form
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Splits the template on `/` and replaces every `{name}` placeholder by its value.
    ///
    /// The substitution happens after the split, a value containing a `/` stays
    /// a single segment. Placeholders without a registered value are kept as is.
    pub fn path_segments(&self) -> Vec<&str> {
        self.template
            .split('/')
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .and_then(|name| self.segment(name))
                    .unwrap_or(item)
            })
            .collect()
    }

    /// The path with its placeholders replaced, without any encoding.
    pub fn path(&self) -> String {
        self.path_segments().join("/")
    }

    /// Builds the complete url on top of the `base` url.
    ///
    /// Every segment is percent encoded once, the query parameters are form encoded.
    /// A segment equal to `.` or `..` is a dot segment for URLs and is left out,
    /// use [`Request::path`] to see it.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(self.path_segments());
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }

    /// Serializes the JSON body, removing the null members at any depth.
    ///
    /// Returns `None` when the request has no JSON body.
    pub fn json_body(&self) -> Option<Result<Vec<u8>, serde_json::Error>> {
        if self.format != Format::Json {
            return None;
        }
        self.body
            .as_ref()
            .map(|body| serde_json::to_vec(&without_nulls(body)))
    }
}

fn find<'a>(items: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.as_str())
}

fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, item)| !item.is_null())
                .map(|(key, item)| (key.clone(), without_nulls(item)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}
