//! The client executing the requests over HTTP

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart;
use url::Url;

use crate::credentials::Credentials;
use crate::prelude::Transport;
use crate::request::{Method, Request};
use crate::response::{Response, JSON_MIME_TYPE};

/// The default user agent for the http client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// The default base url of the API
pub const DEFAULT_BASE_URL: &str = "https://api.box.com/";

/// The errors when generating a [`HttpClient`] from a [`HttpClientBuilder`]
#[derive(Debug, thiserror::Error)]
pub enum HttpClientBuilderError {
    #[error("invalid base url")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("unable to build reqwest client")]
    Reqwest(#[from] reqwest::Error),
}

/// A builder for the [`HttpClient`] structure
///
/// ```
/// use boxapi::client::HttpClientBuilder;
/// use boxapi::credentials::Credentials;
///
/// let _client = HttpClientBuilder::default()
///    .with_credentials(Credentials::api_key("my-key").with_auth_token("my-token"))
///    .with_base_url("https://api.box.com/")
///    .build()
///    .expect("unable to build http client");
/// ```
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    pub client_builder: reqwest::ClientBuilder,
    pub credentials: Option<Credentials>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

fn duration_from_env() -> Option<Duration> {
    let value = std::env::var("BOX_TIMEOUT").ok()?;
    match value.parse::<u64>() {
        Ok(millis) => Some(Duration::from_millis(millis)),
        Err(err) => {
            tracing::warn!("ignoring invalid BOX_TIMEOUT value {value:?}: {err}");
            None
        }
    }
}

impl HttpClientBuilder {
    /// Builds a http client builder from the environment variables. See [`Credentials`].
    ///
    /// The base url is read from `BOX_BASE_URL` and the timeout from `BOX_TIMEOUT`, in milliseconds.
    pub fn from_env() -> Self {
        Self {
            client_builder: reqwest::ClientBuilder::default(),
            credentials: Credentials::from_env(),
            base_url: std::env::var("BOX_BASE_URL").ok(),
            timeout: duration_from_env(),
        }
    }

    pub fn set_client_builder(&mut self, value: reqwest::ClientBuilder) {
        self.client_builder = value;
    }

    pub fn with_client_builder(mut self, value: reqwest::ClientBuilder) -> Self {
        self.set_client_builder(value);
        self
    }

    pub fn set_credentials(&mut self, value: Credentials) {
        self.credentials = Some(value);
    }

    pub fn with_credentials(mut self, value: Credentials) -> Self {
        self.set_credentials(value);
        self
    }

    pub fn set_base_url(&mut self, value: impl Into<String>) {
        self.base_url = Some(value.into());
    }

    pub fn with_base_url(mut self, value: impl Into<String>) -> Self {
        self.set_base_url(value);
        self
    }

    pub fn set_timeout(&mut self, value: Duration) {
        self.timeout = Some(value);
    }

    pub fn with_timeout(mut self, value: Duration) -> Self {
        self.set_timeout(value);
        self
    }

    /// Builds a client for the http protocol
    ///
    /// # Errors
    ///
    /// Returns `Err(HttpClientBuilderError::InvalidBaseUrl)` when the base url cannot be parsed.
    /// Returns `Err(HttpClientBuilderError::Reqwest)` when the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient, HttpClientBuilderError> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let client_builder = self.client_builder.user_agent(USER_AGENT);
        let client_builder = if let Some(timeout) = self.timeout {
            client_builder.timeout(timeout)
        } else {
            client_builder
        };
        Ok(HttpClient {
            client: client_builder.build()?,
            credentials: self.credentials,
            base_url,
        })
    }
}

/// Client for the Box REST API
///
/// ```rust,no_run
/// use boxapi::builder::RequestBuilder;
/// use boxapi::client::HttpClientBuilder;
/// use boxapi::prelude::Transport;
/// use boxapi::resource::ResourceType;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClientBuilder::from_env().build()?;
/// let request = RequestBuilder.get(ResourceType::Folder, "0");
/// let response = client.execute(&request).await?;
/// let outcome = RequestBuilder.was_successful(Some(&response));
/// println!("success: {}", outcome.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    credentials: Option<Credentials>,
    base_url: Url,
}

impl HttpClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_request(&self, request: &Request) -> crate::Result<reqwest::RequestBuilder> {
        let url = request.url(&self.base_url)?;
        tracing::debug!("calling {url}");
        let mut builder = self.client.request(http_method(request.method()), url);
        for (name, value) in request.headers() {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(ref credentials) = self.credentials {
            builder = builder.header(AUTHORIZATION, credentials.header_value());
        }
        if !request.files().is_empty() {
            let mut form = multipart::Form::new();
            for (name, value) in request.form() {
                form = form.text(*name, value.clone());
            }
            for file in request.files() {
                let part = multipart::Part::bytes(file.content.to_vec())
                    .file_name(file.file_name.clone());
                form = form.part(file.field.clone(), part);
            }
            builder = builder.multipart(form);
        } else if !request.form().is_empty() {
            builder = builder.form(request.form());
        } else if let Some(body) = request.json_body() {
            builder = builder.header(CONTENT_TYPE, JSON_MIME_TYPE).body(body?);
        }
        Ok(builder)
    }
}

#[async_trait::async_trait]
impl Transport for HttpClient {
    type Error = crate::Error;

    #[tracing::instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn execute(&self, request: &Request) -> crate::Result<Response> {
        let res = self.build_request(request)?.send().await?;
        let status = res.status();
        tracing::debug!("responded with status {status:?}");
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let content = res.bytes().await?;
        Ok(Response::new(status.as_u16(), content_type, content))
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
