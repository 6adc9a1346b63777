//! Request builder for the [Box v2 API](https://developer.box.com/reference/)
//!
//! The [`RequestBuilder`](builder::RequestBuilder) turns every operation of the API
//! into a [`Request`](request::Request) value and classifies the responses.
//! Executing the requests is left to a [`Transport`](prelude::Transport), like the
//! [`HttpClient`](client::HttpClient) enabled with the `client-http` feature.

pub mod builder;
#[cfg(feature = "client-http")]
pub mod client;
pub mod credentials;
pub mod error;
pub mod prelude;
pub mod request;
pub mod resource;
pub mod response;
pub mod shared_link;

pub use error::Error;

/// Type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
