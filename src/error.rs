//! The errors thrown when executing a request

/// All the possible errors returned by the [`HttpClient`](crate::client::HttpClient)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request url couldn't be built on top of the base url
    #[error("unable to build request url")]
    Url(#[from] url::ParseError),
    /// The JSON body couldn't be serialized
    #[error("unable to serialize request body")]
    SerdeJson(#[from] serde_json::Error),
    /// Error specific to the [`HttpClient`](crate::client::HttpClient)
    #[cfg(feature = "client-http")]
    #[error("unable to execute http request")]
    Reqwest(#[from] reqwest::Error),
}
