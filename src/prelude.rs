use crate::request::Request;
use crate::response::Response;

/// Executes a [`Request`] and hands back the [`Response`] without judging it.
///
/// The [`HttpClient`](crate::client::HttpClient) implements it with `reqwest`.
#[async_trait::async_trait]
pub trait Transport {
    type Error;

    async fn execute(&self, request: &Request) -> Result<Response, Self::Error>;
}
