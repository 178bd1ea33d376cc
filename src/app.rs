//! The application handler — the terminal end of the pipeline.

use crate::request::Request;
use crate::response::Response;

/// Answers every request with the service's fixed JSON banner.
///
/// Ignores the request entirely: same status, headers, and body regardless of
/// method, path, or payload. Total — no failure path originates here.
pub async fn handle(_req: Request) -> Response {
    Response::json("i'm an app")
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn fixed_banner() {
        let response = handle(Request::builder().build()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
        assert_eq!(response.body(), b"i'm an app");
    }
}
