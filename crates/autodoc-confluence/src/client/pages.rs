//! Page operations for Confluence API.

use tracing::{debug, info};

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::publish::{PagePublisher, PublishRequest};
use crate::types::Page;

impl ConfluenceClient {
    /// Create a page under the request's parent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] on transport failure, error status, or an
    /// unparseable response.
    pub fn create_page(&self, request: &PublishRequest) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());
        let payload_bytes = serde_json::to_vec(&request.to_payload())?;

        info!(
            "Creating page '{}' in space {} under {}",
            request.title, request.space_key, request.parent_page_id
        );
        debug!(body_len = request.body.len(), "Page creation payload");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.authorization)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let page: Page = body_reader.read_json()?;
        info!("Created page {} ('{}')", page.id, page.title);
        Ok(page)
    }
}

impl PagePublisher for ConfluenceClient {
    fn publish(&self, request: &PublishRequest) -> Result<Page, ConfluenceError> {
        self.create_page(request)
    }

    fn page_url(&self, page: &Page) -> String {
        page.web_url(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::PublishTarget;
    use crate::test_server::{refused_url, serve_once};

    fn request() -> PublishRequest {
        let target = PublishTarget {
            space_key: "SD".to_owned(),
            parent_page_id: "131371".to_owned(),
            title: "Generated Documentation".to_owned(),
            title_suffix: false,
        };
        PublishRequest::text(&target, "Docs")
    }

    fn client_for(base_url: &str) -> ConfluenceClient {
        ConfluenceClient::new(&format!("{base_url}/wiki"), "user", "pass")
    }

    #[test]
    fn test_create_page_success() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"id":"98305","type":"page","title":"Generated Documentation"}"#,
        );
        let client = client_for(&base_url);

        let page = client.create_page(&request()).unwrap();
        let captured = server.join().unwrap();

        assert_eq!(page.id, "98305");
        assert_eq!(
            client.page_url(&page),
            format!("{base_url}/wiki/pages/viewpage.action?pageId=98305")
        );
        assert_eq!(captured.request_line, "POST /wiki/rest/api/content HTTP/1.1");
        assert_eq!(captured.header("authorization"), Some("Basic dXNlcjpwYXNz"));
        assert_eq!(captured.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body["space"]["key"], "SD");
        assert_eq!(body["ancestors"][0]["id"], "131371");
        assert_eq!(body["body"]["storage"]["value"], "\n<p>Docs</p>\n");
    }

    #[test]
    fn test_create_page_error_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom");

        let err = client_for(&base_url).create_page(&request()).unwrap_err();
        server.join().unwrap();

        match err {
            ConfluenceError::HttpResponse { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected HttpResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_create_page_non_json_body() {
        let (base_url, server) = serve_once("200 OK", "<html>gateway</html>");

        let err = client_for(&base_url).create_page(&request()).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ConfluenceError::HttpRequest(_)));
    }

    #[test]
    fn test_create_page_connection_refused() {
        let err = client_for(&refused_url())
            .create_page(&request())
            .unwrap_err();

        assert!(matches!(err, ConfluenceError::HttpRequest(_)));
    }
}
