//! Test doubles for the command controller.
//!
//! [`MockHost`] records what the controller shows the user,
//! [`MockDocumentationService`] returns a canned response, and
//! [`MockPublisher`] records page creation requests.

use std::io;
use std::sync::Mutex;

use autodoc_confluence::{ConfluenceError, Page, PagePublisher, PublishRequest};
use autodoc_generator::{DocumentationService, GeneratedDocument, GenerationError};

use crate::host::{Host, NoticeLevel, PreviewPanel, SourceText};

/// Host that records notices, confirmations and previews.
///
/// # Example
///
/// ```ignore
/// let host = MockHost::new()
///     .with_document("Sort.java", "class Sort {}")
///     .with_answer("Yes");
/// controller.run(&host);
/// assert_eq!(host.previews().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockHost {
    document: Option<SourceText>,
    answer: Option<String>,
    fail_preview: bool,
    notices: Mutex<Vec<(NoticeLevel, String)>>,
    confirmations: Mutex<Vec<String>>,
    previews: Mutex<Vec<PreviewPanel>>,
}

impl MockHost {
    /// Host with no open document that dismisses every prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active document.
    #[must_use]
    pub fn with_document(mut self, name: &str, text: &str) -> Self {
        self.document = Some(SourceText::new(name, text));
        self
    }

    /// Answer confirmation prompts with `answer`.
    #[must_use]
    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_owned());
        self
    }

    /// Make `show_preview` fail.
    #[must_use]
    pub fn with_failing_preview(mut self) -> Self {
        self.fail_preview = true;
        self
    }

    /// Notices shown so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }

    /// Number of notices shown at `level`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    /// Confirmation prompts asked so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }

    /// Previews shown so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn previews(&self) -> Vec<PreviewPanel> {
        self.previews.lock().unwrap().clone()
    }
}

impl Host for MockHost {
    fn active_document(&self) -> Option<SourceText> {
        self.document.clone()
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((level, message.to_owned()));
    }

    fn confirm(&self, message: &str, _choices: &[&str]) -> Option<String> {
        self.confirmations.lock().unwrap().push(message.to_owned());
        self.answer.clone()
    }

    fn show_preview(&self, panel: &PreviewPanel) -> io::Result<()> {
        if self.fail_preview {
            return Err(io::Error::other("preview unavailable"));
        }
        self.previews.lock().unwrap().push(panel.clone());
        Ok(())
    }
}

/// Documentation service returning a canned result.
#[derive(Debug)]
pub struct MockDocumentationService {
    response: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl MockDocumentationService {
    /// Service that returns `result` for every request.
    #[must_use]
    pub fn responding(result: &str) -> Self {
        Self {
            response: Some(result.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Service whose every request fails with a 503.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Source texts requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl DocumentationService for MockDocumentationService {
    fn request_documentation(&self, code: &str) -> Result<GeneratedDocument, GenerationError> {
        self.requests.lock().unwrap().push(code.to_owned());
        match &self.response {
            Some(result) => Ok(GeneratedDocument::new(result.clone())),
            None => Err(GenerationError::HttpResponse {
                status: 503,
                body: "Service Unavailable".to_owned(),
            }),
        }
    }
}

/// Publisher that records requests.
#[derive(Debug, Default)]
pub struct MockPublisher {
    fail: bool,
    requests: Mutex<Vec<PublishRequest>>,
}

impl MockPublisher {
    /// Publisher that accepts every request as page `1000`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publisher that rejects every request with a 401.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PagePublisher for MockPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<Page, ConfluenceError> {
        if self.fail {
            return Err(ConfluenceError::HttpResponse {
                status: 401,
                body: "Unauthorized".to_owned(),
            });
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(Page {
            id: "1000".to_owned(),
            content_type: "page".to_owned(),
            title: request.title.clone(),
            version: None,
            links: None,
        })
    }

    fn page_url(&self, page: &Page) -> String {
        page.web_url("https://wiki.example.com")
    }
}
