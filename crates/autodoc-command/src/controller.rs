//! Command controller.
//!
//! One invocation walks this state machine and never keeps state between
//! invocations:
//!
//! ```text
//! Idle -> ReadingDocument -> RequestingDocumentation -> ExtractingDiagram -> Previewing
//!                 |                    |                                       |
//!                 +------> Failed <----+                     (publish flow, "Yes" only)
//!                                                                              |
//!                                  AwaitingConfirmation -> Publishing -> Published | PublishFailed
//! ```
//!
//! External calls are wrapped at their boundary: a failure becomes one error
//! notice for the user plus a log entry with the detail, and the invocation
//! ends. A missing diagram is only a warning.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use autodoc_config::Flow;
use autodoc_confluence::{
    ConfluenceError, DiagramImage, Page, PagePublisher, PublishRequest, PublishTarget,
};
use autodoc_diagrams::extract_diagram;
use autodoc_generator::{DocumentationService, GeneratedDocument};
use autodoc_preview::{PREVIEW_HEADING, PreviewOptions, escape_html, render_preview};
use tracing::{error, info, warn};

use crate::host::{CHOICE_NO, CHOICE_YES, Host, NoticeLevel, PreviewPanel, SourceText};

pub const MSG_NO_ACTIVE_DOCUMENT: &str = "No active editor found.";
pub const MSG_GENERATING: &str = "Generating documentation...";
pub const MSG_GENERATION_FAILED: &str = "Failed to generate documentation.";
pub const MSG_NO_DIAGRAM: &str = "No Mermaid diagram found in the response.";
pub const MSG_PREVIEW_FAILED: &str = "Failed to show documentation preview.";
pub const MSG_CONFIRM_PUBLISH: &str =
    "Documentation generated. Do you want to upload it to Confluence?";
pub const MSG_UPLOADING: &str = "Uploading to Confluence...";
pub const MSG_UPLOADED: &str = "Documentation uploaded successfully.";
pub const MSG_PUBLISH_FAILED: &str = "Failed to upload to Confluence.";

/// States of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ReadingDocument,
    RequestingDocumentation,
    ExtractingDiagram,
    Previewing,
    AwaitingConfirmation,
    Publishing,
    Published,
    PublishFailed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::ReadingDocument => "reading-document",
            Self::RequestingDocumentation => "requesting-documentation",
            Self::ExtractingDiagram => "extracting-diagram",
            Self::Previewing => "previewing",
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::Publishing => "publishing",
            Self::Published => "published",
            Self::PublishFailed => "publish-failed",
            Self::Failed => "failed",
        })
    }
}

/// Why an invocation failed before the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// No document was open.
    NoActiveDocument,
    /// The text-generation call failed or returned an unusable body.
    Generation,
    /// The host could not display the preview.
    Preview,
}

/// Where an invocation ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Ended before a preview was shown.
    Failed(Failure),
    /// Preview shown; preview flow ends here.
    Previewed { diagram_found: bool },
    /// Preview shown; the user did not confirm publishing.
    Declined { diagram_found: bool },
    /// Page created.
    Published { page: Page, url: String },
    /// Preview shown, publishing confirmed, page creation failed.
    PublishFailed,
}

impl Outcome {
    /// Terminal stage of the state machine.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Failed(_) => Stage::Failed,
            Self::Previewed { .. } | Self::Declined { .. } => Stage::Previewing,
            Self::Published { .. } => Stage::Published,
            Self::PublishFailed => Stage::PublishFailed,
        }
    }
}

/// Body variant used when publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishMode {
    /// Documentation text only, title with random suffix.
    Text,
    /// Documentation text followed by the image at this path.
    WithDiagramImage(PathBuf),
}

impl PublishMode {
    /// Mode implied by an optional image path.
    #[must_use]
    pub fn from_image(image: Option<PathBuf>) -> Self {
        image.map_or(Self::Text, Self::WithDiagramImage)
    }
}

/// Everything the publish flow needs beyond the preview flow.
pub struct Publishing {
    /// Page creation backend.
    pub publisher: Arc<dyn PagePublisher>,
    /// Space, parent page and title.
    pub target: PublishTarget,
    /// Body variant.
    pub mode: PublishMode,
}

impl Publishing {
    fn build_request(&self, content: &str) -> Result<PublishRequest, ConfluenceError> {
        match &self.mode {
            PublishMode::Text => Ok(PublishRequest::text(&self.target, content)),
            PublishMode::WithDiagramImage(path) => {
                let image = DiagramImage::read(path)?;
                Ok(PublishRequest::with_diagram(&self.target, content, &image))
            }
        }
    }
}

/// Runs the `autodoc.autodoc` command.
pub struct CommandController {
    service: Arc<dyn DocumentationService>,
    preview: PreviewOptions,
    publishing: Option<Publishing>,
}

impl CommandController {
    /// Controller for the preview flow.
    #[must_use]
    pub fn preview(service: Arc<dyn DocumentationService>, preview: PreviewOptions) -> Self {
        Self {
            service,
            preview,
            publishing: None,
        }
    }

    /// Controller for the preview-then-publish flow.
    #[must_use]
    pub fn publish(
        service: Arc<dyn DocumentationService>,
        preview: PreviewOptions,
        publishing: Publishing,
    ) -> Self {
        Self {
            service,
            preview,
            publishing: Some(publishing),
        }
    }

    /// Flow this controller runs.
    #[must_use]
    pub fn flow(&self) -> Flow {
        if self.publishing.is_some() {
            Flow::Publish
        } else {
            Flow::Preview
        }
    }

    /// Run one invocation against `host`.
    pub fn run(&self, host: &dyn Host) -> Outcome {
        enter(Stage::Idle);

        enter(Stage::ReadingDocument);
        let Some(source) = host.active_document() else {
            host.notify(NoticeLevel::Error, MSG_NO_ACTIVE_DOCUMENT);
            return fail(Failure::NoActiveDocument);
        };

        enter(Stage::RequestingDocumentation);
        host.notify(NoticeLevel::Info, MSG_GENERATING);
        let Some(document) = self.generate(host, &source) else {
            return fail(Failure::Generation);
        };

        enter(Stage::ExtractingDiagram);
        let diagram = extract_diagram(&document.result);
        let diagram_found = diagram.is_some();
        if !diagram_found {
            host.notify(NoticeLevel::Warning, MSG_NO_DIAGRAM);
        }

        enter(Stage::Previewing);
        let panel = PreviewPanel {
            title: PREVIEW_HEADING.to_owned(),
            source_name: source.name.clone(),
            html: render_preview(&document.result, diagram.as_deref(), &self.preview),
        };
        if let Err(err) = host.show_preview(&panel) {
            error!(error = %err, "Failed to show preview");
            host.notify(NoticeLevel::Error, MSG_PREVIEW_FAILED);
            return fail(Failure::Preview);
        }

        let Some(publishing) = &self.publishing else {
            return Outcome::Previewed { diagram_found };
        };

        enter(Stage::AwaitingConfirmation);
        let answer = host.confirm(MSG_CONFIRM_PUBLISH, &[CHOICE_YES, CHOICE_NO]);
        if answer.as_deref() != Some(CHOICE_YES) {
            info!(answer = ?answer, "Publishing not confirmed");
            return Outcome::Declined { diagram_found };
        }

        enter(Stage::Publishing);
        host.notify(NoticeLevel::Info, MSG_UPLOADING);
        match self.publish_document(host, publishing, &document) {
            Some(page) => {
                let url = publishing.publisher.page_url(&page);
                host.notify(NoticeLevel::Info, MSG_UPLOADED);
                enter(Stage::Published);
                Outcome::Published { page, url }
            }
            None => {
                enter(Stage::PublishFailed);
                Outcome::PublishFailed
            }
        }
    }

    /// Documentation request boundary.
    fn generate(&self, host: &dyn Host, source: &SourceText) -> Option<GeneratedDocument> {
        info!("Generating documentation for {}", source.name);
        match self.service.request_documentation(&source.text) {
            Ok(document) => Some(document),
            Err(err) => {
                error!(error = ?err, "Error generating documentation");
                host.notify(NoticeLevel::Error, MSG_GENERATION_FAILED);
                None
            }
        }
    }

    /// Publish boundary.
    fn publish_document(
        &self,
        host: &dyn Host,
        publishing: &Publishing,
        document: &GeneratedDocument,
    ) -> Option<Page> {
        let content = if self.preview.escape_html {
            escape_html(&document.result)
        } else {
            document.result.clone()
        };

        let result = publishing
            .build_request(&content)
            .and_then(|request| publishing.publisher.publish(&request));

        match result {
            Ok(page) => Some(page),
            Err(err) => {
                error!(error = ?err, "Error uploading to Confluence");
                host.notify(NoticeLevel::Error, MSG_PUBLISH_FAILED);
                None
            }
        }
    }
}

fn enter(stage: Stage) {
    info!(%stage, "Command stage");
}

fn fail(failure: Failure) -> Outcome {
    warn!(?failure, "Command failed");
    enter(Stage::Failed);
    Outcome::Failed(failure)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{MockDocumentationService, MockHost, MockPublisher};

    const RESPONSE_WITH_DIAGRAM: &str =
        "# Overview\n\nSorts things.\n\n```mermaid\nsequenceDiagram\nA->>B: hi\n```\n";

    fn target() -> PublishTarget {
        PublishTarget {
            space_key: "SD".to_owned(),
            parent_page_id: "131371".to_owned(),
            title: "Generated Documentation".to_owned(),
            title_suffix: false,
        }
    }

    fn preview_controller(service: MockDocumentationService) -> CommandController {
        CommandController::preview(Arc::new(service), PreviewOptions::default())
    }

    fn publish_controller(
        service: MockDocumentationService,
        publisher: &Arc<MockPublisher>,
        mode: PublishMode,
    ) -> CommandController {
        CommandController::publish(
            Arc::new(service),
            PreviewOptions::default(),
            Publishing {
                publisher: Arc::clone(publisher) as Arc<dyn PagePublisher>,
                target: target(),
                mode,
            },
        )
    }

    #[test]
    fn test_flow() {
        let publisher = Arc::new(MockPublisher::new());
        assert_eq!(
            preview_controller(MockDocumentationService::responding("x")).flow(),
            Flow::Preview
        );
        assert_eq!(
            publish_controller(
                MockDocumentationService::responding("x"),
                &publisher,
                PublishMode::Text
            )
            .flow(),
            Flow::Publish
        );
    }

    #[test]
    fn test_no_active_document_makes_no_request() {
        let service = Arc::new(MockDocumentationService::responding(RESPONSE_WITH_DIAGRAM));
        let controller = CommandController::preview(
            Arc::clone(&service) as Arc<dyn DocumentationService>,
            PreviewOptions::default(),
        );
        let host = MockHost::new();

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Failed(Failure::NoActiveDocument)));
        assert_eq!(service.requests().len(), 0);
        assert_eq!(
            host.notices(),
            vec![(NoticeLevel::Error, MSG_NO_ACTIVE_DOCUMENT.to_owned())]
        );
        assert!(host.previews().is_empty());
    }

    #[test]
    fn test_preview_flow_with_diagram() {
        let service = Arc::new(MockDocumentationService::responding(RESPONSE_WITH_DIAGRAM));
        let controller = CommandController::preview(
            Arc::clone(&service) as Arc<dyn DocumentationService>,
            PreviewOptions::default(),
        );
        let host = MockHost::new().with_document("Sort.java", "class Sort {}");

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Previewed { diagram_found: true }));
        assert_eq!(outcome.stage(), Stage::Previewing);
        assert_eq!(service.requests(), vec!["class Sort {}".to_owned()]);
        assert_eq!(
            host.notices(),
            vec![(NoticeLevel::Info, MSG_GENERATING.to_owned())]
        );

        let previews = host.previews();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].title, "Generated Documentation");
        assert_eq!(previews[0].source_name, "Sort.java");
        assert!(previews[0].html.contains("class=\"mermaid\">\nsequenceDiagram\nA-&gt;&gt;B: hi\n</pre>"));
        assert!(host.confirmations().is_empty());
    }

    #[test]
    fn test_missing_diagram_still_previews_with_warning() {
        let controller = preview_controller(MockDocumentationService::responding("Plain docs"));
        let host = MockHost::new().with_document("a.rs", "fn a() {}");

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Previewed { diagram_found: false }));
        assert_eq!(
            host.notices(),
            vec![
                (NoticeLevel::Info, MSG_GENERATING.to_owned()),
                (NoticeLevel::Warning, MSG_NO_DIAGRAM.to_owned()),
            ]
        );
        assert_eq!(host.previews().len(), 1);
        assert!(host.previews()[0].html.contains("<div id=\"mermaid-container\"></div>"));
    }

    #[test]
    fn test_generation_failure_aborts_with_one_notice() {
        let controller = preview_controller(MockDocumentationService::failing());
        let host = MockHost::new().with_document("a.rs", "fn a() {}");

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Failed(Failure::Generation)));
        assert_eq!(outcome.stage(), Stage::Failed);
        assert!(host.previews().is_empty());
        assert_eq!(host.count(NoticeLevel::Error), 1);
        assert_eq!(
            host.notices().last(),
            Some(&(NoticeLevel::Error, MSG_GENERATION_FAILED.to_owned()))
        );
    }

    #[test]
    fn test_preview_failure() {
        let controller = preview_controller(MockDocumentationService::responding("Docs"));
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_failing_preview();

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Failed(Failure::Preview)));
        assert_eq!(
            host.notices().last(),
            Some(&(NoticeLevel::Error, MSG_PREVIEW_FAILED.to_owned()))
        );
    }

    #[test]
    fn test_publish_flow_confirmed() {
        let publisher = Arc::new(MockPublisher::new());
        let controller = publish_controller(
            MockDocumentationService::responding("Docs & more"),
            &publisher,
            PublishMode::Text,
        );
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_answer(CHOICE_YES);

        let outcome = controller.run(&host);

        let (page, url) = match outcome {
            Outcome::Published { page, url } => (page, url),
            other => panic!("expected Published, got {other:?}"),
        };
        assert_eq!(page.id, "1000");
        assert_eq!(url, "https://wiki.example.com/pages/viewpage.action?pageId=1000");
        assert_eq!(host.previews().len(), 1);
        assert_eq!(host.confirmations(), vec![MSG_CONFIRM_PUBLISH.to_owned()]);

        let requests = publisher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "Generated Documentation");
        assert_eq!(requests[0].body, "\n<p>Docs &amp; more</p>\n");

        assert_eq!(
            host.notices(),
            vec![
                (NoticeLevel::Info, MSG_GENERATING.to_owned()),
                (NoticeLevel::Warning, MSG_NO_DIAGRAM.to_owned()),
                (NoticeLevel::Info, MSG_UPLOADING.to_owned()),
                (NoticeLevel::Info, MSG_UPLOADED.to_owned()),
            ]
        );
    }

    #[test]
    fn test_publish_flow_unescaped_content() {
        let publisher = Arc::new(MockPublisher::new());
        let controller = CommandController::publish(
            Arc::new(MockDocumentationService::responding("<b>Docs</b>")),
            PreviewOptions {
                escape_html: false,
                ..PreviewOptions::default()
            },
            Publishing {
                publisher: Arc::clone(&publisher) as Arc<dyn PagePublisher>,
                target: target(),
                mode: PublishMode::Text,
            },
        );
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_answer(CHOICE_YES);

        controller.run(&host);

        assert_eq!(publisher.requests()[0].body, "\n<p><b>Docs</b></p>\n");
    }

    #[test]
    fn test_publish_flow_declined() {
        for answer in [Some(CHOICE_NO), Some("yes"), None] {
            let publisher = Arc::new(MockPublisher::new());
            let controller = publish_controller(
                MockDocumentationService::responding(RESPONSE_WITH_DIAGRAM),
                &publisher,
                PublishMode::Text,
            );
            let mut host = MockHost::new().with_document("a.rs", "fn a() {}");
            if let Some(answer) = answer {
                host = host.with_answer(answer);
            }

            let outcome = controller.run(&host);

            assert!(
                matches!(outcome, Outcome::Declined { diagram_found: true }),
                "answer {answer:?} gave {outcome:?}"
            );
            assert_eq!(outcome.stage(), Stage::Previewing);
            assert!(publisher.requests().is_empty());
            assert_eq!(host.previews().len(), 1);
        }
    }

    #[test]
    fn test_publish_failure_keeps_preview() {
        let publisher = Arc::new(MockPublisher::failing());
        let controller = publish_controller(
            MockDocumentationService::responding(RESPONSE_WITH_DIAGRAM),
            &publisher,
            PublishMode::Text,
        );
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_answer(CHOICE_YES);

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::PublishFailed));
        assert_eq!(outcome.stage(), Stage::PublishFailed);
        assert_eq!(host.previews().len(), 1);
        assert_eq!(host.count(NoticeLevel::Error), 1);
        assert_eq!(
            host.notices().last(),
            Some(&(NoticeLevel::Error, MSG_PUBLISH_FAILED.to_owned()))
        );
    }

    #[test]
    fn test_publish_with_diagram_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("arch.svg");
        std::fs::write(&image, "<svg/>").unwrap();

        let publisher = Arc::new(MockPublisher::new());
        let controller = publish_controller(
            MockDocumentationService::responding("Docs"),
            &publisher,
            PublishMode::WithDiagramImage(image),
        );
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_answer(CHOICE_YES);

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Published { .. }));
        let requests = publisher.requests();
        assert!(requests[0].body.contains("<p>Diagram:</p>"));
        assert!(
            requests[0]
                .body
                .contains("<img src=\"data:image/svg+xml;base64,PHN2Zy8+\" />")
        );
    }

    #[test]
    fn test_publish_with_missing_image_fails_publish_only() {
        let publisher = Arc::new(MockPublisher::new());
        let controller = publish_controller(
            MockDocumentationService::responding("Docs"),
            &publisher,
            PublishMode::WithDiagramImage(Path::new("/nonexistent/arch.svg").to_path_buf()),
        );
        let host = MockHost::new()
            .with_document("a.rs", "fn a() {}")
            .with_answer(CHOICE_YES);

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::PublishFailed));
        assert!(publisher.requests().is_empty());
        assert_eq!(host.previews().len(), 1);
    }

    #[test]
    fn test_publish_mode_from_image() {
        assert_eq!(PublishMode::from_image(None), PublishMode::Text);
        assert_eq!(
            PublishMode::from_image(Some(PathBuf::from("a.svg"))),
            PublishMode::WithDiagramImage(PathBuf::from("a.svg"))
        );
    }
}
