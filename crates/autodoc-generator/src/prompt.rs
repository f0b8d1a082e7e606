//! Prompt template wrapping the source text.

use autodoc_config::PROMPT_CODE_PLACEHOLDER;
use autodoc_diagrams::DiagramLanguage;

/// Instruction text with a `{code}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Use a custom template. It should contain `{code}`.
    #[must_use]
    pub fn custom(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Built-in template asking for documentation, a sequence diagram in
    /// `language`, and Confluence-style formatting.
    #[must_use]
    pub fn for_language(language: DiagramLanguage) -> Self {
        let template = format!(
            "Generate comprehensive documentation for the following code:\n\n\
             {PROMPT_CODE_PLACEHOLDER}\n\n\
             Additionally, provide {name} syntax in sequence diagram format to visualize \
             the high level architecture. Return the {name} code inside a markdown code block \
             starting with ```{label} so it preserves formatting. \
             Also format the output according to Atlassian Confluence standards.",
            name = language.display_name(),
            label = language.fence_label(),
        );
        Self { template }
    }

    /// Substitute the source text. The inserted text is not rescanned.
    #[must_use]
    pub fn render(&self, code: &str) -> String {
        self.template.replace(PROMPT_CODE_PLACEHOLDER, code)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::for_language(DiagramLanguage::Mermaid)
    }
}
