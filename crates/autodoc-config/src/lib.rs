//! Configuration management for autodoc.
//!
//! Reads `autodoc.toml`, found in the working directory or the nearest
//! ancestor that has one, into typed sections.
//!
//! Command-line overrides are applied on top via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Credential, URL and path fields may reference the environment:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `command.diagram_image`
//! - `generator.url`, `generator.api_key`, `generator.api_host`
//! - `preview.mermaid_cdn_url`
//! - `confluence.base_url`, `confluence.username`, `confluence.api_token`
//! - `confluence.space_key`, `confluence.parent_page_id`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name looked up during discovery.
const CONFIG_FILENAME: &str = "autodoc.toml";

/// Default text-generation endpoint.
pub const DEFAULT_GENERATOR_URL: &str = "https://chatgpt-42.p.rapidapi.com/gpt4";

/// Default `x-rapidapi-host` header value.
pub const DEFAULT_GENERATOR_HOST: &str = "chatgpt-42.p.rapidapi.com";

/// Default Mermaid bundle loaded by the preview document.
pub const DEFAULT_MERMAID_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";

/// Default title for published pages.
pub const DEFAULT_PAGE_TITLE: &str = "Generated Documentation";

/// Placeholder replaced by the source text in a custom prompt template.
pub const PROMPT_CODE_PLACEHOLDER: &str = "{code}";

/// Command-line overrides.
///
/// Unset fields leave the file value in place.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override command flow.
    pub flow: Option<Flow>,
    /// Override diagram image used by the image publish mode.
    pub diagram_image: Option<PathBuf>,
    /// Override preview output directory.
    pub output_dir: Option<PathBuf>,
}

/// Which flow the `autodoc.autodoc` command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Generate and show the preview, then stop.
    Preview,
    /// Generate, show the preview, then ask whether to publish.
    Publish,
}

impl Flow {
    /// Return flow as its configuration string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command configuration (paths are relative strings from TOML).
    command: CommandConfigRaw,
    /// Text-generation service configuration.
    pub generator: Option<GeneratorConfig>,
    /// Preview configuration (paths are relative strings from TOML).
    preview: PreviewConfigRaw,
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Resolved command configuration (set after loading).
    #[serde(skip)]
    pub command_resolved: CommandConfig,
    /// Resolved preview configuration (set after loading).
    #[serde(skip)]
    pub preview_resolved: PreviewConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CommandConfigRaw {
    flow: Option<Flow>,
    diagram_image: Option<String>,
}

/// Resolved command configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CommandConfig {
    /// Selected flow. `None` until set by config or CLI.
    pub flow: Option<Flow>,
    /// Diagram image embedded when publishing, if any.
    pub diagram_image: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreviewConfigRaw {
    output_dir: Option<String>,
    mermaid_cdn_url: Option<String>,
    escape_html: Option<bool>,
}

/// Resolved preview configuration.
#[derive(Debug)]
pub struct PreviewConfig {
    /// Directory preview documents are written to.
    pub output_dir: PathBuf,
    /// URL of the Mermaid bundle.
    pub mermaid_cdn_url: String,
    /// Whether documentation text is HTML-escaped before embedding.
    pub escape_html: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".autodoc/preview"),
            mermaid_cdn_url: DEFAULT_MERMAID_CDN_URL.to_owned(),
            escape_html: true,
        }
    }
}

/// Text-generation service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Endpoint URL.
    #[serde(default = "default_generator_url")]
    pub url: String,
    /// API key sent as `x-rapidapi-key`.
    pub api_key: String,
    /// API host sent as `x-rapidapi-host`.
    #[serde(default = "default_generator_host")]
    pub api_host: String,
    /// Whether the service may browse the web.
    #[serde(default)]
    pub web_access: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom prompt template containing `{code}`.
    #[serde(default)]
    pub prompt_template: Option<String>,
}

impl GeneratorConfig {
    /// Check the section before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.url, "generator.url")?;
        require_http_url(&self.url, "generator.url")?;
        require_non_empty(&self.api_key, "generator.api_key")?;
        require_non_empty(&self.api_host, "generator.api_host")?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "generator.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if let Some(template) = &self.prompt_template
            && !template.contains(PROMPT_CODE_PLACEHOLDER)
        {
            return Err(ConfigError::Validation(format!(
                "generator.prompt_template must contain {PROMPT_CODE_PLACEHOLDER}"
            )));
        }
        Ok(())
    }
}

fn default_generator_url() -> String {
    DEFAULT_GENERATOR_URL.to_owned()
}

fn default_generator_host() -> String {
    DEFAULT_GENERATOR_HOST.to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Confluence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence base URL, including the `/wiki` context path on Cloud.
    pub base_url: String,
    /// Account used for Basic authentication.
    pub username: String,
    /// API token used for Basic authentication.
    pub api_token: String,
    /// Space the page is created in.
    pub space_key: String,
    /// Parent page the new page is attached under.
    pub parent_page_id: String,
    /// Page title.
    #[serde(default = "default_page_title")]
    pub title: String,
    /// Append a random number to the title to avoid collisions.
    #[serde(default = "default_title_suffix")]
    pub title_suffix: bool,
}

impl ConfluenceConfig {
    /// Check credentials and page placement before publishing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;
        require_non_empty(&self.space_key, "confluence.space_key")?;
        require_non_empty(&self.parent_page_id, "confluence.parent_page_id")?;
        require_non_empty(&self.title, "confluence.title")?;
        Ok(())
    }
}

fn default_page_title() -> String {
    DEFAULT_PAGE_TITLE.to_owned()
}

fn default_title_suffix() -> bool {
    true
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_API_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `autodoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(flow) = settings.flow {
            self.command_resolved.flow = Some(flow);
        }
        if let Some(diagram_image) = &settings.diagram_image {
            self.command_resolved.diagram_image = Some(diagram_image.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.preview_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Get the selected flow.
    ///
    /// There is deliberately no default flow; the user picks one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither config nor CLI set it.
    pub fn require_flow(&self) -> Result<Flow, ConfigError> {
        self.command_resolved.flow.ok_or_else(|| {
            ConfigError::Validation(
                "command.flow must be set to \"preview\" or \"publish\" (or pass --flow)".into(),
            )
        })
    }

    /// Get validated generator configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_generator(&self) -> Result<&GeneratorConfig, ConfigError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            ConfigError::Validation("[generator] section required in config".into())
        })?;
        generator.validate()?;
        Ok(generator)
    }

    /// Get validated Confluence configuration.
    ///
    /// Use this instead of accessing the `confluence` field directly when the
    /// command requires Confluence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            command: CommandConfigRaw::default(),
            generator: None,
            preview: PreviewConfigRaw::default(),
            confluence: None,
            command_resolved: CommandConfig::default(),
            preview_resolved: PreviewConfig {
                output_dir: base.join(".autodoc").join("preview"),
                ..PreviewConfig::default()
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only sections every command needs are checked here. `[generator]` and
    /// `[confluence]` are validated when a command asks for them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cdn = &self.preview_resolved.mermaid_cdn_url;
        require_non_empty(cdn, "preview.mermaid_cdn_url")?;
        require_http_url(cdn, "preview.mermaid_cdn_url")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.command.diagram_image, "command.diagram_image")?;
        expand::expand_opt(&mut self.preview.mermaid_cdn_url, "preview.mermaid_cdn_url")?;

        if let Some(ref mut generator) = self.generator {
            generator.url = expand::expand_env(&generator.url, "generator.url")?;
            generator.api_key = expand::expand_env(&generator.api_key, "generator.api_key")?;
            generator.api_host = expand::expand_env(&generator.api_host, "generator.api_host")?;
        }

        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.api_token =
                expand::expand_env(&confluence.api_token, "confluence.api_token")?;
            confluence.space_key =
                expand::expand_env(&confluence.space_key, "confluence.space_key")?;
            confluence.parent_page_id =
                expand::expand_env(&confluence.parent_page_id, "confluence.parent_page_id")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.command_resolved = CommandConfig {
            flow: self.command.flow,
            diagram_image: self.command.diagram_image.as_deref().map(|p| config_dir.join(p)),
        };

        let defaults = PreviewConfig::default();
        self.preview_resolved = PreviewConfig {
            output_dir: config_dir.join(
                self.preview
                    .output_dir
                    .as_deref()
                    .map_or(defaults.output_dir.as_path(), Path::new),
            ),
            mermaid_cdn_url: self
                .preview
                .mermaid_cdn_url
                .clone()
                .unwrap_or(defaults.mermaid_cdn_url),
            escape_html: self.preview.escape_html.unwrap_or(defaults.escape_html),
        };
    }
}
