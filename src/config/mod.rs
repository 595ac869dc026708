use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Request headers sent with one class of outbound fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProfile {
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Profile for the catalogue and schedule JSON endpoints
    #[serde(default = "default_primary_profile")]
    pub primary: HeaderProfile,
    /// Profile for embed page fetches; the embed host keys on these headers
    #[serde(default = "default_embed_profile")]
    pub embed: HeaderProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Catalogue endpoints in priority order
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    #[serde(default = "default_leaf_layout")]
    pub leaf_layout: String,
    #[serde(default = "default_group_layout")]
    pub group_layout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_schedule_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_redirect_prefix")]
    pub redirect_prefix: String,
    /// Embed page URL; `{id}` is replaced by the channel identifier
    #[serde(default = "default_embed_template")]
    pub embed_template: String,
    /// Name of the player function whose return array carries the stream URL
    #[serde(default = "default_player_function")]
    pub player_function: String,
    #[serde(default = "default_schedule_file")]
    pub output_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Playable URL; `{key}` is replaced by the asset key
    #[serde(default = "default_link_template")]
    pub link_template: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_label_suffix")]
    pub label_suffix: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    #[serde(default = "default_group_title")]
    pub group_title: String,
    #[serde(default = "default_schedule_document")]
    pub schedule_file: String,
    #[serde(default = "default_channel_list_document")]
    pub channel_list_file: String,
    #[serde(default = "default_playlist_document")]
    pub playlist_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishBackend {
    Github,
    #[default]
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub backend: PublishBackend,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_github_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Prefer the `GITHUB_TOKEN` environment variable over storing this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_github_user_agent")]
    pub user_agent: String,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// HTTP defaults
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_primary_profile() -> HeaderProfile {
    HeaderProfile {
        user_agent: DEFAULT_PRIMARY_USER_AGENT.to_string(),
        referer: None,
        headers: BTreeMap::new(),
    }
}

fn default_embed_profile() -> HeaderProfile {
    let mut headers = BTreeMap::new();
    headers.insert(
        "Sec-Fetch-Dest".to_string(),
        DEFAULT_EMBED_FETCH_DEST.to_string(),
    );
    HeaderProfile {
        user_agent: DEFAULT_EMBED_USER_AGENT.to_string(),
        referer: Some(DEFAULT_EMBED_REFERER.to_string()),
        headers,
    }
}

// Source defaults
fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
}

fn default_leaf_layout() -> String {
    DEFAULT_LEAF_LAYOUT.to_string()
}

fn default_group_layout() -> String {
    DEFAULT_GROUP_LAYOUT.to_string()
}

// Schedule defaults
fn default_schedule_endpoint() -> String {
    DEFAULT_SCHEDULE_ENDPOINT.to_string()
}

fn default_redirect_prefix() -> String {
    DEFAULT_REDIRECT_PREFIX.to_string()
}

fn default_embed_template() -> String {
    DEFAULT_EMBED_TEMPLATE.to_string()
}

fn default_player_function() -> String {
    DEFAULT_PLAYER_FUNCTION.to_string()
}

fn default_schedule_file() -> String {
    DEFAULT_SCHEDULE_FILE.to_string()
}

// Output defaults
fn default_link_template() -> String {
    DEFAULT_LINK_TEMPLATE.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_label_suffix() -> String {
    DEFAULT_LABEL_SUFFIX.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

fn default_group_title() -> String {
    DEFAULT_GROUP_TITLE.to_string()
}

fn default_schedule_document() -> String {
    DEFAULT_SCHEDULE_DOCUMENT.to_string()
}

fn default_channel_list_document() -> String {
    DEFAULT_CHANNEL_LIST_DOCUMENT.to_string()
}

fn default_playlist_document() -> String {
    DEFAULT_PLAYLIST_DOCUMENT.to_string()
}

// Publish defaults
fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_github_api_base() -> String {
    DEFAULT_GITHUB_API_BASE.to_string()
}

fn default_github_user_agent() -> String {
    DEFAULT_GITHUB_USER_AGENT.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            primary: default_primary_profile(),
            embed: default_embed_profile(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            leaf_layout: default_leaf_layout(),
            group_layout: default_group_layout(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_schedule_endpoint(),
            redirect_prefix: default_redirect_prefix(),
            embed_template: default_embed_template(),
            player_function: default_player_function(),
            output_file: default_schedule_file(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            link_template: default_link_template(),
            timezone: default_timezone(),
            date_format: default_date_format(),
            label_suffix: default_label_suffix(),
            category: default_category(),
            channel_name: default_channel_name(),
            group_title: default_group_title(),
            schedule_file: default_schedule_document(),
            channel_list_file: default_channel_list_document(),
            playlist_file: default_playlist_document(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            backend: PublishBackend::default(),
            output_dir: default_output_dir(),
            github: GithubConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_api_base(),
            owner: String::new(),
            repo: String::new(),
            branch: None,
            token: None,
            user_agent: default_github_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl OutputConfig {
    /// Parse the configured IANA timezone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            AppError::configuration(format!("unknown timezone '{}'", self.timezone))
        })
    }
}

impl GithubConfig {
    /// Token from the environment, falling back to the config file
    pub fn resolved_token(&self) -> Option<String> {
        std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every run fail the same way
    pub fn validate(&self) -> AppResult<()> {
        self.output.tz()?;
        if !crate::utils::datetime::is_valid_format(&self.output.date_format) {
            return Err(AppError::configuration(format!(
                "invalid output.date_format '{}'",
                self.output.date_format
            )));
        }
        if self.sources.endpoints.is_empty() {
            return Err(AppError::configuration("sources.endpoints is empty"));
        }
        if !self.schedule.embed_template.contains("{id}") {
            return Err(AppError::configuration(
                "schedule.embed_template must contain {id}",
            ));
        }
        if !self.output.link_template.contains("{key}") {
            return Err(AppError::configuration(
                "output.link_template must contain {key}",
            ));
        }
        if self.publish.backend == PublishBackend::Github
            && (self.publish.github.owner.is_empty() || self.publish.github.repo.is_empty())
        {
            return Err(AppError::configuration(
                "publish.github.owner and publish.github.repo are required for the github backend",
            ));
        }
        Ok(())
    }
}
