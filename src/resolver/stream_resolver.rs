use std::sync::Arc;
use tracing::{debug, info, warn};

use super::patterns::PatternChain;
use crate::config::{HeaderProfile, HttpConfig, ScheduleConfig};
use crate::errors::AppResult;
use crate::utils::{HttpFetcher, fill_template};

/// Resolves redirect links from the schedule feed to playable stream URLs.
///
/// Every step can fail on its own; the worst outcome for a channel is `None`.
pub struct StreamResolver {
    fetcher: Arc<dyn HttpFetcher>,
    profile: HeaderProfile,
    redirect_prefix: String,
    embed_template: String,
    patterns: PatternChain,
}

impl StreamResolver {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        profile: HeaderProfile,
        redirect_prefix: String,
        embed_template: String,
        patterns: PatternChain,
    ) -> Self {
        Self {
            fetcher,
            profile,
            redirect_prefix,
            embed_template,
            patterns,
        }
    }

    pub fn from_config(
        fetcher: Arc<dyn HttpFetcher>,
        http: &HttpConfig,
        schedule: &ScheduleConfig,
    ) -> AppResult<Self> {
        Ok(Self::new(
            fetcher,
            http.embed.clone(),
            schedule.redirect_prefix.clone(),
            schedule.embed_template.clone(),
            PatternChain::player_page(&schedule.player_function)?,
        ))
    }

    /// Only links on the known redirect host can be resolved
    pub fn is_eligible(&self, link: &str) -> bool {
        link.starts_with(&self.redirect_prefix)
    }

    /// Channel identifier: the text between the first and second `=`
    pub fn channel_id<'a>(&self, link: &'a str) -> Option<&'a str> {
        if !self.is_eligible(link) {
            return None;
        }
        link.split('=').nth(1).filter(|id| !id.is_empty())
    }

    pub fn embed_url(&self, channel_id: &str) -> String {
        fill_template(&self.embed_template, "id", channel_id)
    }

    /// Fetch the embed page; any failure is "no content"
    pub async fn fetch_embed(&self, url: &str, channel: &str) -> Option<String> {
        match self.fetcher.fetch_text(url, &self.profile).await {
            Ok(body) => {
                debug!(channel = %channel, bytes = body.len(), "Fetched embed page");
                Some(body)
            }
            Err(e) => {
                warn!(channel = %channel, url = %url, error = %e, "Embed page request failed");
                None
            }
        }
    }

    /// Resolve a redirect link to a playable URL
    pub async fn resolve(&self, link: &str, channel: &str) -> Option<String> {
        let Some(channel_id) = self.channel_id(link) else {
            debug!(channel = %channel, link = %link, "Link is not a resolvable redirect");
            return None;
        };
        debug!(channel = %channel, channel_id = %channel_id, "Extracted channel id");

        let embed_url = self.embed_url(channel_id);
        let page = self.fetch_embed(&embed_url, channel).await?;

        match self.patterns.extract(&page) {
            Some(url) => {
                info!(channel = %channel, url = %url, "Resolved stream URL");
                Some(url)
            }
            None => {
                info!(channel = %channel, "No stream URL found in embed page");
                None
            }
        }
    }
}
