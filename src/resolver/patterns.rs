//! Text-to-URL matching for embed player pages
//!
//! Player pages hide the stream URL inside an obfuscated function that
//! returns the URL split into a string array. The page text is normalized
//! first, then a chain of patterns is tried in a fixed order.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Any http(s) URL mentioning `.m3u8`, bounded by quotes or whitespace
static M3U8_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"']+\.m3u8[^\s"']*"#).unwrap());

/// Undo the player page obfuscation.
///
/// Order matters: array separators are dropped first so the split URL
/// fragments join up, then escaped slashes are restored, then the doubled
/// slashes this leaves behind are folded.
pub fn normalize_embed_text(raw: &str) -> String {
    raw.replace("\",\"", "")
        .replace("\\/", "/")
        .replace("////", "//")
}

/// One way of locating a playable URL in normalized page text
pub trait StreamPattern: Send + Sync {
    fn name(&self) -> &'static str;

    fn find(&self, text: &str) -> Option<String>;
}

/// First quoted string in the return-array literal of a named function
pub struct PlayerFunctionPattern {
    regex: Regex,
}

impl PlayerFunctionPattern {
    pub fn new(function_name: &str) -> AppResult<Self> {
        let pattern = format!(
            r#"function\s+{}\s*\(\)\s*\{{[^}}]*return\s*\(\s*\["([^"]+)"\]"#,
            regex::escape(function_name)
        );
        let regex = Regex::new(&pattern).map_err(|e| {
            AppError::configuration(format!("invalid player function pattern: {e}"))
        })?;
        Ok(Self { regex })
    }
}

impl StreamPattern for PlayerFunctionPattern {
    fn name(&self) -> &'static str {
        "player_function"
    }

    fn find(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// First `http(s)://…m3u8…` substring anywhere in the text
pub struct M3u8UrlPattern;

impl StreamPattern for M3u8UrlPattern {
    fn name(&self) -> &'static str {
        "m3u8_url"
    }

    fn find(&self, text: &str) -> Option<String> {
        M3U8_URL_REGEX.find(text).map(|m| m.as_str().to_string())
    }
}

/// Patterns tried in order; the first hit wins
pub struct PatternChain {
    patterns: Vec<Box<dyn StreamPattern>>,
}

impl PatternChain {
    pub fn new(patterns: Vec<Box<dyn StreamPattern>>) -> Self {
        Self { patterns }
    }

    /// Player function first, bare m3u8 URL as the fallback
    pub fn player_page(function_name: &str) -> AppResult<Self> {
        Ok(Self::new(vec![
            Box::new(PlayerFunctionPattern::new(function_name)?),
            Box::new(M3u8UrlPattern),
        ]))
    }

    pub fn find(&self, text: &str) -> Option<String> {
        for pattern in &self.patterns {
            if let Some(url) = pattern.find(text) {
                debug!(pattern = pattern.name(), url = %url, "Pattern matched");
                return Some(url);
            }
            debug!(pattern = pattern.name(), "Pattern did not match");
        }
        None
    }

    /// Normalize raw page text and run the chain over it
    pub fn extract(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }
        self.find(&normalize_embed_text(raw))
    }
}
