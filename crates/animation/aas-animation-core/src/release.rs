//! Plugin release records as delivered by the release feed.
//!
//! Fetching is the host's business; this module only models the payload (the
//! GitHub releases API shape) and turns failures into an empty list plus an
//! error message so the download page can still render.

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    /// RFC 3339 timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    /// Display title: the release name, or the tag when the name is blank.
    pub fn title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.tag_name,
        }
    }

    /// First asset whose file name ends with `suffix` (e.g. ".jar").
    pub fn find_asset(&self, suffix: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name.ends_with(suffix))
    }
}

/// Result of loading the feed. `error` is set when the payload was unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFeed {
    pub releases: Vec<Release>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedPayload {
    Releases(Vec<Release>),
    Failure {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ReleaseFeed {
    /// Parse a feed body. Never fails: an error object from the proxy or an
    /// unparseable body becomes an empty feed with `error` set.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<FeedPayload>(text) {
            Ok(FeedPayload::Releases(releases)) => Self {
                releases,
                error: None,
            },
            Ok(FeedPayload::Failure { error, message }) => {
                let reason = match (error, message) {
                    (Some(e), Some(m)) => format!("{e}: {m}"),
                    (Some(e), None) => e,
                    (None, Some(m)) => m,
                    (None, None) => "release feed returned an unexpected object".to_string(),
                };
                warn!("release feed failed: {reason}");
                Self::failed(reason)
            }
            Err(e) => {
                warn!("release feed could not be parsed: {e}");
                Self::failed(e.to_string())
            }
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            releases: Vec::new(),
            error: Some(reason.into()),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Most recently published release. Unpublished entries rank last.
    pub fn latest(&self) -> Option<&Release> {
        self.releases
            .iter()
            .max_by(|a, b| a.published_at.cmp(&b.published_at))
    }

    /// Releases ordered newest first; ties keep feed order.
    pub fn sorted_newest_first(&self) -> Vec<&Release> {
        let mut out: Vec<&Release> = self.releases.iter().collect();
        out.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        out
    }
}
