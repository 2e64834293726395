//! Best-effort artwork lookup for the creature the model picked.
//!
//! Nothing here returns an error: every network failure is logged and
//! folded into a negative outcome so the result can still be stored with
//! the placeholder image.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::config::Config;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE is a valid regex pattern"));
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("NON_SLUG_CHARS is a valid regex pattern"));

/// Result of a HEAD probe against an artwork URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found,
    NotFound,
    Errored(String),
}

/// Result of asking the lookup API for a creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Carries the canonical name the API knows the creature by.
    Found(String),
    NotFound,
    Errored(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolution {
    Found { url: String, slug: String },
    NotFound,
}

/// URL-safe slug: lowercase, whitespace runs become `-`, anything outside
/// `[a-z0-9-]` is dropped.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&hyphenated, "").into_owned()
}

/// Key for the lookup API: lowercase with every char outside `[a-z0-9-]`
/// replaced by `-`.
pub fn lookup_key(name: &str) -> String {
    NON_SLUG_CHARS
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
    async fn lookup(&self, key: &str) -> LookupOutcome;
}

#[derive(Debug, Deserialize)]
struct LookupBody {
    name: String,
}

pub struct HttpArtworkSource {
    http: reqwest::Client,
    lookup_base_url: String,
}

impl HttpArtworkSource {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.external_http_timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Falling back to default HTTP client: {}", err);
                reqwest::Client::new()
            });

        Self {
            http,
            lookup_base_url: config.creature_lookup_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.http.head(url).send().await {
            Ok(res) if res.status().is_success() => ProbeOutcome::Found,
            Ok(_) => ProbeOutcome::NotFound,
            Err(err) => ProbeOutcome::Errored(err.to_string()),
        }
    }

    async fn lookup(&self, key: &str) -> LookupOutcome {
        let url = format!("{}/{}", self.lookup_base_url, key);

        let res = match self.http.get(&url).send().await {
            Ok(res) => res,
            Err(err) => return LookupOutcome::Errored(err.to_string()),
        };

        if !res.status().is_success() {
            return LookupOutcome::NotFound;
        }

        match res.json::<LookupBody>().await {
            Ok(body) if !body.name.trim().is_empty() => LookupOutcome::Found(body.name),
            Ok(_) => LookupOutcome::NotFound,
            Err(err) => LookupOutcome::Errored(err.to_string()),
        }
    }
}

pub struct ImageResolver {
    source: Arc<dyn ArtworkSource>,
    artwork_base_url: String,
    placeholder_url: String,
}

impl ImageResolver {
    pub fn new(source: Arc<dyn ArtworkSource>, config: &Config) -> Self {
        Self {
            source,
            artwork_base_url: config.artwork_base_url.trim_end_matches('/').to_string(),
            placeholder_url: config.placeholder_image_url.clone(),
        }
    }

    pub fn artwork_url(&self, slug: &str) -> String {
        format!("{}/{}.jpg", self.artwork_base_url, slug)
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    pub async fn resolve(&self, raw_name: &str) -> ImageResolution {
        let slug = slugify(raw_name);

        if !slug.is_empty() {
            let url = self.artwork_url(&slug);
            match self.source.probe(&url).await {
                ProbeOutcome::Found => return ImageResolution::Found { url, slug },
                ProbeOutcome::NotFound => log::debug!("No artwork at {}", url),
                ProbeOutcome::Errored(reason) => {
                    log::warn!("Artwork probe for {} failed: {}", url, reason)
                }
            }
        }

        let key = lookup_key(raw_name);
        if key.trim_matches('-').is_empty() {
            return ImageResolution::NotFound;
        }

        match self.source.lookup(&key).await {
            LookupOutcome::Found(canonical) => {
                let slug = slugify(&canonical);
                ImageResolution::Found {
                    url: self.artwork_url(&slug),
                    slug,
                }
            }
            LookupOutcome::NotFound => {
                log::info!("Creature lookup found nothing for '{}'", key);
                ImageResolution::NotFound
            }
            LookupOutcome::Errored(reason) => {
                log::warn!("Creature lookup for '{}' failed: {}", key, reason);
                ImageResolution::NotFound
            }
        }
    }
}
