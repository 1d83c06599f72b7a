//! Synthesis provider abstraction and the HTTP-backed implementation.
//!
//! The session loop only sees the [`Synthesizer`] trait, so tests can swap
//! in a deterministic provider and the remote backend can be replaced
//! without touching the protocol code.

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

/// Provider-specific parameters resolved from a voice id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRoute {
    /// Base language code passed to the provider (e.g. "en")
    pub lang: String,
    /// Top-level domain selecting the regional variant (e.g. "co.uk")
    pub tld: String,
}

/// Maps voice ids to provider parameters.
///
/// The base language is the portion of the id before the first `-`; a
/// region marker anywhere in the id selects the matching regional domain.
/// The marker table is data, not logic: construct with [`RegionTable::new`]
/// to route against a different provider's regions.
#[derive(Debug, Clone)]
pub struct RegionTable {
    markers: Vec<(String, String)>,
    default_tld: String,
}

impl RegionTable {
    pub fn new(markers: Vec<(String, String)>, default_tld: String) -> Self {
        Self {
            markers,
            default_tld,
        }
    }

    /// Resolve a voice id into provider parameters.
    pub fn route(&self, voice_id: &str) -> VoiceRoute {
        let lang = voice_id.split('-').next().unwrap_or(voice_id).to_string();
        let tld = self
            .markers
            .iter()
            .find(|(marker, _)| voice_id.contains(marker.as_str()))
            .map(|(_, tld)| tld.clone())
            .unwrap_or_else(|| self.default_tld.clone());
        VoiceRoute { lang, tld }
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::new(
            vec![
                ("uk".to_string(), "co.uk".to_string()),
                ("au".to_string(), "com.au".to_string()),
                ("in".to_string(), "co.in".to_string()),
            ],
            "com".to_string(),
        )
    }
}

/// External text-to-audio rendering capability.
///
/// `render` returns the complete encoded payload for the utterance; the
/// caller is responsible for chunked delivery.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn render(&self, text: &str, route: &VoiceRoute, rate: &str) -> anyhow::Result<Vec<u8>>;
}

/// Rates at or below this delta switch the provider to its slow-speech mode.
const SLOW_RATE_THRESHOLD: i32 = -50;

/// Synthesizer backed by the Google Translate TTS endpoint.
///
/// Returns MP3 audio. The endpoint only distinguishes normal and slow
/// speech, so the rate string ("+0%", "-50%", ...) is collapsed to that
/// choice; finer-grained control would need a different backend.
pub struct RemoteSynthesizer {
    client: reqwest::Client,
}

impl RemoteSynthesizer {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for RemoteSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for RemoteSynthesizer {
    async fn render(&self, text: &str, route: &VoiceRoute, rate: &str) -> anyhow::Result<Vec<u8>> {
        let url = format!("https://translate.google.{}/translate_tts", route.tld);

        let mut query: Vec<(&str, &str)> = vec![
            ("ie", "UTF-8"),
            ("client", "tw-ob"),
            ("tl", route.lang.as_str()),
            ("q", text),
        ];
        if is_slow_rate(rate) {
            query.push(("ttsspeed", "0.3"));
        }

        debug!(lang = %route.lang, tld = %route.tld, chars = text.len(), "rendering utterance");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("TTS request to {url} failed"))?
            .error_for_status()
            .context("TTS provider returned an error status")?;

        let payload = response
            .bytes()
            .await
            .context("failed to read TTS payload")?;

        Ok(payload.to_vec())
    }
}

/// Parse a "+NN%" / "-NN%" rate delta and decide whether it selects slow speech.
fn is_slow_rate(rate: &str) -> bool {
    rate.trim()
        .trim_end_matches('%')
        .parse::<i32>()
        .map(|delta| delta <= SLOW_RATE_THRESHOLD)
        .unwrap_or(false)
}
