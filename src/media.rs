//! Per-question illustrations.
//!
//! Pictures come from an image-generation-by-URL service. The terminal cannot
//! show them, but the quiz still waits for each one to resolve before it
//! accepts answers so the word and its picture always stay in step.

use async_trait::async_trait;
use url::Url;

use crate::error::MediaError;

pub const ILLUSTRATION_ENDPOINT: &str = "https://image.pollinations.ai/prompt/";
pub const ILLUSTRATION_SIZE: u32 = 500;

/// Build the illustration URL for `word`. Different seeds give different pictures.
pub fn illustration_url(word: &str, seed: u32) -> Result<String, MediaError> {
    let mut url = Url::parse(ILLUSTRATION_ENDPOINT)?;
    let prompt = format!(
        "cute cartoon vector {} animal minimalist white background",
        word.trim()
    );
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&prompt);
    }
    url.query_pairs_mut()
        .append_pair("width", &ILLUSTRATION_SIZE.to_string())
        .append_pair("height", &ILLUSTRATION_SIZE.to_string())
        .append_pair("nologo", "true")
        .append_pair("seed", &seed.to_string());
    Ok(url.into())
}

#[async_trait]
pub trait IllustrationSource: Send + Sync {
    /// Resolve the illustration at `url`. Returns once the whole image has arrived.
    async fn fetch(&self, url: &str) -> Result<(), MediaError>;
}

#[derive(Debug, Default, Clone)]
pub struct HttpIllustrations {
    client: reqwest::Client,
}

impl HttpIllustrations {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IllustrationSource for HttpIllustrations {
    async fn fetch(&self, url: &str) -> Result<(), MediaError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(MediaError::HttpStatus(response.status()));
        }
        response.bytes().await?;
        Ok(())
    }
}

/// Illustration source that resolves (or fails) immediately, for tests.
#[cfg(test)]
pub struct StaticIllustrations {
    pub fail: bool,
}

#[cfg(test)]
#[async_trait]
impl IllustrationSource for StaticIllustrations {
    async fn fetch(&self, _url: &str) -> Result<(), MediaError> {
        if self.fail {
            Err(MediaError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY))
        } else {
            Ok(())
        }
    }
}
