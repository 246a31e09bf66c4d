use crate::config::ServiceConfig;
use crate::constants::{SHRINK_PATH, UPLOAD_USER_AGENT};
use crate::error::{Result, SlimError};
use crate::utils::random_ip;
use rand::seq::SliceRandom;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;

/// Result descriptor returned by the shrink endpoint on success.
#[derive(Debug, Clone, Deserialize)]
pub struct ShrinkOutput {
    pub url: String,
    pub size: u64,
    pub ratio: f64,
}

/// Wire shape of a shrink response. Exactly one of `output` (success) or
/// `error`/`message` (rejection) is populated.
#[derive(Debug, Deserialize)]
pub struct ShrinkResponse {
    pub output: Option<ShrinkOutput>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ShrinkResponse {
    /// Collapse the payload into the worker's view: an error payload becomes
    /// `UpstreamRejected`, a success payload without a result URL is invalid.
    pub fn into_output(self, path: &str) -> Result<ShrinkOutput> {
        if let Some(error) = self.error {
            return Err(SlimError::UpstreamRejected {
                path: path.to_string(),
                message: self.message.unwrap_or(error),
            });
        }
        self.output
            .filter(|output| !output.url.is_empty())
            .ok_or_else(|| SlimError::MissingOutput(path.to_string()))
    }
}

/// HTTP client for the remote compression service.
pub struct ShrinkClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl ShrinkClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.ensure_keys()?;
        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    /// Upload raw image bytes and return the service's result descriptor.
    ///
    /// The target host and API key are drawn at random per request, and the
    /// request carries a randomized `X-Forwarded-For` origin address.
    pub async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<ShrinkOutput> {
        let (host, key) = {
            let mut rng = rand::thread_rng();
            let host = self
                .config
                .hosts
                .choose(&mut rng)
                .expect("host pool is never empty")
                .clone();
            let key = self
                .config
                .api_keys()
                .choose(&mut rng)
                .expect("checked non-empty at construction")
                .clone();
            (host, key)
        };

        let response = self
            .http
            .post(format!("https://{host}{SHRINK_PATH}"))
            .basic_auth("api", Some(key))
            .header(CACHE_CONTROL, "no-cache")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(USER_AGENT, UPLOAD_USER_AGENT)
            .header("X-Forwarded-For", random_ip())
            .body(bytes)
            .send()
            .await?;

        response.json::<ShrinkResponse>().await?.into_output(path)
    }

    /// Fetch the compressed bytes from the result URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[test]
    fn test_parse_success_payload() {
        let raw = r#"{
            "input": {"size": 207565, "type": "image/png"},
            "output": {"size": 63669, "type": "image/png", "ratio": 0.3067,
                       "url": "https://api.tinify.com/output/abc123"}
        }"#;
        let response: ShrinkResponse = serde_json::from_str(raw).unwrap();
        let output = response.into_output("src/logo.png").unwrap();
        assert_eq!(output.size, 63669);
        assert_eq!(output.ratio, 0.3067);
        assert_eq!(output.url, "https://api.tinify.com/output/abc123");
    }

    #[test]
    fn test_parse_error_payload() {
        let raw = r#"{"error": "TooManyRequests",
                      "message": "Your monthly limit has been exceeded"}"#;
        let response: ShrinkResponse = serde_json::from_str(raw).unwrap();
        let result = response.into_output("src/logo.png");
        match result {
            Err(SlimError::UpstreamRejected { path, message }) => {
                assert_eq!(path, "src/logo.png");
                assert_eq!(message, "Your monthly limit has been exceeded");
            }
            other => panic!("expected UpstreamRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_url_is_invalid() {
        let raw = r#"{"output": {"size": 100, "ratio": 0.5, "url": ""}}"#;
        let response: ShrinkResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            response.into_output("a.png"),
            Err(SlimError::MissingOutput(_))
        ));
    }

    #[test]
    fn test_client_requires_keys() {
        let config = ServiceConfig::with_keys(vec!["tinypng.com".into()], vec![]);
        assert!(matches!(
            ShrinkClient::new(config),
            Err(SlimError::NoApiKeys)
        ));
    }
}
