//! Detection service configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use reqwest::Url;

/// Endpoint used when none is configured: a Metamorph server on localhost.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict/";

/// Query parameter carrying the minimum detection probability.
pub const MIN_PROBABILITY_PARAM: &str = "minimum_probability";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("minimum probability must be strictly between 0 and 1, got {0}")]
    InvalidMinProbability(f64),
}

/// Where and how to call the detection service.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectConfig {
    pub endpoint: Url,
    /// Detections below this probability are dropped by the service. The
    /// service default applies when absent.
    pub min_probability: Option<f64>,
}

impl DetectConfig {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint is not an absolute `http`/`https` URL or the
    /// minimum probability is outside `(0, 1)`.
    pub fn new(endpoint: &str, min_probability: Option<f64>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint { url: endpoint.to_owned(), reason };
        let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if let Some(p) = min_probability {
            if !(p > 0.0 && p < 1.0) {
                return Err(ConfigError::InvalidMinProbability(p));
            }
        }
        Ok(Self { endpoint: url, min_probability })
    }

    /// Full request URL, including the probability query parameter if set.
    #[must_use]
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(p) = self.min_probability {
            url.query_pairs_mut()
                .append_pair(MIN_PROBABILITY_PARAM, &p.to_string());
        }
        url
    }
}
