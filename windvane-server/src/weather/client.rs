use super::model::{WeatherEnvelope, WindReading};
use crate::core::error::{Result, WindvaneError};
use reqwest::Client;
use tracing::debug;

/// OpenWeatherMap current-weather endpoint
pub const DEFAULT_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Typed client for the upstream weather API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the current wind for a US zip code from the upstream API
    pub async fn current_wind(&self, zip_code: &str) -> Result<WindReading> {
        debug!("Fetching upstream wind for {}", zip_code);

        let zip = format!("{},us", zip_code);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("zip", zip.as_str()), ("APPID", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WindvaneError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WindvaneError::UpstreamStatus(status.as_u16()));
        }

        let envelope: WeatherEnvelope = response
            .json()
            .await
            .map_err(|e| WindvaneError::Upstream(e.to_string()))?;

        envelope
            .into_reading()
            .ok_or_else(|| WindvaneError::NoData(zip_code.to_string()))
    }
}

/// Validate a US zip code: five digits with an optional "-NNNN" extension
pub fn validate_zip_code(zip_code: &str) -> Result<()> {
    let bytes = zip_code.as_bytes();
    let valid = match bytes.len() {
        5 => bytes.iter().all(|b| b.is_ascii_digit()),
        10 => {
            bytes[..5].iter().all(|b| b.is_ascii_digit())
                && bytes[5] == b'-'
                && bytes[6..].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(WindvaneError::InvalidZipCode(zip_code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_five_digit_zip() {
        assert!(validate_zip_code("08831").is_ok());
        assert!(validate_zip_code("00000").is_ok());
    }

    #[test]
    fn accepts_zip_plus_four() {
        assert!(validate_zip_code("08831-1234").is_ok());
    }

    #[test]
    fn rejects_malformed_zips() {
        for zip in ["", "1234", "123456", "0883a", "08831-12", "08831 1234", "088311234", "-8831"] {
            assert!(
                matches!(validate_zip_code(zip), Err(WindvaneError::InvalidZipCode(_))),
                "expected rejection for {:?}",
                zip
            );
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_maps_to_upstream_error() {
        // Port 1 is never listening
        let client = WeatherClient::new("http://127.0.0.1:1/weather", "test-key");
        let err = client.current_wind("08831").await.unwrap_err();
        assert!(matches!(err, WindvaneError::Upstream(_)));
    }
}
