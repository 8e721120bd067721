use serde::{Deserialize, Serialize};

/// Current wind conditions for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    /// Wind speed in meters per second
    pub speed: f64,
    /// Wind direction in meteorological degrees
    pub deg: f64,
}

/// The slice of the OpenWeatherMap current-weather envelope we consume.
/// `deg` is omitted upstream when the wind is calm; it defaults to 0.
#[derive(Debug, Deserialize)]
pub struct WeatherEnvelope {
    wind: Option<WindSection>,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

impl WeatherEnvelope {
    /// Extract the wind reading, if the envelope carried one
    pub fn into_reading(self) -> Option<WindReading> {
        self.wind.map(|wind| WindReading {
            speed: wind.speed,
            deg: wind.deg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_wind_section() {
        let json = r#"{"coord":{"lon":-74.42,"lat":40.26},"wind":{"speed":5.1,"deg":330},"name":"Monroe"}"#;
        let envelope: WeatherEnvelope = serde_json::from_str(json).unwrap();
        let reading = envelope.into_reading().unwrap();

        assert_eq!(reading, WindReading { speed: 5.1, deg: 330.0 });
    }

    #[test]
    fn missing_deg_defaults_to_zero() {
        let json = r#"{"wind":{"speed":1.2}}"#;
        let envelope: WeatherEnvelope = serde_json::from_str(json).unwrap();
        let reading = envelope.into_reading().unwrap();

        assert_eq!(reading.deg, 0.0);
        assert_eq!(reading.speed, 1.2);
    }

    #[test]
    fn missing_wind_section_yields_none() {
        let json = r#"{"coord":{"lon":-74.42,"lat":40.26}}"#;
        let envelope: WeatherEnvelope = serde_json::from_str(json).unwrap();

        assert!(envelope.into_reading().is_none());
    }
}
