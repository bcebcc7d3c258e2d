use serde::{Deserialize, Serialize};

/// Weather situation code, ordinal from clear (1) to severe (4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherSituation {
    Clear = 1,
    MistCloudy = 2,
    LightSnowRain = 3,
    HeavyRainSnowFog = 4,
}

impl WeatherSituation {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WeatherSituation::Clear),
            2 => Some(WeatherSituation::MistCloudy),
            3 => Some(WeatherSituation::LightSnowRain),
            4 => Some(WeatherSituation::HeavyRainSnowFog),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear/Few clouds",
            WeatherSituation::MistCloudy => "Mist/Cloudy",
            WeatherSituation::LightSnowRain => "Light Snow/Rain",
            WeatherSituation::HeavyRainSnowFog => "Heavy Rain/Snow/Fog",
        }
    }

    /// Description for a raw code, falling back to the code itself
    pub fn describe_code(code: u8) -> String {
        Self::from_code(code)
            .map(|w| w.description().to_string())
            .unwrap_or_else(|| format!("Unknown ({})", code))
    }
}
