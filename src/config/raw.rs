use serde::Deserialize;

use crate::google::{DEFAULT_BASE_URL, DEFAULT_LOCALITY_SUFFIX};
use crate::stop::DEPOT;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub depot: Depot,
    #[serde(default)]
    pub geocoding: Geocoding,
    #[serde(default)]
    pub distance: Distance,
    #[serde(default)]
    pub google: Google,
    #[serde(default)]
    pub osrm: Osrm,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Depot {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl Default for Depot {
    fn default() -> Self {
        Self {
            label: "Base de Entregas".to_string(),
            lat: DEPOT.lat,
            lng: DEPOT.lng,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingProvider {
    #[default]
    Google,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Geocoding {
    pub provider: GeocodingProvider,
    pub locality_suffix: Option<String>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Self {
            provider: GeocodingProvider::Google,
            locality_suffix: Some(DEFAULT_LOCALITY_SUFFIX.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceProvider {
    #[default]
    Google,
    Osrm,
    Haversine,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Distance {
    pub provider: DistanceProvider,
    pub memoize: bool,
    pub parallel_scan: bool,
}

impl Default for Distance {
    fn default() -> Self {
        Self {
            provider: DistanceProvider::Google,
            memoize: true,
            parallel_scan: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Google {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Google {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Osrm {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for Osrm {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}
