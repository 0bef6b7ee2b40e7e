//! Server configuration: optional TOML file, `.env`, environment overrides.

use std::{
    env, fs,
    io::ErrorKind,
    net::IpAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;
use tracing::info;

use crate::google::{GoogleMapsClient, GoogleMapsConfig};
use crate::haversine::HaversineDistance;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::planner::{Planner, PlannerOptions, SharedDistance, SharedGeocoder};
use crate::solver::{ScanMode, SequenceOptions};
use crate::stop::Location;

mod raw;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "rota.toml";

const ENV_NAME_GOOGLE_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
const ENV_NAME_PORT: &str = "ROTA_PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub depot: Depot,
    pub geocoding: GeocodingGateway,
    pub distance: Distance,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Depot {
    pub label: String,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub enum GeocodingGateway {
    Google(GoogleMapsConfig),
}

#[derive(Debug, Clone)]
pub struct Distance {
    pub gateway: DistanceGateway,
    pub memoize: bool,
    pub scan: ScanMode,
}

#[derive(Debug, Clone)]
pub enum DistanceGateway {
    Google(GoogleMapsConfig),
    Osrm(OsrmConfig),
    Haversine,
}

impl Config {
    /// Loads `file_path` (or `rota.toml`), falling back to defaults when the
    /// file doesn't exist, then applies environment overrides.
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self, ConfigError> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("{} not found => load default configuration.", file_path.display());
                raw::Config::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: file_path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_raw(raw_config, |name| env::var(name).ok())
    }

    fn from_raw<F>(mut raw: raw::Config, env_var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = env_var(ENV_NAME_GOOGLE_API_KEY) {
            raw.google.api_key = Some(key);
        }
        if let Some(port) = env_var(ENV_NAME_PORT) {
            raw.server.port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid(format!("{ENV_NAME_PORT} is not a port: {port}")))?;
        }
        Self::try_from(raw)
    }

    /// Builds the planner with the configured collaborators.
    pub fn build_planner(&self) -> Result<Planner, ConfigError> {
        let geocoder: SharedGeocoder = match &self.geocoding {
            GeocodingGateway::Google(config) => Arc::new(GoogleMapsClient::new(config.clone())?),
        };
        let distance: SharedDistance = match &self.distance.gateway {
            DistanceGateway::Google(config) => Arc::new(GoogleMapsClient::new(config.clone())?),
            DistanceGateway::Osrm(config) => Arc::new(OsrmClient::new(config.clone())?),
            DistanceGateway::Haversine => Arc::new(HaversineDistance::default()),
        };
        let options = PlannerOptions {
            depot: self.depot.location,
            memoize: self.distance.memoize,
            sequence: SequenceOptions {
                scan: self.distance.scan,
            },
        };
        Ok(Planner::new(geocoder, distance, options))
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = ConfigError;

    fn try_from(from: raw::Config) -> Result<Self, ConfigError> {
        let raw::Config {
            server,
            depot,
            geocoding,
            distance,
            google,
            osrm,
        } = from;

        let address = server
            .address
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::Invalid(format!("invalid server address: {}", server.address)))?;

        if !(-90.0..=90.0).contains(&depot.lat) || !(-180.0..=180.0).contains(&depot.lng) {
            return Err(ConfigError::Invalid(format!(
                "depot coordinates out of range: ({}, {})",
                depot.lat, depot.lng
            )));
        }

        let google_config = |locality_suffix: Option<String>| -> Result<GoogleMapsConfig, ConfigError> {
            let api_key = google.api_key.clone().filter(|key| !key.is_empty()).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "a Google Maps API key is required (set {ENV_NAME_GOOGLE_API_KEY})"
                ))
            })?;
            let mut config = GoogleMapsConfig::new(api_key);
            config.base_url = google.base_url.clone();
            config.timeout_secs = google.timeout_secs;
            config.locality_suffix = locality_suffix;
            Ok(config)
        };

        let geocoding = match geocoding.provider {
            raw::GeocodingProvider::Google => {
                GeocodingGateway::Google(google_config(geocoding.locality_suffix)?)
            }
        };

        let gateway = match distance.provider {
            raw::DistanceProvider::Google => DistanceGateway::Google(google_config(None)?),
            raw::DistanceProvider::Osrm => DistanceGateway::Osrm(OsrmConfig {
                base_url: osrm.base_url,
                profile: osrm.profile,
                timeout_secs: osrm.timeout_secs,
            }),
            raw::DistanceProvider::Haversine => DistanceGateway::Haversine,
        };

        Ok(Self {
            server: Server {
                address,
                port: server.port,
            },
            depot: Depot {
                label: depot.label,
                location: Location::new(depot.lat, depot.lng),
            },
            geocoding,
            distance: Distance {
                gateway,
                memoize: distance.memoize,
                scan: if distance.parallel_scan {
                    ScanMode::Parallel
                } else {
                    ScanMode::Sequential
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::DEPOT;

    fn load(toml: &str, key: Option<&str>) -> Result<Config, ConfigError> {
        let raw = toml::from_str(toml)?;
        Config::from_raw(raw, |name| match name {
            ENV_NAME_GOOGLE_API_KEY => key.map(str::to_string),
            _ => None,
        })
    }

    #[test]
    fn test_defaults_need_an_api_key() {
        assert!(matches!(load("", None), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_defaults_with_api_key() {
        let cfg = load("", Some("secret")).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.depot.location, DEPOT);
        assert!(cfg.distance.memoize);
        assert_eq!(cfg.distance.scan, ScanMode::Sequential);
        match cfg.geocoding {
            GeocodingGateway::Google(google) => {
                assert_eq!(google.api_key, "secret");
                assert_eq!(google.locality_suffix.as_deref(), Some("Mogi das Cruzes - SP"));
            }
        }
        assert!(matches!(cfg.distance.gateway, DistanceGateway::Google(_)));
    }

    #[test]
    fn test_osrm_distance_and_custom_depot() {
        let cfg = load(
            r#"
            [server]
            port = 8080

            [depot]
            label = "CD Centro"
            lat = -23.55
            lng = -46.63

            [distance]
            provider = "osrm"
            parallel-scan = true
            memoize = false

            [osrm]
            base-url = "http://osrm:5000"
            "#,
            Some("secret"),
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.depot.label, "CD Centro");
        assert_eq!(cfg.depot.location, Location::new(-23.55, -46.63));
        assert_eq!(cfg.distance.scan, ScanMode::Parallel);
        assert!(!cfg.distance.memoize);
        match cfg.distance.gateway {
            DistanceGateway::Osrm(osrm) => {
                assert_eq!(osrm.base_url, "http://osrm:5000");
                assert_eq!(osrm.profile, "driving");
            }
            other => panic!("unexpected gateway {:?}", other),
        }
    }

    #[test]
    fn test_depot_out_of_range_is_rejected() {
        let result = load("[depot]\nlat = -123.0\nlng = 0.0\n", Some("secret"));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_provider_is_a_parse_error() {
        let result = load("[distance]\nprovider = \"teleport\"\n", Some("secret"));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_haversine_planner_builds() {
        let cfg = load("[distance]\nprovider = \"haversine\"\n", Some("secret")).unwrap();
        assert!(cfg.build_planner().is_ok());
    }
}
