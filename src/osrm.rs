//! OSRM HTTP adapter for pairwise driving distances.

use serde::Deserialize;
use tracing::trace;

use crate::error::DistanceError;
use crate::stop::Location;
use crate::traits::DistanceProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Location, to: Location) -> String {
        // OSRM expects lng,lat order.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.lng,
            from.lat,
            to.lng,
            to.lat
        )
    }
}

impl DistanceProvider for OsrmClient {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        let url = self.route_url(from, to);
        trace!(%url, "querying OSRM route");

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        route_distance(body)
    }
}

fn route_distance(body: OsrmRouteResponse) -> Result<f64, DistanceError> {
    if body.code != "Ok" {
        return Err(DistanceError::Service {
            status: body.code,
            message: body.message.unwrap_or_default(),
        });
    }
    body.routes
        .first()
        .map(|route| route.distance)
        .ok_or(DistanceError::MissingElement)
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
}
