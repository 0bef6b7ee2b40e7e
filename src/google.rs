//! Google Maps web-service adapter: geocoding and driving distances.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::DistanceError;
use crate::stop::Location;
use crate::traits::{DistanceProvider, Geocoder, TravelMode};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Appended to every address to bias matches towards the service area.
pub const DEFAULT_LOCALITY_SUFFIX: &str = "Mogi das Cruzes - SP";

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    pub base_url: String,
    pub locality_suffix: Option<String>,
    pub mode: TravelMode,
    pub timeout_secs: u64,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            locality_suffix: Some(DEFAULT_LOCALITY_SUFFIX.to_string()),
            mode: TravelMode::Driving,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, service: &str) -> String {
        format!("{}/{}/json", self.config.base_url.trim_end_matches('/'), service)
    }

    fn query_string(&self, address: &str) -> String {
        match &self.config.locality_suffix {
            Some(suffix) if !suffix.is_empty() => format!("{address}, {suffix}"),
            _ => address.to_string(),
        }
    }

    fn try_geocode(&self, query: &str) -> Result<Option<Location>, reqwest::Error> {
        let body = self
            .client
            .get(self.endpoint("geocode"))
            .query(&[("address", query), ("key", self.config.api_key.as_str())])
            .send()?
            .error_for_status()?
            .json::<GeocodeResponse>()?;

        Ok(first_location(body))
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Option<Location> {
        let query = self.query_string(address);
        match self.try_geocode(&query) {
            Ok(Some(location)) => {
                debug!("Resolved address location '{}': {:?}", query, location);
                Some(location)
            }
            Ok(None) => {
                debug!("No geocoding result for '{}'", query);
                None
            }
            Err(err) => {
                warn!("Failed to resolve address location '{}': {}", query, err);
                None
            }
        }
    }
}

impl DistanceProvider for GoogleMapsClient {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        let origins = format!("{},{}", from.lat, from.lng);
        let destinations = format!("{},{}", to.lat, to.lng);

        let body = self
            .client
            .get(self.endpoint("distancematrix"))
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", self.config.mode.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json::<DistanceMatrixResponse>()?;

        matrix_distance(body)
    }
}

fn first_location(body: GeocodeResponse) -> Option<Location> {
    if body.status != "OK" {
        if body.status != "ZERO_RESULTS" {
            warn!(
                "Geocoding service answered {}: {}",
                body.status,
                body.error_message.unwrap_or_default()
            );
        }
        return None;
    }
    body.results
        .into_iter()
        .next()
        .map(|result| Location::new(result.geometry.location.lat, result.geometry.location.lng))
}

fn matrix_distance(body: DistanceMatrixResponse) -> Result<f64, DistanceError> {
    if body.status != "OK" {
        return Err(DistanceError::Service {
            status: body.status,
            message: body.error_message.unwrap_or_default(),
        });
    }

    let element = body
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or(DistanceError::MissingElement)?;

    if element.status != "OK" {
        return Err(DistanceError::Service {
            status: element.status,
            message: "no route between origin and destination".to_string(),
        });
    }

    element
        .distance
        .map(|distance| distance.value)
        .ok_or(DistanceError::MissingElement)
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    /// Meters.
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(suffix: Option<&str>) -> GoogleMapsClient {
        let mut config = GoogleMapsConfig::new("test-key");
        config.locality_suffix = suffix.map(str::to_string);
        GoogleMapsClient::new(config).unwrap()
    }

    #[test]
    fn test_query_appends_locality() {
        assert_eq!(
            client(Some("Mogi das Cruzes - SP")).query_string("Rua X, 10"),
            "Rua X, 10, Mogi das Cruzes - SP"
        );
        assert_eq!(client(None).query_string("Rua X, 10"), "Rua X, 10");
        assert_eq!(client(Some("")).query_string("Rua X"), "Rua X");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client(None).endpoint("geocode"),
            "https://maps.googleapis.com/maps/api/geocode/json"
        );
    }

    #[test]
    fn test_first_geocode_result_wins() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{"status":"OK","results":[
                {"geometry":{"location":{"lat":-23.52,"lng":-46.18}}},
                {"geometry":{"location":{"lat":1.0,"lng":2.0}}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(first_location(body), Some(Location::new(-23.52, -46.18)));
    }

    #[test]
    fn test_zero_results_is_unresolved() {
        let body: GeocodeResponse =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS","results":[]}"#).unwrap();
        assert_eq!(first_location(body), None);
    }

    #[test]
    fn test_matrix_distance_value() {
        let body: DistanceMatrixResponse = serde_json::from_str(
            r#"{"status":"OK","rows":[{"elements":[
                {"status":"OK","distance":{"text":"3,2 km","value":3194},"duration":{"text":"8 min","value":480}}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(matrix_distance(body).unwrap(), 3194.0);
    }

    #[test]
    fn test_matrix_request_denied() {
        let body: DistanceMatrixResponse = serde_json::from_str(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid.","rows":[]}"#,
        )
        .unwrap();
        match matrix_distance(body) {
            Err(DistanceError::Service { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_matrix_element_not_found() {
        let body: DistanceMatrixResponse = serde_json::from_str(
            r#"{"status":"OK","rows":[{"elements":[{"status":"ZERO_RESULTS"}]}]}"#,
        )
        .unwrap();
        assert!(matches!(matrix_distance(body), Err(DistanceError::Service { .. })));
    }
}
