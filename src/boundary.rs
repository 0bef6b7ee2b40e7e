//! JSON shapes exchanged with clients of `POST /rota`.
//!
//! Field names follow the wire format (`enderecos`, `endereco`, `tipo`,
//! `coordenadas`, `rota`, `erro`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::stop::{ResolvedStop, Stop, StopKey, Urgency};

const TAG_FIELD: &str = "tipo";
const COORDINATES_FIELD: &str = "coordenadas";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enderecos: Vec<AddressEntry>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AddressEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AddressEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One requested delivery. Any field besides `endereco` is kept in `extra`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddressEntry {
    pub endereco: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddressEntry {
    pub fn new(endereco: impl Into<String>) -> Self {
        Self {
            endereco: endereco.into(),
            extra: Map::new(),
        }
    }

    pub fn urgent(endereco: impl Into<String>) -> Self {
        Self::new(endereco).with_tag("urgente")
    }

    pub fn with_tag(mut self, tipo: impl Into<String>) -> Self {
        self.extra.insert(TAG_FIELD.to_string(), Value::String(tipo.into()));
        self
    }

    /// Turns the entry into an unresolved [`Stop`] carrying `key`.
    ///
    /// A non-string `tipo` counts as normal. Stale `coordenadas` sent by the
    /// client are discarded; they are always recomputed.
    pub fn into_stop(self, key: StopKey) -> Stop {
        let Self { endereco, mut extra } = self;
        extra.remove(COORDINATES_FIELD);
        let urgency = Urgency::from_tag(extra.get(TAG_FIELD).and_then(Value::as_str));
        Stop::new(key, endereco, urgency).with_extra(extra)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteResponse {
    pub rota: Vec<RouteStop>,
}

/// A routed stop: the client's entry plus resolved `[lat, lng]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteStop {
    pub endereco: String,
    pub coordenadas: (f64, f64),
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<ResolvedStop> for RouteStop {
    fn from(stop: ResolvedStop) -> Self {
        Self {
            endereco: stop.address,
            coordenadas: stop.location.coords(),
            extra: stop.extra,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub erro: String,
}
