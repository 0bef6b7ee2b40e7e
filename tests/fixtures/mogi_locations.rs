//! Approximate Mogi das Cruzes (SP) locations near the default depot.
//!
//! Rounded coordinates; good enough for ordering tests and for routing against
//! the OSRM sudeste extract.

use rota_planner::stop::Location;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn location(&self) -> Location {
        Location::new(self.lat, self.lng)
    }
}

pub const DEPOT_NAME: &str = "Base de Entregas";

pub const CENTRO: &[Place] = &[
    Place::new("Rua Dr. Deodato Wertheimer, 100", -23.5225, -46.1884),
    Place::new("Rua Coronel Souza Franco, 500", -23.5220, -46.1850),
    Place::new("Rua Ipiranga, 1000", -23.5245, -46.1905),
    Place::new("Avenida Voluntário Fernando Pinheiro Franco, 200", -23.5190, -46.1930),
];

pub const BAIRROS: &[Place] = &[
    Place::new("Avenida Francisco Rodrigues Filho, 3000 - Vila Mogilar", -23.5080, -46.1960),
    Place::new("Rua Professor Álvaro Pavan, 50 - Braz Cubas", -23.5380, -46.2130),
    Place::new("Avenida Japão, 400 - Jundiapeba", -23.5500, -46.2550),
    Place::new("Estrada do Beija-Flor, 10 - César de Souza", -23.5060, -46.1520),
];

pub fn all() -> Vec<&'static Place> {
    CENTRO.iter().chain(BAIRROS.iter()).collect()
}
