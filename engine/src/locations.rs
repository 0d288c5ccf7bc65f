//! Named places which can be picked as start or destination of a route.
//!
//! A few cities come with built-in tables; further tables can be read from CSV files
//! (see `import::load_locations_csv`) or extended with `LocationTable::add_location`.

pub use crate::datastr::road_network::Coordinate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;

/// Axis aligned latitude/longitude box, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat) && (self.min_lng..=self.max_lng).contains(&c.lng)
    }
}

/// Core Chandigarh city area
pub const CHANDIGARH_BOUNDS: Bounds = Bounds {
    min_lat: 30.5,
    max_lat: 31.0,
    min_lng: 76.5,
    max_lng: 77.0,
};

const CHANDIGARH: &[(&str, f64, f64)] = &[
    // Educational Institutions
    ("Punjab University", 30.7600, 76.7689),
    ("Panjab University SSC", 30.7565, 76.7686),
    // Shopping & Entertainment
    ("Elante Mall", 30.7057, 76.8011),
    ("Sector 17 Plaza", 30.7411, 76.7807),
    // Tourist Attractions
    ("Rock Garden", 30.7520, 76.7394),
    ("Sukhna Lake", 30.7421, 76.8188),
    ("Rose Garden", 30.7479, 76.7580),
    ("Leisure Valley", 30.7338, 76.7805),
    // Healthcare
    ("PGI Hospital", 30.7664, 76.7757),
    // Transportation
    ("ISBT Chandigarh", 30.7119, 76.8025),
    // Government & Admin
    ("Secretariat Chandigarh", 30.7625, 76.7738),
    ("Capitol Complex", 30.7594, 76.8083),
    // Other Sectors
    ("Sector 35 Market", 30.7277, 76.7684),
    ("Sector 22 Market", 30.7320, 76.7720),
];

const LUDHIANA: &[(&str, f64, f64)] = &[
    ("Ludhiana Railway Station", 30.9049, 75.8507),
    ("Punjab Agricultural University", 30.9010, 75.8573),
    ("MBD Mall", 30.9003, 75.8632),
    ("Maharaja Ranjit Singh Punjab Technical University", 30.8093, 75.8519),
];

const AMRITSAR: &[(&str, f64, f64)] = &[
    ("Golden Temple", 31.6200, 74.8765),
    ("Jallianwala Bagh", 31.6210, 74.8795),
    ("Amritsar Railway Station", 31.6346, 74.8739),
    ("Wagah Border", 31.6045, 74.5731),
];

const CITIES: &[(&str, &[(&str, f64, f64)], Option<Bounds>)] = &[
    ("chandigarh", CHANDIGARH, Some(CHANDIGARH_BOUNDS)),
    ("ludhiana", LUDHIANA, None),
    ("amritsar", AMRITSAR, None),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("City '{city}' not found. Available cities: {}", available.join(", "))]
    UnknownCity { city: String, available: Vec<String> },
}

/// Names of the cities with built-in location tables.
pub fn available_cities() -> Vec<String> {
    CITIES.iter().map(|(name, _, _)| name.to_string()).collect()
}

/// The built-in location table of a city, case insensitive.
pub fn locations_for_city(city: &str) -> Result<LocationTable, LocationError> {
    let key = city.to_lowercase();
    let (name, locations, bounds) = CITIES
        .iter()
        .find(|(name, _, _)| *name == key)
        .ok_or_else(|| LocationError::UnknownCity {
            city: city.to_string(),
            available: available_cities(),
        })?;

    let mut table = LocationTable::new(name.to_string(), *bounds);
    for &(location, lat, lng) in locations.iter() {
        table.add_location(location.to_string(), Coordinate::new(lat, lng));
    }
    Ok(table)
}

/// Named places of one city, ordered by name.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationTable {
    city: String,
    locations: BTreeMap<String, Coordinate>,
    bounds: Option<Bounds>,
}

impl LocationTable {
    pub fn new(city: String, bounds: Option<Bounds>) -> LocationTable {
        LocationTable {
            city,
            locations: BTreeMap::new(),
            bounds,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Insert a place or move an existing one, returning the previous position.
    pub fn add_location(&mut self, name: String, coordinate: Coordinate) -> Option<Coordinate> {
        self.locations.insert(name, coordinate)
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.locations.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> {
        self.locations.iter().map(|(name, &c)| (name.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether the position lies within the city. Tables without bounds accept every valid position.
    pub fn validate_coordinates(&self, coordinate: &Coordinate) -> bool {
        coordinate.is_valid() && self.bounds.map_or(true, |bounds| bounds.contains(coordinate))
    }

    /// Add all places of `other` which lie within this city.
    /// Returns the names of the rejected places.
    pub fn merge(&mut self, other: LocationTable) -> Vec<String> {
        let mut rejected = Vec::new();
        for (name, coordinate) in other.locations {
            if self.validate_coordinates(&coordinate) {
                self.locations.insert(name, coordinate);
            } else {
                rejected.push(name);
            }
        }
        rejected
    }

    /// Human readable listing of all places.
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "{:<50} {:<12} {:<12}", "Location Name", "Latitude", "Longitude");
        let _ = writeln!(out, "{}", "-".repeat(74));
        for (name, c) in self.iter() {
            let _ = writeln!(out, "{:<50} {:<12.4} {:<12.4}", name, c.lat, c.lng);
        }
        let _ = writeln!(out, "\nTotal locations: {}", self.len());
        out
    }
}
