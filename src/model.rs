// Entity shapes shared with the ingestion and response layers.
// The ledger stores its own copies of everything; adapters deserialize
// inbound payloads directly into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// A named hotel facility (pool, gym, spa, ...), compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amenity(String);

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        Amenity(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Amenity {
    fn from(name: &str) -> Self {
        Amenity(name.to_string())
    }
}

impl std::fmt::Display for Amenity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Guests are keyed by their national identity number; everything else
// about them is opaque to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub price_per_night: u32,
}

impl Hotel {
    // A freshly opened hotel has every room available.
    pub fn new(name: impl Into<String>, total_rooms: u32, price_per_night: u32) -> Self {
        Self {
            name: name.into(),
            amenities: Vec::new(),
            total_rooms,
            available_rooms: total_rooms,
            price_per_night,
        }
    }

    pub fn with_amenities(mut self, amenities: Vec<Amenity>) -> Self {
        self.amenities = amenities;
        self
    }
}

// Inbound booking shape: everything a stored booking carries except the
// generated id, the computed price and the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub hotel_name: String,
    pub person_id: u64,
    pub rooms: u32,
}

// Stored booking record. Immutable once written, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub person_id: u64,
    pub hotel_name: String,
    pub rooms: u32,
    pub total_price: i64,
    pub booked_at: DateTime<Utc>,
}
