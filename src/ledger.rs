// The reservation ledger: hotel, person and booking registries plus the
// operations the surrounding request layer calls into. All state lives in
// process memory; a restart loses every hotel, person and booking.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Amenity, Booking, BookingRequest, Hotel, Person};

// Reserved sentinel returned by book_room when the hotel cannot cover the
// requested room count. Never a legitimate price.
pub const NO_VACANCY: i64 = -1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("hotel not found: {0}")]
    HotelNotFound(String),

    #[error("person already registered: {0}")]
    DuplicatePerson(u64),
}

// Outcome of hotel registration. Invalid input and duplicate names map to
// the same Failure value; callers branch on it, nothing is thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationOutcome {
    Success,
    Failure,
}

impl RegistrationOutcome {
    pub fn is_success(self) -> bool {
        self == RegistrationOutcome::Success
    }
}

// Monotonic operation counters for the ledger.
#[derive(Debug, Default)]
struct LedgerStats {
    hotels_registered: AtomicUsize,
    registrations_rejected: AtomicUsize,
    persons_registered: AtomicUsize,
    bookings_created: AtomicUsize,
    bookings_rejected: AtomicUsize,
    rooms_booked: AtomicUsize,
    amenities_added: AtomicUsize,
}

// Point-in-time snapshot of the counters above.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStatsReport {
    pub hotels_registered: usize,
    pub registrations_rejected: usize,
    pub persons_registered: usize,
    pub bookings_created: usize,
    pub bookings_rejected: usize,
    pub rooms_booked: usize,
    pub amenities_added: usize,
}

// Appends each incoming amenity not already present in the target, in
// input order. Earlier input entries count as present for later
// duplicates. Returns how many were appended.
fn append_missing(target: &mut Vec<Amenity>, incoming: &[Amenity]) -> usize {
    let mut added = 0;
    for amenity in incoming {
        if !target.contains(amenity) {
            target.push(amenity.clone());
            added += 1;
        }
    }
    added
}

// 128 random bits rendered as 32 hex digits; unique for the lifetime of
// the process.
fn new_booking_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

pub struct ReservationLedger {
    // Ordered by name so the ranking scan has a total order; the write
    // lock covers every check-then-mutate step on a hotel.
    hotels: RwLock<BTreeMap<String, Hotel>>,
    persons: DashMap<u64, Person>,
    bookings: DashMap<String, Booking>,
    stats: LedgerStats,
}

impl Default for ReservationLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self {
            hotels: RwLock::new(BTreeMap::new()),
            persons: DashMap::new(),
            bookings: DashMap::new(),
            stats: LedgerStats::default(),
        }
    }

    // Validate-then-insert. The write lock is held across the existence
    // check and the insert, so two racing registrations of the same name
    // cannot both pass.
    pub fn register_hotel(&self, mut hotel: Hotel) -> RegistrationOutcome {
        if hotel.name.is_empty() || hotel.available_rooms > hotel.total_rooms {
            warn!(hotel = %hotel.name, "rejected hotel registration: invalid input");
            self.stats
                .registrations_rejected
                .fetch_add(1, Ordering::SeqCst);
            return RegistrationOutcome::Failure;
        }

        let mut hotels = self.hotels.write();
        if hotels.contains_key(&hotel.name) {
            warn!(hotel = %hotel.name, "rejected hotel registration: name already taken");
            self.stats
                .registrations_rejected
                .fetch_add(1, Ordering::SeqCst);
            return RegistrationOutcome::Failure;
        }

        // The stored list is a set with first-occurrence order; collapse
        // any duplicates the inbound payload carried.
        let mut amenities = Vec::with_capacity(hotel.amenities.len());
        let added = append_missing(&mut amenities, &hotel.amenities);
        hotel.amenities = amenities;

        debug!(
            hotel = %hotel.name,
            rooms = hotel.total_rooms,
            amenities = added,
            "registered hotel"
        );
        self.stats.hotels_registered.fetch_add(1, Ordering::SeqCst);
        self.stats.amenities_added.fetch_add(added, Ordering::SeqCst);
        hotels.insert(hotel.name.clone(), hotel);
        RegistrationOutcome::Success
    }

    // Registers a person under their identity number and returns the key
    // used. A second registration with the same number is rejected
    // instead of silently replacing the first record.
    pub fn register_person(&self, person: Person) -> Result<u64, LedgerError> {
        let id = person.id;
        match self.persons.entry(id) {
            Entry::Occupied(_) => {
                warn!(person = id, "rejected person registration: id already taken");
                Err(LedgerError::DuplicatePerson(id))
            }
            Entry::Vacant(slot) => {
                slot.insert(person);
                self.stats.persons_registered.fetch_add(1, Ordering::SeqCst);
                debug!(person = id, "registered person");
                Ok(id)
            }
        }
    }

    // Name of the hotel with the largest amenity list. The ascending name
    // scan plus a strict greater-than threshold keeps the
    // lexicographically smallest name among tied hotels; a hotel without
    // a single amenity never wins, so an amenity-free registry yields "".
    pub fn hotel_with_most_amenities(&self) -> String {
        let hotels = self.hotels.read();
        let mut best_name = String::new();
        let mut best_count = 0;
        for (name, hotel) in hotels.iter() {
            if hotel.amenities.len() > best_count {
                best_name = name.clone();
                best_count = hotel.amenities.len();
            }
        }
        best_name
    }

    // Books rooms against a registered hotel. Returns the total price on
    // success and NO_VACANCY when the hotel cannot cover the request. The
    // availability check and the decrement run under one write-lock hold,
    // so concurrent bookings against the same hotel serialize and can
    // never jointly overshoot capacity.
    pub fn book_room(&self, request: &BookingRequest) -> Result<i64, LedgerError> {
        let mut hotels = self.hotels.write();
        let hotel = hotels.get_mut(&request.hotel_name).ok_or_else(|| {
            warn!(hotel = %request.hotel_name, "booking against unregistered hotel");
            LedgerError::HotelNotFound(request.hotel_name.clone())
        })?;

        if request.rooms > hotel.available_rooms {
            debug!(
                hotel = %hotel.name,
                requested = request.rooms,
                available = hotel.available_rooms,
                "booking rejected: not enough rooms"
            );
            self.stats.bookings_rejected.fetch_add(1, Ordering::SeqCst);
            return Ok(NO_VACANCY);
        }

        hotel.available_rooms -= request.rooms;
        let total_price = i64::from(request.rooms) * i64::from(hotel.price_per_night);
        let booking = Booking {
            id: new_booking_id(),
            person_id: request.person_id,
            hotel_name: hotel.name.clone(),
            rooms: request.rooms,
            total_price,
            booked_at: Utc::now(),
        };

        debug!(
            booking = %booking.id,
            hotel = %hotel.name,
            rooms = booking.rooms,
            price = total_price,
            "room booked"
        );
        self.bookings.insert(booking.id.clone(), booking);
        self.stats.bookings_created.fetch_add(1, Ordering::SeqCst);
        self.stats
            .rooms_booked
            .fetch_add(request.rooms as usize, Ordering::SeqCst);
        Ok(total_price)
    }

    // Number of stored bookings owned by the given person. No existence
    // check: an unknown identifier simply counts zero.
    pub fn bookings_for_person(&self, person_id: u64) -> usize {
        self.bookings
            .iter()
            .filter(|entry| entry.value().person_id == person_id)
            .count()
    }

    // Appends the distinct new amenities to the hotel's list, in the
    // order they first appear in the input; existing entries keep their
    // positions. Returns an owned copy of the final list.
    pub fn merge_amenities(
        &self,
        hotel_name: &str,
        new_amenities: &[Amenity],
    ) -> Result<Vec<Amenity>, LedgerError> {
        let mut hotels = self.hotels.write();
        let hotel = hotels.get_mut(hotel_name).ok_or_else(|| {
            warn!(hotel = %hotel_name, "amenity merge against unregistered hotel");
            LedgerError::HotelNotFound(hotel_name.to_string())
        })?;

        let added = append_missing(&mut hotel.amenities, new_amenities);
        self.stats.amenities_added.fetch_add(added, Ordering::SeqCst);
        debug!(
            hotel = %hotel_name,
            added,
            total = hotel.amenities.len(),
            "merged amenities"
        );
        Ok(hotel.amenities.clone())
    }

    // Cloned snapshots for adapters and tests; internal state is never
    // handed out by reference.
    pub fn hotel(&self, name: &str) -> Option<Hotel> {
        self.hotels.read().get(name).cloned()
    }

    pub fn person(&self, id: u64) -> Option<Person> {
        self.persons.get(&id).map(|entry| entry.value().clone())
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.bookings.get(id).map(|entry| entry.value().clone())
    }

    pub fn hotel_count(&self) -> usize {
        self.hotels.read().len()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    pub fn stats(&self) -> LedgerStatsReport {
        LedgerStatsReport {
            hotels_registered: self.stats.hotels_registered.load(Ordering::SeqCst),
            registrations_rejected: self.stats.registrations_rejected.load(Ordering::SeqCst),
            persons_registered: self.stats.persons_registered.load(Ordering::SeqCst),
            bookings_created: self.stats.bookings_created.load(Ordering::SeqCst),
            bookings_rejected: self.stats.bookings_rejected.load(Ordering::SeqCst),
            rooms_booked: self.stats.rooms_booked.load(Ordering::SeqCst),
            amenities_added: self.stats.amenities_added.load(Ordering::SeqCst),
        }
    }
}
