// Main library file for the hotel reservation ledger

// Export the core modules
pub mod ledger;
pub mod model;

// Re-export key types for convenience
pub use ledger::{
    LedgerError, LedgerStatsReport, RegistrationOutcome, ReservationLedger, NO_VACANCY,
};
pub use model::{Amenity, Booking, BookingRequest, Hotel, Person};
