mod booking;
mod payment;

pub(crate) use booking::BookingDraft;
pub(crate) use payment::{PaymentContext, PaymentDraft};

/// Client-side checks that run before anything is sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum DraftError {
    #[error("Please login first")]
    NotLoggedIn,
    #[error("Please open a PG first")]
    NoListing,
    #[error("Please select a room")]
    NoRoom,
    #[error("Bed count must be at least 1")]
    BedCount,
    #[error("Start date is required")]
    MissingStartDate,
    #[error("End date is required for fixed bookings")]
    MissingEndDate,
    #[error("customerUpi required")]
    MissingUpi,
    #[error("bookingId invalid")]
    InvalidBookingId,
    #[error("Please select screenshot file")]
    NoScreenshot,
}
