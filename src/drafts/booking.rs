use super::DraftError;
use crate::api::CreateBookingRequest;
use crate::models::BookingType;
use crate::util::add_days;

/// Days between the default start and end date of a fixed booking.
const DEFAULT_STAY_DAYS: i64 = 7;

/// Booking form as the customer is filling it in.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BookingDraft {
    pub booking_type: BookingType,
    /// Raw text of the beds input.
    pub beds: String,
    pub start_date: String,
    pub end_date: String,
    pub room_id: Option<i64>,
    pub customer_upi: String,
}

impl BookingDraft {
    /// A fresh one-bed, one-week fixed booking starting `today`.
    pub fn starting(today: &str) -> Self {
        Self {
            booking_type: BookingType::Fixed,
            beds: "1".to_string(),
            start_date: today.to_string(),
            end_date: add_days(today, DEFAULT_STAY_DAYS).unwrap_or_default(),
            room_id: None,
            customer_upi: String::new(),
        }
    }

    pub fn bed_count(&self) -> Option<u32> {
        self.beds.trim().parse::<u32>().ok().filter(|n| *n >= 1)
    }

    pub fn validate(&self, customer_id: Option<i64>) -> Result<(), DraftError> {
        if !customer_id.is_some_and(|id| id != 0) {
            return Err(DraftError::NotLoggedIn);
        }
        if self.room_id.is_none() {
            return Err(DraftError::NoRoom);
        }
        if self.bed_count().is_none() {
            return Err(DraftError::BedCount);
        }
        if self.start_date.trim().is_empty() {
            return Err(DraftError::MissingStartDate);
        }
        if self.booking_type == BookingType::Fixed && self.end_date.trim().is_empty() {
            return Err(DraftError::MissingEndDate);
        }
        if self.customer_upi.trim().is_empty() {
            return Err(DraftError::MissingUpi);
        }
        Ok(())
    }

    pub fn can_submit(&self, customer_id: Option<i64>) -> bool {
        self.validate(customer_id).is_ok()
    }

    pub fn to_request(
        &self,
        customer_id: Option<i64>,
        pg_id: Option<i64>,
    ) -> Result<CreateBookingRequest, DraftError> {
        self.validate(customer_id)?;

        let (Some(user_id), Some(room_id), Some(beds_booked)) =
            (customer_id, self.room_id, self.bed_count())
        else {
            return Err(DraftError::NoRoom);
        };
        let pg_id = pg_id.ok_or(DraftError::NoListing)?;

        Ok(CreateBookingRequest {
            user_id,
            pg_id,
            room_id,
            booking_type: self.booking_type,
            beds_booked,
            start_date: self.start_date.trim().to_string(),
            end_date: match self.booking_type {
                BookingType::Fixed => Some(self.end_date.trim().to_string()),
                BookingType::Unlimited => None,
            },
            customer_upi: self.customer_upi.trim().to_string(),
        })
    }
}
