use super::{ApiError, ApiResult};
use crate::models::BookingType;
use serde::Serialize;
use serde_json::Value;

/// Canonical create-booking payload (snake_case, as current backends read it).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub(crate) struct CreateBookingRequest {
    pub user_id: i64,
    pub pg_id: i64,
    pub room_id: i64,
    pub booking_type: BookingType,
    pub beds_booked: u32,
    pub start_date: String,
    /// `null` for open-ended bookings.
    pub end_date: Option<String>,
    pub customer_upi: String,
}

/// Wire contract used for `POST /bookings`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub(crate) enum BookingContract {
    /// Canonical snake_case keys only.
    #[strum(serialize = "canonical", serialize = "v2")]
    Canonical,
    /// Canonical keys plus the camelCase names older backends read.
    #[default]
    #[strum(serialize = "dual", serialize = "legacy")]
    DualCase,
}

// Note `user_id` travels as `customerUserId` on the old contract, not `userId`.
const CAMEL_ALIASES: &[(&str, &str)] = &[
    ("user_id", "customerUserId"),
    ("pg_id", "pgId"),
    ("room_id", "roomId"),
    ("booking_type", "bookingType"),
    ("beds_booked", "bedsBooked"),
    ("start_date", "startDate"),
    ("end_date", "endDate"),
    ("customer_upi", "customerUpi"),
];

impl BookingContract {
    pub fn encode(self, req: &CreateBookingRequest) -> ApiResult<Value> {
        let mut body = serde_json::to_value(req).map_err(ApiError::parse)?;
        if self == Self::DualCase {
            if let Value::Object(map) = &mut body {
                for (snake, camel) in CAMEL_ALIASES {
                    if let Some(v) = map.get(*snake).cloned() {
                        map.insert((*camel).to_string(), v);
                    }
                }
            }
        }
        Ok(body)
    }
}
