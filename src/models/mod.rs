pub(crate) mod de;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Logged-in customer, as returned under `data.user` by `/auth/customer`.
///
/// This is the record cached in localStorage between reloads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Customer {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub phone: String,
    #[serde(default, deserialize_with = "de::text")]
    pub gender: String,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Gender {
    #[default]
    Boy,
    Girl,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum BookingType {
    /// Start and end date.
    #[default]
    Fixed,
    /// Open-ended stay.
    Unlimited,
}

impl BookingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed (dates)",
            Self::Unlimited => "Unlimited (open)",
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Listing {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub address: String,
    #[serde(default, deserialize_with = "de::text")]
    pub area: String,
    #[serde(default, deserialize_with = "de::text")]
    pub pg_type: String,
    #[serde(default, deserialize_with = "de::string_list")]
    pub image_urls: Vec<String>,
}

impl Listing {
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Room {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::text")]
    pub room_type: String,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub rent_monthly: Option<f64>,
    /// Older backends only send `rent`.
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub rent: Option<f64>,
    #[serde(default, deserialize_with = "de::count")]
    pub available_beds: u32,
}

impl Room {
    /// `rent_monthly` when set and non-zero, then `rent`, then zero.
    pub fn monthly_rent(&self) -> f64 {
        [self.rent_monthly, self.rent]
            .into_iter()
            .flatten()
            .find(|r| *r != 0.0)
            .unwrap_or(0.0)
    }
}

/// A listing together with its rooms, whichever response shape it came from.
#[derive(Clone, Debug, PartialEq, Default)]
pub(crate) struct ListingDetail {
    pub listing: Option<Listing>,
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::text(d).map(Self::from)
    }
}

/// Payment verification state of a booking.
///
/// The backend may grow states beyond the three we know (e.g. a rejected
/// screenshot), so anything else is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum PaymentStatus {
    #[default]
    Unset,
    Pending,
    Submitted,
    Verified,
    Other(String),
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" => Self::Unset,
            "pending" => Self::Pending,
            "submitted" => Self::Submitted,
            "verified" => Self::Verified,
            _ => Self::Other(s),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::text(d).map(Self::from)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Booking {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub pg_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub pg_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub room_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_amount")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub owner_upi: Option<String>,
}

impl Booking {
    pub fn can_cancel(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    /// A screenshot can still be sent while the booking is pending and no
    /// screenshot is already with the owner.
    pub fn can_pay(&self) -> bool {
        self.status == BookingStatus::Pending
            && !matches!(
                self.payment_status,
                PaymentStatus::Submitted | PaymentStatus::Verified
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn booking(status: &str, payment_status: &str) -> Booking {
        serde_json::from_value(json!({
            "id": 9,
            "status": status,
            "payment_status": payment_status,
        }))
        .expect("booking should parse")
    }

    #[test]
    fn test_room_rent_prefers_monthly_then_rent() {
        let r: Room = serde_json::from_value(json!({
            "id": 1, "room_type": "double", "rent_monthly": "5000", "available_beds": 2
        }))
        .expect("room should parse");
        assert_eq!(r.monthly_rent(), 5000.0);

        let r: Room = serde_json::from_value(json!({
            "id": 2, "room_type": "single", "rent_monthly": 0, "rent": 4200
        }))
        .expect("room should parse");
        assert_eq!(r.monthly_rent(), 4200.0);
        assert_eq!(r.available_beds, 0);

        let r: Room = serde_json::from_value(json!({ "id": 3 })).expect("room should parse");
        assert_eq!(r.monthly_rent(), 0.0);
    }

    #[test]
    fn test_listing_tolerates_missing_and_odd_fields() {
        let l: Listing = serde_json::from_value(json!({
            "id": "12",
            "name": "Sunrise PG",
            "address": null,
            "image_urls": "not-a-list"
        }))
        .expect("listing should parse");
        assert_eq!(l.id, 12);
        assert_eq!(l.address, "");
        assert!(l.image_urls.is_empty());
        assert!(l.cover_image().is_none());
    }

    #[test]
    fn test_customer_contract_deserialize() {
        let c: Customer = serde_json::from_value(json!({
            "id": 3, "name": "Ram", "phone": 9999999999u64, "gender": "boy", "created_at": "x"
        }))
        .expect("customer should parse");
        assert_eq!(c.id, 3);
        assert_eq!(c.phone, "9999999999");
    }

    #[test]
    fn test_cancel_only_for_pending() {
        assert!(booking("pending", "").can_cancel());
        assert!(!booking("confirmed", "").can_cancel());
        assert!(!booking("cancelled", "").can_cancel());
        assert!(!booking("weird", "").can_cancel());
    }

    #[test]
    fn test_pay_blocked_once_screenshot_is_with_owner() {
        assert!(booking("pending", "pending").can_pay());
        assert!(booking("pending", "").can_pay());
        assert!(!booking("pending", "Submitted").can_pay());
        assert!(!booking("pending", "verified").can_pay());
        assert!(!booking("confirmed", "pending").can_pay());
    }

    #[test]
    fn test_unknown_payment_status_kept_verbatim() {
        let b = booking("pending", "rejected");
        assert_eq!(b.payment_status, PaymentStatus::Other("rejected".to_string()));
        assert!(b.can_pay());
    }

    #[test]
    fn test_booking_optional_columns() {
        let b: Booking = serde_json::from_value(json!({
            "id": 4,
            "status": "pending",
            "pg_id": "7",
            "pg_name": "",
            "end_date": null,
            "total_amount": "6299.00"
        }))
        .expect("booking should parse");
        assert_eq!(b.pg_id, Some(7));
        assert!(b.pg_name.is_none());
        assert!(b.end_date.is_none());
        assert_eq!(b.total_amount, Some(6299.0));
        assert_eq!(b.payment_status, PaymentStatus::Unset);
    }
}
