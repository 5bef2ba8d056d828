use super::DraftError;
use crate::api::{BookingReceipt, UploadFile};
use crate::models::Booking;

pub(crate) const DEFAULT_PAYMENT_NOTE: &str = "Pay using any UPI app and upload screenshot.";

/// What the payment screen needs to tell the customer whom to pay and how much.
#[derive(Clone, Debug, PartialEq, Default)]
pub(crate) struct PaymentContext {
    pub booking_id: i64,
    /// PG the booking belongs to, for navigating back to it.
    pub pg_id: Option<i64>,
    pub owner_upi: Option<String>,
    pub note: Option<String>,
    pub amount: Option<f64>,
}

impl PaymentContext {
    pub fn from_receipt(booking_id: i64, pg_id: i64, receipt: &BookingReceipt) -> Self {
        Self {
            booking_id,
            pg_id: Some(pg_id),
            owner_upi: receipt.owner_upi.clone(),
            note: receipt.note.clone(),
            amount: receipt.amount,
        }
    }

    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            pg_id: booking.pg_id,
            owner_upi: booking.owner_upi.clone(),
            note: None,
            amount: booking.total_amount,
        }
    }

    pub fn owner_upi_label(&self) -> String {
        self.owner_upi
            .clone()
            .unwrap_or_else(|| "(Owner UPI not set)".to_string())
    }

    pub fn note_label(&self) -> String {
        self.note
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_NOTE.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub(crate) struct PaymentDraft {
    pub context: Option<PaymentContext>,
    pub file: Option<UploadFile>,
}

impl PaymentDraft {
    pub fn for_context(context: PaymentContext) -> Self {
        Self {
            context: Some(context),
            file: None,
        }
    }

    pub fn booking_id(&self) -> Option<i64> {
        self.context
            .as_ref()
            .map(|c| c.booking_id)
            .filter(|id| *id > 0)
    }

    /// Booking id and screenshot, once both are present.
    pub fn ready(&self) -> Result<(i64, UploadFile), DraftError> {
        let booking_id = self.booking_id().ok_or(DraftError::InvalidBookingId)?;
        let file = self.file.clone().ok_or(DraftError::NoScreenshot)?;
        Ok((booking_id, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screenshot() -> UploadFile {
        UploadFile {
            file_name: "paid.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[test]
    fn test_ready_checks_booking_before_file() {
        assert_eq!(PaymentDraft::default().ready(), Err(DraftError::InvalidBookingId));

        let ctx = PaymentContext {
            booking_id: 0,
            ..Default::default()
        };
        let d = PaymentDraft {
            context: Some(ctx),
            file: Some(screenshot()),
        };
        assert_eq!(d.ready(), Err(DraftError::InvalidBookingId));

        let d = PaymentDraft::for_context(PaymentContext {
            booking_id: 77,
            ..Default::default()
        });
        assert_eq!(d.ready(), Err(DraftError::NoScreenshot));

        let d = PaymentDraft {
            file: Some(screenshot()),
            ..d
        };
        assert_eq!(d.ready(), Ok((77, screenshot())));
    }

    #[test]
    fn test_context_from_booking_record() {
        let b: Booking = serde_json::from_value(json!({
            "id": 12, "pg_id": "4", "status": "pending", "owner_upi": "owner@upi", "total_amount": 6299
        }))
        .expect("booking should parse");
        let ctx = PaymentContext::from_booking(&b);
        assert_eq!(ctx.booking_id, 12);
        assert_eq!(ctx.pg_id, Some(4));
        assert_eq!(ctx.owner_upi_label(), "owner@upi");
        assert_eq!(ctx.note_label(), DEFAULT_PAYMENT_NOTE);
        assert_eq!(ctx.amount, Some(6299.0));
    }

    #[test]
    fn test_context_labels_fall_back() {
        let ctx = PaymentContext::from_receipt(5, 11, &BookingReceipt::default());
        assert_eq!(ctx.pg_id, Some(11));
        assert_eq!(ctx.owner_upi_label(), "(Owner UPI not set)");
        assert!(ctx.amount.is_none());
    }
}
