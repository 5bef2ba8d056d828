mod api;
mod app;
mod components;
mod config;
mod drafts;
mod logging;
mod models;
mod pages;
mod pricing;
mod state;
mod storage;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    let config = EnvConfig::new();
    logging::init(config.log_level);
    tracing::info!(
        "customer panel starting (api {}, contract {:?})",
        config.api_url,
        config.booking_contract
    );
    mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use crate::api::{parse_booking_receipt, BookingContract};
    use crate::drafts::{BookingDraft, PaymentContext, PaymentDraft};
    use crate::models::Booking;
    use serde_json::json;

    #[test]
    fn test_booking_draft_to_payment_context() {
        let draft = BookingDraft {
            room_id: Some(4),
            customer_upi: "ram@upi".to_string(),
            ..BookingDraft::starting("2024-12-28")
        };
        let req = draft.to_request(Some(3), Some(11)).expect("draft is complete");
        let body = BookingContract::default()
            .encode(&req)
            .expect("request should encode");
        assert_eq!(body["end_date"], "2025-01-04");
        assert_eq!(body["endDate"], "2025-01-04");
        assert_eq!(body["customerUserId"], 3);

        let receipt = parse_booking_receipt(&json!({
            "data": {
                "booking": { "id": 51, "owner_upi": "owner@upi", "total_amount": 6299 },
                "payment": { "note": "Pay before check-in" }
            }
        }));
        let booking_id = receipt.booking_id.expect("receipt carries id");
        let payment = PaymentDraft::for_context(PaymentContext::from_receipt(
            booking_id, req.pg_id, &receipt,
        ));
        assert_eq!(payment.booking_id(), Some(51));
        let ctx = payment.context.expect("context set");
        assert_eq!(ctx.owner_upi_label(), "owner@upi");
        assert_eq!(ctx.note_label(), "Pay before check-in");
    }

    #[test]
    fn test_history_record_gates_actions() {
        let rows: Vec<Booking> = serde_json::from_value(json!([
            { "id": 1, "status": "pending", "payment_status": "pending" },
            { "id": 2, "status": "pending", "payment_status": "Submitted" },
            { "id": 3, "status": "confirmed", "payment_status": "verified" }
        ]))
        .expect("history should parse");
        let actions: Vec<(bool, bool)> = rows.iter().map(|b| (b.can_pay(), b.can_cancel())).collect();
        assert_eq!(actions, vec![(true, true), (false, true), (false, false)]);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::config::{EnvConfig, DEFAULT_API_URL};
    use crate::models::Customer;
    use crate::state::{AppState, PanelController};
    use crate::storage::{load_customer_from_storage, save_customer_to_storage};
    use leptos::prelude::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_env_config_without_window_env_uses_defaults() {
        let config = EnvConfig::new();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[wasm_bindgen_test]
    fn test_logging_installs_console_subscriber() {
        let config = EnvConfig::from_values(None, Some("debug".to_string()), None);
        crate::logging::init(config.log_level);
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        assert!(!tracing::enabled!(tracing::Level::TRACE));
        tracing::debug!("console subscriber installed");
    }

    #[wasm_bindgen_test]
    fn test_logout_forgets_stored_customer_and_history() {
        let owner = Owner::new();
        owner.set();
        save_customer_to_storage(&Customer {
            id: 7,
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            gender: "female".to_string(),
        });
        let app = AppState::new();
        assert_eq!(app.customer_id_untracked(), Some(7));
        app.my_bookings.set(vec![serde_json::from_value(
            serde_json::json!({ "id": 1, "status": "pending" }),
        )
        .expect("booking should parse")]);

        PanelController::new(app).logout();

        assert_eq!(load_customer_from_storage(), None);
        assert_eq!(app.customer_id_untracked(), None);
        assert!(app.my_bookings.get_untracked().is_empty());
    }
}
