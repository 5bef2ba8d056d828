use super::{AppState, Notice, PendingAction, Screen};
use crate::api::{RouteFamily, UploadFile};
use crate::drafts::{DraftError, PaymentContext, PaymentDraft};
use crate::models::Booking;
use crate::storage::{clear_customer_storage, save_customer_to_storage};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Runs customer actions: validates drafts, calls the backend, and writes the
/// outcome back into `AppState`.
///
/// Every failure ends up as a notice on the screen that triggered it; the
/// customer stays where they are and can retry.
#[derive(Clone, Copy)]
pub(crate) struct PanelController {
    app: AppState,
}

impl PanelController {
    pub fn new(app: AppState) -> Self {
        Self { app }
    }

    pub fn login(&self) {
        let app = self.app;
        let name = app.login_name.get_untracked();
        let phone = app.login_phone.get_untracked();
        let gender = app.login_gender.get_untracked();

        if !app.begin(PendingAction::Login) {
            return;
        }
        app.login_notice.set(None);
        app.error.set(None);

        let client = app.api_client.get_untracked();
        let this = *self;
        spawn_local(async move {
            match client.login(&name, &phone, gender).await {
                Ok(customer) => {
                    tracing::info!("customer {} logged in", customer.id);
                    save_customer_to_storage(&customer);
                    app.login_notice.set(Some(Notice::success(format!(
                        "Logged in as {} (ID: {})",
                        customer.name, customer.id
                    ))));
                    app.customer.set(Some(customer));
                    app.show(Screen::Listings);
                    this.load_listings();
                }
                Err(e) => app.login_notice.set(Some(Notice::error(e))),
            }
            app.finish(PendingAction::Login);
        });
    }

    pub fn logout(&self) {
        let app = self.app;
        clear_customer_storage();
        app.end_session();
        tracing::info!("customer logged out");
    }

    pub fn browse(&self) {
        self.app.show(Screen::Listings);
    }

    pub fn load_listings(&self) {
        let app = self.app;
        app.error.set(None);
        app.listings_loading.set(true);

        let area = app.area_filter.get_untracked();
        let client = app.api_client.get_untracked();
        spawn_local(async move {
            match client.list_listings(&area).await {
                Ok(listings) => {
                    tracing::debug!("loaded {} listings", listings.len());
                    app.listings.set(listings);
                }
                Err(e) => {
                    app.listings.set(vec![]);
                    app.error.set(Some(e.to_string()));
                }
            }
            app.listings_loading.set(false);
        });
    }

    pub fn open_details(&self, pg_id: i64) {
        let app = self.app;
        let req_id = app.begin_details(pg_id);

        let client = app.api_client.get_untracked();
        spawn_local(async move {
            let result = client.listing_detail(pg_id).await;
            if !app.apply_details(req_id, result) {
                tracing::debug!("dropping stale details response for pg {pg_id}");
            }
        });
    }

    pub fn refresh_details(&self) {
        if let Some(pg_id) = self.app.selected_pg_id.get_untracked() {
            self.open_details(pg_id);
        }
    }

    pub fn select_room(&self, room_id: i64) {
        self.app.booking.room_id.set(Some(room_id));
        self.app.booking.notice.set(None);
    }

    pub fn clear_selection(&self) {
        self.app.booking.clear_selection();
    }

    pub fn create_booking(&self) {
        let app = self.app;
        app.booking.notice.set(None);
        app.error.set(None);

        let draft = app.booking.snapshot_untracked();
        let req = match draft.to_request(
            app.customer_id_untracked(),
            app.selected_pg_id.get_untracked(),
        ) {
            Ok(req) => req,
            Err(e) => {
                app.booking.notice.set(Some(Notice::error(e)));
                return;
            }
        };

        if !app.begin(PendingAction::CreateBooking) {
            return;
        }

        let client = app.api_client.get_untracked();
        spawn_local(async move {
            match client.create_booking(&req).await {
                Ok(receipt) => {
                    tracing::info!(
                        "booking {:?} created for room {}",
                        receipt.booking_id,
                        req.room_id
                    );
                    app.apply_receipt(req.pg_id, &receipt);
                }
                Err(e) => app.booking.notice.set(Some(Notice::error(e))),
            }
            app.finish(PendingAction::CreateBooking);
        });
    }

    /// Re-open the payment screen for a booking that still awaits a screenshot.
    pub fn pay_for(&self, booking: &Booking) {
        if !booking.can_pay() || self.app.customer_id_untracked().is_none() {
            tracing::debug!("booking {} is not payable", booking.id);
            return;
        }
        self.app.show(Screen::Payment);
        self.app
            .payment
            .set(PaymentDraft::for_context(PaymentContext::from_booking(booking)));
    }

    pub fn pick_payment_file(&self, file: Option<UploadFile>) {
        // A file read can finish after the customer has left the screen.
        if self.app.screen.get_untracked() != Screen::Payment {
            return;
        }
        self.app.payment_notice.set(None);
        self.app.payment.update(|p| p.file = file);
    }

    pub fn clear_payment_file(&self) {
        self.pick_payment_file(None);
    }

    /// Leave Payment for the PG that was just booked, or the listings.
    pub fn back_from_payment(&self) {
        let pg_id = self
            .app
            .payment
            .with_untracked(|p| p.context.as_ref().and_then(|c| c.pg_id));
        match pg_id {
            Some(pg_id) => self.open_details(pg_id),
            None => self.browse(),
        }
    }

    pub fn upload_payment(&self) {
        let app = self.app;
        app.payment_notice.set(None);
        app.error.set(None);

        let Some(user_id) = app.customer_id_untracked() else {
            app.payment_notice.set(Some(Notice::error(DraftError::NotLoggedIn)));
            return;
        };

        let (booking_id, file) = match app.payment.get_untracked().ready() {
            Ok(ready) => ready,
            Err(e) => {
                app.payment_notice.set(Some(Notice::error(e)));
                return;
            }
        };

        if !app.begin(PendingAction::UploadPayment) {
            return;
        }

        let mut client = app.api_client.get_untracked();
        let this = *self;
        spawn_local(async move {
            let result = client.upload_payment_screenshot(booking_id, &file).await;
            if app.is_session_of(user_id) {
                let family = RouteFamily::PaymentScreenshot;
                app.remember_route(family, client.routes.pinned(family));
            }

            match result {
                Ok(_) => {
                    tracing::info!("payment screenshot uploaded for booking {booking_id}");
                    app.show(Screen::MyBookings);
                    this.refresh_my_bookings(Some(Notice::success(
                        "Payment screenshot uploaded. Waiting for owner confirmation.",
                    )));
                }
                Err(e) => app.payment_notice.set(Some(Notice::error(e))),
            }
            app.finish(PendingAction::UploadPayment);
        });
    }

    pub fn show_my_bookings(&self) {
        self.app.show(Screen::MyBookings);
        self.refresh_my_bookings(None);
    }

    /// Reload booking history; `then` is shown once the list is in.
    pub fn refresh_my_bookings(&self, then: Option<Notice>) {
        let app = self.app;
        app.my_notice.set(None);
        app.error.set(None);

        let Some(user_id) = app.require_customer_for_history() else {
            return;
        };

        app.my_loading.set(true);
        let mut client = app.api_client.get_untracked();
        spawn_local(async move {
            let result = client.my_bookings(user_id).await;
            if app.apply_my_bookings(user_id, result, then) {
                let family = RouteFamily::CustomerBookings;
                app.remember_route(family, client.routes.pinned(family));
            } else {
                app.my_loading.set(false);
            }
        });
    }

    /// No-op unless the booking is still pending.
    pub fn cancel_booking(&self, booking: &Booking) {
        if !booking.can_cancel() {
            tracing::debug!("booking {} is not cancellable", booking.id);
            return;
        }

        let app = self.app;
        app.my_notice.set(None);
        app.error.set(None);

        let Some(user_id) = app.customer_id_untracked() else {
            app.my_notice.set(Some(Notice::error(DraftError::NotLoggedIn)));
            return;
        };

        let booking_id = booking.id;
        let action = PendingAction::Cancel(booking_id);
        if !app.begin(action) {
            return;
        }

        let client = app.api_client.get_untracked();
        let this = *self;
        spawn_local(async move {
            match client.cancel_booking(booking_id, user_id).await {
                Ok(cancelled) => {
                    let shown = cancelled.unwrap_or(booking_id);
                    tracing::info!("booking {shown} cancelled");
                    this.refresh_my_bookings(Some(Notice::success(format!(
                        "Cancelled booking #{shown}"
                    ))));
                }
                Err(e) => app.my_notice.set(Some(Notice::error(e))),
            }
            app.finish(action);
        });
    }

    pub fn view_listing_of(&self, booking: &Booking) {
        if let Some(pg_id) = booking.pg_id {
            self.open_details(pg_id);
        }
    }
}
