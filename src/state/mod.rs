mod controller;
mod pending;

pub(crate) use controller::PanelController;
pub(crate) use pending::{PendingAction, PendingActions};

use crate::api::{ApiClient, ApiResult, BookingReceipt, RouteFamily, RouteTable};
use crate::config::EnvConfig;
use crate::drafts::{BookingDraft, DraftError, PaymentContext, PaymentDraft};
use crate::models::{Booking, BookingType, Customer, Gender, Listing, ListingDetail};
use crate::storage::load_customer_from_storage;
use crate::util::today_local;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum Screen {
    #[default]
    Listings,
    Details,
    Payment,
    MyBookings,
}

/// Per-screen state thrown away when the customer leaves that screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DraftSlot {
    Booking,
    Payment,
    BookingsNotice,
}

impl Screen {
    pub fn owned_drafts(self) -> &'static [DraftSlot] {
        match self {
            Self::Listings => &[],
            Self::Details => &[DraftSlot::Booking],
            Self::Payment => &[DraftSlot::Payment],
            Self::MyBookings => &[DraftSlot::BookingsNotice],
        }
    }
}

/// Drafts to reset when moving `from` one screen `to` another.
pub(crate) fn released_drafts(from: Screen, to: Screen) -> &'static [DraftSlot] {
    if from == to {
        &[]
    } else {
        from.owned_drafts()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Success,
    Error,
}

/// Inline result of an action, shown next to the control that triggered it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl std::fmt::Display) -> Self {
        Self {
            tone: Tone::Error,
            text: text.to_string(),
        }
    }

    pub fn display(&self) -> String {
        match self.tone {
            Tone::Success => format!("✅ {}", self.text),
            Tone::Error => format!("❌ {}", self.text),
        }
    }
}

/// Booking form fields, one signal per input.
#[derive(Clone, Copy)]
pub(crate) struct BookingForm {
    pub booking_type: RwSignal<BookingType>,
    pub beds: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub room_id: RwSignal<Option<i64>>,
    pub customer_upi: RwSignal<String>,
    pub notice: RwSignal<Option<Notice>>,
}

impl BookingForm {
    fn new(draft: BookingDraft) -> Self {
        Self {
            booking_type: RwSignal::new(draft.booking_type),
            beds: RwSignal::new(draft.beds),
            start_date: RwSignal::new(draft.start_date),
            end_date: RwSignal::new(draft.end_date),
            room_id: RwSignal::new(draft.room_id),
            customer_upi: RwSignal::new(draft.customer_upi),
            notice: RwSignal::new(None),
        }
    }

    /// Tracked read, for views.
    pub fn snapshot(&self) -> BookingDraft {
        BookingDraft {
            booking_type: self.booking_type.get(),
            beds: self.beds.get(),
            start_date: self.start_date.get(),
            end_date: self.end_date.get(),
            room_id: self.room_id.get(),
            customer_upi: self.customer_upi.get(),
        }
    }

    pub fn snapshot_untracked(&self) -> BookingDraft {
        BookingDraft {
            booking_type: self.booking_type.get_untracked(),
            beds: self.beds.get_untracked(),
            start_date: self.start_date.get_untracked(),
            end_date: self.end_date.get_untracked(),
            room_id: self.room_id.get_untracked(),
            customer_upi: self.customer_upi.get_untracked(),
        }
    }

    pub fn clear_selection(&self) {
        self.room_id.set(None);
        self.notice.set(None);
    }

    pub fn reset(&self) {
        let fresh = BookingDraft::starting(&today_local());
        self.booking_type.set(fresh.booking_type);
        self.beds.set(fresh.beds);
        self.start_date.set(fresh.start_date);
        self.end_date.set(fresh.end_date);
        self.clear_selection();
        self.customer_upi.set(fresh.customer_upi);
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub customer: RwSignal<Option<Customer>>,

    pub screen: RwSignal<Screen>,
    /// Page-level error banner.
    pub error: RwSignal<Option<String>>,

    pub login_name: RwSignal<String>,
    pub login_phone: RwSignal<String>,
    pub login_gender: RwSignal<Gender>,
    pub login_notice: RwSignal<Option<Notice>>,

    pub area_filter: RwSignal<String>,
    pub listings: RwSignal<Vec<Listing>>,
    pub listings_loading: RwSignal<bool>,

    pub selected_pg_id: RwSignal<Option<i64>>,
    pub detail: RwSignal<ListingDetail>,
    pub detail_loading: RwSignal<bool>,
    /// Only the response to the latest details request is applied.
    pub detail_request_id: RwSignal<u64>,

    pub booking: BookingForm,
    pub payment: RwSignal<PaymentDraft>,
    pub payment_notice: RwSignal<Option<Notice>>,

    pub my_bookings: RwSignal<Vec<Booking>>,
    pub my_loading: RwSignal<bool>,
    pub my_notice: RwSignal<Option<Notice>>,

    pub pending: RwSignal<PendingActions>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with(&EnvConfig::new(), load_customer_from_storage())
    }

    /// State for `config`, resuming the session of `stored_customer` if any.
    pub fn with(config: &EnvConfig, stored_customer: Option<Customer>) -> Self {
        let (login_name, login_phone, login_gender) = match &stored_customer {
            Some(c) => (
                c.name.clone(),
                c.phone.clone(),
                c.gender.parse::<Gender>().unwrap_or_default(),
            ),
            None => (String::new(), String::new(), Gender::default()),
        };

        Self {
            api_client: RwSignal::new(ApiClient::from_config(config)),
            customer: RwSignal::new(stored_customer),
            screen: RwSignal::new(Screen::default()),
            error: RwSignal::new(None),
            login_name: RwSignal::new(login_name),
            login_phone: RwSignal::new(login_phone),
            login_gender: RwSignal::new(login_gender),
            login_notice: RwSignal::new(None),
            area_filter: RwSignal::new(String::new()),
            listings: RwSignal::new(vec![]),
            listings_loading: RwSignal::new(false),
            selected_pg_id: RwSignal::new(None),
            detail: RwSignal::new(ListingDetail::default()),
            detail_loading: RwSignal::new(false),
            detail_request_id: RwSignal::new(0),
            booking: BookingForm::new(BookingDraft::starting(&today_local())),
            payment: RwSignal::new(PaymentDraft::default()),
            payment_notice: RwSignal::new(None),
            my_bookings: RwSignal::new(vec![]),
            my_loading: RwSignal::new(false),
            my_notice: RwSignal::new(None),
            pending: RwSignal::new(PendingActions::default()),
        }
    }

    pub fn customer_id(&self) -> Option<i64> {
        self.customer.with(|c| c.as_ref().map(|c| c.id)).filter(|id| *id != 0)
    }

    pub fn customer_id_untracked(&self) -> Option<i64> {
        self.customer
            .with_untracked(|c| c.as_ref().map(|c| c.id))
            .filter(|id| *id != 0)
    }

    pub fn api_base(&self) -> String {
        self.api_client.with(|c| c.base_url.clone())
    }

    /// Switch screens, dropping the drafts owned by the screen being left.
    pub fn show(&self, next: Screen) {
        let current = self.screen.get_untracked();
        for slot in released_drafts(current, next) {
            match slot {
                DraftSlot::Booking => self.booking.reset(),
                DraftSlot::Payment => {
                    self.payment.set(PaymentDraft::default());
                    self.payment_notice.set(None);
                }
                DraftSlot::BookingsNotice => self.my_notice.set(None),
            }
        }
        if current != next {
            tracing::debug!("screen {current:?} -> {next:?}");
            self.screen.set(next);
        }
    }

    /// Merge what a cloned client learned about one route family.
    ///
    /// Only that family's pin is written, so overlapping requests for other
    /// families keep theirs.
    pub fn remember_route(&self, family: RouteFamily, route: Option<usize>) {
        self.api_client.update(|c| c.routes.pin(family, route));
    }

    /// `user_id` is still the logged-in customer.
    pub fn is_session_of(&self, user_id: i64) -> bool {
        self.customer_id_untracked() == Some(user_id)
    }

    /// Forget everything that belongs to the logged-in customer.
    pub fn end_session(&self) {
        self.customer.set(None);
        self.login_name.set(String::new());
        self.login_phone.set(String::new());
        self.login_gender.set(Gender::default());
        self.login_notice.set(Some(Notice::success("Logged out")));

        self.my_bookings.set(vec![]);
        self.my_notice.set(None);
        self.payment.set(PaymentDraft::default());
        self.payment_notice.set(None);
        // Negotiated routes belong to the session that learned them.
        self.api_client.update(|c| c.routes = RouteTable::default());

        self.show(Screen::Listings);
    }

    /// Enter Details for `pg_id` and start a new details request.
    ///
    /// Returns the request id the response must carry to be applied.
    pub fn begin_details(&self, pg_id: i64) -> u64 {
        self.error.set(None);
        self.selected_pg_id.set(Some(pg_id));
        self.show(Screen::Details);
        self.booking.clear_selection();
        self.detail.set(ListingDetail::default());
        self.detail_loading.set(true);

        let req_id = self.detail_request_id.get_untracked().wrapping_add(1);
        self.detail_request_id.set(req_id);
        req_id
    }

    /// Apply a details response; `false` when a newer request superseded it.
    pub fn apply_details(&self, req_id: u64, result: ApiResult<ListingDetail>) -> bool {
        if self.detail_request_id.get_untracked() != req_id {
            return false;
        }
        match result {
            Ok(detail) => self.detail.set(detail),
            Err(e) => self.error.set(Some(e.to_string())),
        }
        self.detail_loading.set(false);
        true
    }

    /// Move on to payment when the backend returned a booking id.
    pub fn apply_receipt(&self, pg_id: i64, receipt: &BookingReceipt) {
        match receipt.booking_id {
            Some(booking_id) => {
                self.show(Screen::Payment);
                self.payment.set(PaymentDraft::for_context(PaymentContext::from_receipt(
                    booking_id, pg_id, receipt,
                )));
            }
            None => {
                tracing::warn!("booking created but response carried no id");
                self.booking.notice.set(Some(Notice::success(
                    "Booking created! Open My Bookings to pay for it.",
                )));
            }
        }
    }

    /// Apply a booking history response fetched for `user_id`.
    ///
    /// Dropped when the session changed meanwhile. A failure empties the list
    /// so no earlier records stay actionable.
    pub fn apply_my_bookings(
        &self,
        user_id: i64,
        result: ApiResult<Vec<Booking>>,
        then: Option<Notice>,
    ) -> bool {
        if !self.is_session_of(user_id) {
            tracing::debug!("dropping booking history of customer {user_id}");
            return false;
        }
        match result {
            Ok(bookings) => {
                self.my_bookings.set(bookings);
                if then.is_some() {
                    self.my_notice.set(then);
                }
            }
            Err(e) => {
                self.my_bookings.set(vec![]);
                self.my_notice.set(Some(Notice::error(e)));
            }
        }
        self.my_loading.set(false);
        true
    }

    /// History can only be shown to a logged-in customer.
    pub fn require_customer_for_history(&self) -> Option<i64> {
        let user_id = self.customer_id_untracked();
        if user_id.is_none() {
            self.my_bookings.set(vec![]);
            self.my_notice.set(Some(Notice::error(DraftError::NotLoggedIn)));
        }
        user_id
    }

    /// `false` when the action is already in flight.
    pub fn begin(&self, action: PendingAction) -> bool {
        let mut started = false;
        self.pending.update(|p| started = p.try_begin(action));
        if !started {
            tracing::debug!("{action:?} already in flight, ignoring");
        }
        started
    }

    pub fn finish(&self, action: PendingAction) {
        self.pending.update(|p| p.finish(action));
    }

    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.pending.with(|p| p.is_pending(action))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
