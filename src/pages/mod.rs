mod bookings;
mod details;
mod listings;
mod login;
mod payment;

use crate::components::notice::ErrorBanner;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::pricing::{money, DEPOSIT_FIXED, PLATFORM_FIXED};
use crate::state::{AppContext, PanelController, Screen};
use leptos::prelude::*;

use bookings::MyBookingsScreen;
use details::DetailsScreen;
use listings::ListingsScreen;
use login::SessionCard;
use payment::PaymentScreen;

#[component]
pub fn PanelPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let ctl = PanelController::new(app);

    // Initial listings fetch; nothing tracked, so this runs once.
    Effect::new(move |_| ctl.load_listings());

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-5xl flex-col gap-4 px-4 py-6">
                <PanelHeader ctl=ctl />
                <SessionCard ctl=ctl />
                <ErrorBanner error=app.error />

                {move || match app.screen.get() {
                    Screen::Listings => view! { <ListingsScreen ctl=ctl /> }.into_any(),
                    Screen::Details => view! { <DetailsScreen ctl=ctl /> }.into_any(),
                    Screen::Payment => view! { <PaymentScreen ctl=ctl /> }.into_any(),
                    Screen::MyBookings => view! { <MyBookingsScreen ctl=ctl /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn PanelHeader(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let tab = move |screen: Screen| {
        if app.screen.get() == screen {
            ButtonVariant::Default
        } else {
            ButtonVariant::Ghost
        }
    };

    view! {
        <header class="flex flex-wrap items-center justify-between gap-3">
            <div class="flex flex-col gap-0.5">
                <h1 class="text-lg font-semibold">"PG Booking"</h1>
                <span class="text-xs text-muted-foreground">
                    {format!(
                        "Deposit {} • Platform {}",
                        money(Some(DEPOSIT_FIXED)),
                        money(Some(PLATFORM_FIXED)),
                    )}
                </span>
            </div>
            <nav class="flex items-center gap-2">
                {move || {
                    view! {
                        <Button
                            size=ButtonSize::Sm
                            variant=tab(Screen::Listings)
                            on:click=move |_| ctl.browse()
                        >
                            "Browse PGs"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            variant=tab(Screen::MyBookings)
                            on:click=move |_| ctl.show_my_bookings()
                        >
                            "My Bookings"
                        </Button>
                    }
                }}
            </nav>
        </header>
    }
}
