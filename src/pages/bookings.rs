use crate::components::notice::NoticeBanner;
use crate::components::ui::{
    status_badge_class, Badge, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardGrid, CardHeader, CardTitle, Spinner,
};
use crate::models::{Booking, PaymentStatus};
use crate::pricing::money;
use crate::state::{AppContext, PanelController, PendingAction};
use crate::util::format_date;
use leptos::prelude::*;

fn stay_label(b: &Booking) -> String {
    let start = b.start_date.as_deref().map(format_date).unwrap_or_default();
    let end = b
        .end_date
        .as_deref()
        .map(format_date)
        .unwrap_or_else(|| "Unlimited".to_string());
    format!("{start} → {end}")
}

fn payment_label(status: &PaymentStatus) -> Option<String> {
    match status {
        PaymentStatus::Unset => None,
        PaymentStatus::Pending => Some("payment pending".to_string()),
        PaymentStatus::Submitted => Some("payment submitted".to_string()),
        PaymentStatus::Verified => Some("payment verified".to_string()),
        PaymentStatus::Other(s) => Some(format!("payment {}", s.to_lowercase())),
    }
}

#[component]
pub(super) fn MyBookingsScreen(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <section class="flex flex-col gap-3">
            <div class="flex items-center gap-2">
                <h2 class="text-sm font-semibold">"My bookings"</h2>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Outline
                    on:click=move |_| ctl.refresh_my_bookings(None)
                >
                    "Refresh"
                </Button>
                <Show when=move || app.my_loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </div>

            <NoticeBanner notice=app.my_notice />

            {move || {
                let bookings = app.my_bookings.get();
                if bookings.is_empty() {
                    return view! {
                        <div class="py-8 text-center text-xs text-muted-foreground">"No bookings yet."</div>
                    }
                        .into_any();
                }
                view! {
                    <CardGrid>
                        {bookings
                            .into_iter()
                            .map(|b| view! { <BookingCard ctl=ctl booking=b /> })
                            .collect_view()}
                    </CardGrid>
                }
                    .into_any()
            }}
        </section>
    }
}

#[component]
fn BookingCard(ctl: PanelController, booking: Booking) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let booking_id = booking.id;
    let cancelling = move || app.is_pending(PendingAction::Cancel(booking_id));

    let status = booking.status.as_str().to_string();
    let badge_class = status_badge_class(&status);
    let title = booking
        .pg_name
        .clone()
        .unwrap_or_else(|| format!("Booking #{booking_id}"));
    let subtitle = match &booking.room_type {
        Some(room) => format!("#{booking_id} • {room}"),
        None => format!("#{booking_id}"),
    };

    let pay = booking.can_pay().then(|| {
        let b = booking.clone();
        view! {
            <Button size=ButtonSize::Sm on:click=move |_| ctl.pay_for(&b)>
                "Pay Now"
            </Button>
        }
    });
    let cancel = booking.can_cancel().then(|| {
        let b = booking.clone();
        view! {
            <Button
                size=ButtonSize::Sm
                variant=ButtonVariant::Destructive
                attr:disabled=cancelling
                on:click=move |_| ctl.cancel_booking(&b)
            >
                {move || if cancelling() { "Cancelling..." } else { "Cancel" }}
            </Button>
        }
    });
    let view_pg = booking.pg_id.is_some().then(|| {
        let b = booking.clone();
        view! {
            <Button
                size=ButtonSize::Sm
                variant=ButtonVariant::Ghost
                on:click=move |_| ctl.view_listing_of(&b)
            >
                "View PG"
            </Button>
        }
    });

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-sm">{title}</CardTitle>
                <CardDescription class="text-xs">{subtitle}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-2 text-xs">
                <div class="flex flex-wrap gap-2">
                    <Badge class=badge_class>{status}</Badge>
                    {payment_label(&booking.payment_status).map(|p| view! { <Badge>{p}</Badge> })}
                </div>
                <span>{stay_label(&booking)}</span>
                <span class="font-medium">{format!("Total {}", money(booking.total_amount))}</span>
            </CardContent>
            <CardFooter>{pay} {cancel} {view_pg}</CardFooter>
        </Card>
    }
}
