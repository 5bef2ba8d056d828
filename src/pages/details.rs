use crate::components::notice::NoticeBanner;
use crate::components::ui::{
    Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardGrid, CardHeader, CardTitle, Input, Label, NativeSelect, SelectChoice, Spinner,
};
use crate::models::{BookingType, Room};
use crate::pricing::{money, total_price, DEPOSIT_FIXED, PLATFORM_FIXED};
use crate::state::{AppContext, PanelController, PendingAction};
use crate::util::asset_url;
use leptos::prelude::*;

#[component]
pub(super) fn DetailsScreen(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <section class="flex flex-col gap-4">
            <div class="flex flex-wrap items-center gap-2">
                <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost on:click=move |_| ctl.browse()>
                    "← Back"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Outline
                    on:click=move |_| ctl.refresh_details()
                >
                    "Refresh"
                </Button>
                <Show when=move || app.detail_loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </div>

            <ListingSummary />
            <RoomList ctl=ctl />
            <BookingFormCard ctl=ctl />
        </section>
    }
}

#[component]
fn ListingSummary() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    move || {
        let api_base = app.api_base();
        app.detail.get().listing.map(|l| {
            view! {
                <Card>
                    <CardHeader>
                        <CardTitle>{l.name}</CardTitle>
                        <CardDescription class="text-xs">{l.address}</CardDescription>
                    </CardHeader>
                    <CardContent class="flex flex-col gap-3">
                        <div class="flex flex-wrap gap-2">
                            {[l.area, l.pg_type]
                                .into_iter()
                                .filter(|tag| !tag.is_empty())
                                .map(|tag| view! { <Badge>{tag}</Badge> })
                                .collect_view()}
                        </div>
                        <div class="flex gap-2 overflow-x-auto">
                            {l
                                .image_urls
                                .iter()
                                .map(|p| {
                                    view! {
                                        <img
                                            class="h-28 w-40 shrink-0 rounded-md object-cover"
                                            src=asset_url(&api_base, p)
                                            alt="PG photo"
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    </CardContent>
                </Card>
            }
        })
    }
}

#[component]
fn RoomList(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <div class="flex flex-col gap-2">
            <h2 class="text-sm font-semibold">"Rooms"</h2>
            {move || {
                let rooms = app.detail.get().rooms;
                if rooms.is_empty() && !app.detail_loading.get() {
                    return view! {
                        <div class="text-xs text-muted-foreground">"No rooms listed."</div>
                    }
                        .into_any();
                }
                view! {
                    <CardGrid>
                        {rooms
                            .into_iter()
                            .map(|room| view! { <RoomCard ctl=ctl room=room /> })
                            .collect_view()}
                    </CardGrid>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn RoomCard(ctl: PanelController, room: Room) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let room_id = room.id;
    let rent = room.monthly_rent();
    let selected = move || app.booking.room_id.get() == Some(room_id);

    let title = if room.room_type.is_empty() {
        format!("Room #{room_id}")
    } else {
        room.room_type.clone()
    };

    view! {
        <div class=move || if selected() { "rounded-xl ring-2 ring-success" } else { "rounded-xl" }>
            <Card>
                <CardHeader>
                    <CardTitle class="text-sm">{title}</CardTitle>
                    <CardDescription class="text-xs">
                        {format!("{} beds available", room.available_beds)}
                    </CardDescription>
                </CardHeader>
                <CardContent class="grid grid-cols-2 gap-1 text-xs">
                    <span class="text-muted-foreground">"Rent / month"</span>
                    <span>{money(Some(rent))}</span>
                    <span class="text-muted-foreground">"Deposit"</span>
                    <span>{money(Some(DEPOSIT_FIXED))}</span>
                    <span class="text-muted-foreground">"Platform fee"</span>
                    <span>{money(Some(PLATFORM_FIXED))}</span>
                    <span class="font-medium">"Total"</span>
                    <span class="font-medium">{money(Some(total_price(rent)))}</span>
                </CardContent>
                <CardFooter>
                    {move || {
                        let (variant, text) = if selected() {
                            (ButtonVariant::Success, "Selected")
                        } else {
                            (ButtonVariant::Outline, "Select")
                        };
                        view! {
                            <Button size=ButtonSize::Sm variant=variant on:click=move |_| ctl.select_room(room_id)>
                                {text}
                            </Button>
                        }
                    }}
                </CardFooter>
            </Card>
        </div>
    }
}

#[component]
fn BookingFormCard(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let form = app.booking;
    let booking = move || app.is_pending(PendingAction::CreateBooking);
    let can_submit = move || form.snapshot().can_submit(app.customer_id());

    let types = [BookingType::Fixed, BookingType::Unlimited]
        .into_iter()
        .map(|t| SelectChoice::new(t.as_ref(), t.label()))
        .collect::<Vec<_>>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctl.create_booking();
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Book a bed"</CardTitle>
                <CardDescription class="text-xs">
                    {move || match form.room_id.get() {
                        Some(id) => format!("Room #{id} selected"),
                        None => "Select a room above to continue.".to_string(),
                    }}
                </CardDescription>
            </CardHeader>
            <CardContent>
                <form class="grid gap-3 sm:grid-cols-2" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="booking-type">"Booking type"</Label>
                        <NativeSelect
                            id="booking-type"
                            class="h-8"
                            choices=types
                            value=Signal::derive(move || form.booking_type.get().to_string())
                            on_change=Callback::new(move |v: String| {
                                form.booking_type.set(v.parse::<BookingType>().unwrap_or_default())
                            })
                        />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="booking-beds">"Beds"</Label>
                        <Input id="booking-beds" r#type="number" min="1" class="h-8" bind_value=form.beds />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="booking-start">"Start date"</Label>
                        <Input id="booking-start" r#type="date" class="h-8" bind_value=form.start_date />
                    </div>
                    <Show
                        when=move || form.booking_type.get() == BookingType::Fixed
                        fallback=|| view! {
                            <div class="flex items-end text-xs text-muted-foreground">"Open-ended stay"</div>
                        }
                    >
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="booking-end">"End date"</Label>
                            <Input id="booking-end" r#type="date" class="h-8" bind_value=form.end_date />
                        </div>
                    </Show>
                    <div class="flex flex-col gap-1.5 sm:col-span-2">
                        <Label html_for="booking-upi">"Your UPI ID"</Label>
                        <Input id="booking-upi" placeholder="name@bank" class="h-8" bind_value=form.customer_upi />
                    </div>

                    <div class="flex items-center gap-2 sm:col-span-2">
                        <Button size=ButtonSize::Sm attr:disabled=move || booking() || !can_submit()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=booking fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if booking() { "Booking..." } else { "Book Now" }}
                            </span>
                        </Button>
                        <Button
                            attr:r#type="button"
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Ghost
                            on:click=move |_| ctl.clear_selection()
                        >
                            "Clear"
                        </Button>
                    </div>
                </form>
            </CardContent>
            <CardFooter>
                <NoticeBanner notice=form.notice />
            </CardFooter>
        </Card>
    }
}
