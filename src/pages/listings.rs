use crate::components::ui::{
    Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardGrid, CardHeader, CardTitle, Input, Spinner,
};
use crate::models::Listing;
use crate::state::{AppContext, PanelController};
use crate::util::asset_url;
use leptos::prelude::*;

#[component]
pub(super) fn ListingsScreen(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctl.load_listings();
    };

    view! {
        <section class="flex flex-col gap-3">
            <form class="flex flex-wrap items-center gap-2" on:submit=on_search>
                <Input
                    class="h-8 max-w-xs"
                    placeholder="Filter by area"
                    bind_value=app.area_filter
                />
                <Button size=ButtonSize::Sm variant=ButtonVariant::Outline>
                    "Refresh"
                </Button>
                <Show when=move || app.listings_loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </form>

            {move || {
                let listings = app.listings.get();
                if listings.is_empty() && !app.listings_loading.get() {
                    return view! {
                        <div class="py-8 text-center text-xs text-muted-foreground">"No PG found."</div>
                    }
                        .into_any();
                }
                let api_base = app.api_base();
                view! {
                    <CardGrid>
                        {listings
                            .into_iter()
                            .map(|l| view! { <ListingCard ctl=ctl listing=l api_base=api_base.clone() /> })
                            .collect_view()}
                    </CardGrid>
                }
                    .into_any()
            }}
        </section>
    }
}

#[component]
fn ListingCard(ctl: PanelController, listing: Listing, api_base: String) -> impl IntoView {
    let pg_id = listing.id;
    let cover = listing.cover_image().map(|p| asset_url(&api_base, p));

    view! {
        <Card class="overflow-hidden pt-0">
            {match cover {
                Some(src) => {
                    view! { <img class="h-40 w-full object-cover" src=src alt=listing.name.clone() /> }
                        .into_any()
                }
                None => {
                    view! {
                        <div class="flex h-40 w-full items-center justify-center bg-muted text-xs text-muted-foreground">
                            "No photo"
                        </div>
                    }
                        .into_any()
                }
            }}
            <CardHeader>
                <CardTitle class="text-base">{listing.name}</CardTitle>
                <CardDescription class="text-xs">{listing.address}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-wrap gap-2">
                {[listing.area, listing.pg_type]
                    .into_iter()
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| view! { <Badge>{tag}</Badge> })
                    .collect_view()}
            </CardContent>
            <CardFooter>
                <Button size=ButtonSize::Sm on:click=move |_| ctl.open_details(pg_id)>
                    "View details"
                </Button>
            </CardFooter>
        </Card>
    }
}
