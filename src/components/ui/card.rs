use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-5 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col items-start gap-1.5 px-5"}
    clx! {CardTitle, h2, "leading-none font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardContent, div, "px-5"}
    clx! {CardFooter, footer, "flex flex-wrap items-center px-5", "gap-2"}
    // Grid of listing / room / booking cards.
    clx! {CardGrid, div, "grid gap-3 sm:grid-cols-2 lg:grid-cols-3"}
}

pub use components::*;
