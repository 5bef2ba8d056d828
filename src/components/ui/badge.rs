use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Badge, span, "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-medium whitespace-nowrap", "bg-muted text-muted-foreground"}
}

pub use components::*;

/// Badge colours for a booking status value.
pub fn status_badge_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "confirmed" | "verified" => "bg-success/15 text-success border-success/30",
        "cancelled" | "rejected" => "bg-destructive/10 text-destructive border-destructive/30",
        "pending" | "submitted" => "bg-warning/15 text-warning border-warning/30",
        _ => "",
    }
}
