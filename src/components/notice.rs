use crate::components::ui::{Alert, AlertDescription};
use crate::state::{Notice, Tone};
use leptos::prelude::*;

/// Inline success / error line under a form.
#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let (frame, text) = match n.tone {
                Tone::Success => ("border-success/30", "text-success"),
                Tone::Error => ("border-destructive/30", "text-destructive"),
            };
            view! {
                <Alert class=frame>
                    <AlertDescription class=format!("{text} text-xs")>{n.display()}</AlertDescription>
                </Alert>
            }
        })
    }
}

/// Page-level error banner.
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            {move || {
                error.get().map(|e| {
                    view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                        </Alert>
                    }
                })
            }}
        </Show>
    }
}
