use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const INPUT_CLASS: &str = "file:text-foreground placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none file:inline-flex file:h-7 file:border-0 file:bg-transparent file:text-sm file:font-medium disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm";

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] min: String,

    // Manual wiring instead of `bind:value`; stable across Leptos versions.
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        INPUT_CLASS,
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            bind_value.set(input.value());
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            min=min
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
}

/// File picker. Reports the chosen file, or `None` when the selection is cleared.
#[component]
pub fn FileInput(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, default = "image/*")] accept: &'static str,
    on_pick: Callback<Option<web_sys::File>>,
    /// Lets the owner reset the native control after clearing its own state.
    #[prop(optional)]
    node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(INPUT_CLASS, "h-auto py-1.5", class);

    let on_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        on_pick.run(file);
    };

    view! {
        <input
            data-name="FileInput"
            type="file"
            accept=accept
            class=merged_class
            id=id
            on:change=on_change
            node_ref=node_ref
        />
    }
}
