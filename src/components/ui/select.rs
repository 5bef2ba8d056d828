use leptos::prelude::*;
use tw_merge::*;
use wasm_bindgen::JsCast;

/// One `<option>`: submitted value and visible text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectChoice {
    pub value: String,
    pub label: String,
}

impl SelectChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Plain `<select>` styled like `Input`.
#[component]
pub fn NativeSelect(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] id: String,
    choices: Vec<SelectChoice>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input flex h-9 w-full rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let handle_change = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            on_change.run(select.value());
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            id=id
            prop:value=move || value.get()
            on:change=handle_change
        >
            {choices
                .into_iter()
                .map(|c| {
                    let v = c.value.clone();
                    view! {
                        <option value=c.value selected=move || value.get() == v>
                            {c.label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
