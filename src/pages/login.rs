use crate::components::notice::NoticeBanner;
use crate::components::ui::{
    Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Input, Label, NativeSelect, SelectChoice, Spinner,
};
use crate::models::Gender;
use crate::state::{AppContext, PanelController, PendingAction};
use leptos::prelude::*;

/// Login form when logged out, customer badges when logged in.
#[component]
pub(super) fn SessionCard(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <Card>
            <CardContent class="flex flex-col gap-3">
                {move || match app.customer.get() {
                    Some(c) => {
                        view! {
                            <div class="flex flex-wrap items-center gap-2">
                                <Badge>{format!("👤 {}", c.name)}</Badge>
                                <Badge>{format!("📞 {}", c.phone)}</Badge>
                                <Badge>{format!("ID: {}", c.id)}</Badge>
                                <Button
                                    class="ml-auto"
                                    size=ButtonSize::Sm
                                    variant=ButtonVariant::Outline
                                    on:click=move |_| ctl.logout()
                                >
                                    "Logout"
                                </Button>
                            </div>
                        }
                            .into_any()
                    }
                    None => view! { <LoginForm ctl=ctl /> }.into_any(),
                }}
                <NoticeBanner notice=app.login_notice />
            </CardContent>
        </Card>
    }
}

#[component]
fn LoginForm(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let loading = move || app.is_pending(PendingAction::Login);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctl.login();
    };

    let genders = vec![
        SelectChoice::new(Gender::Boy.as_ref(), "Boy"),
        SelectChoice::new(Gender::Girl.as_ref(), "Girl"),
    ];

    view! {
        <CardHeader class="px-0">
            <CardTitle class="text-base">"Customer login"</CardTitle>
            <CardDescription class="text-xs">
                "New numbers are registered automatically."
            </CardDescription>
        </CardHeader>

        <form class="grid gap-3 sm:grid-cols-4 sm:items-end" on:submit=on_submit>
            <div class="flex flex-col gap-1.5">
                <Label html_for="login-name">"Name"</Label>
                <Input id="login-name" placeholder="Your name" bind_value=app.login_name class="h-8" />
            </div>
            <div class="flex flex-col gap-1.5">
                <Label html_for="login-phone">"Phone"</Label>
                <Input
                    id="login-phone"
                    r#type="tel"
                    placeholder="10-digit mobile"
                    bind_value=app.login_phone
                    class="h-8"
                />
            </div>
            <div class="flex flex-col gap-1.5">
                <Label html_for="login-gender">"Gender"</Label>
                <NativeSelect
                    id="login-gender"
                    class="h-8"
                    choices=genders
                    value=Signal::derive(move || app.login_gender.get().to_string())
                    on_change=Callback::new(move |v: String| {
                        app.login_gender.set(v.parse::<Gender>().unwrap_or_default())
                    })
                />
            </div>

            <Button class="w-full" size=ButtonSize::Sm attr:disabled=loading>
                <span class="inline-flex items-center gap-2">
                    <Show when=loading fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if loading() { "Logging in..." } else { "Login" }}
                </span>
            </Button>
        </form>
    }
}
