use crate::api::UploadFile;
use crate::components::notice::NoticeBanner;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, FileInput, Label, Spinner,
};
use crate::drafts::PaymentContext;
use crate::pricing::money;
use crate::state::{AppContext, Notice, PanelController, PendingAction};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

const FALLBACK_MIME: &str = "application/octet-stream";

async fn read_upload_file(file: web_sys::File) -> Result<UploadFile, String> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read file: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();

    let mime = file.type_();
    Ok(UploadFile {
        file_name: file.name(),
        mime: if mime.is_empty() { FALLBACK_MIME.to_string() } else { mime },
        bytes,
    })
}

#[component]
pub(super) fn PaymentScreen(ctl: PanelController) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let file_ref: NodeRef<html::Input> = NodeRef::new();
    let uploading = move || app.is_pending(PendingAction::UploadPayment);

    let on_pick = Callback::new(move |file: Option<web_sys::File>| {
        let Some(file) = file else {
            ctl.clear_payment_file();
            return;
        };
        spawn_local(async move {
            match read_upload_file(file).await {
                Ok(upload) => {
                    tracing::debug!("picked {} ({} bytes)", upload.file_name, upload.bytes.len());
                    ctl.pick_payment_file(Some(upload));
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    ctl.clear_payment_file();
                    app.payment_notice.set(Some(Notice::error(e)));
                }
            }
        });
    });

    let on_clear = move |_| {
        ctl.clear_payment_file();
        if let Some(input) = file_ref.get_untracked() {
            input.set_value("");
        }
    };

    view! {
        <section class="flex flex-col gap-4">
            <div class="flex flex-wrap items-center gap-2">
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Ghost
                    on:click=move |_| ctl.back_from_payment()
                >
                    "← Back"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Outline
                    on:click=move |_| ctl.show_my_bookings()
                >
                    "My Bookings"
                </Button>
            </div>

            <Card>
                <CardHeader>
                    <CardTitle class="text-base">"Pay the owner"</CardTitle>
                    <CardDescription class="text-xs">
                        "Pay the amount below by UPI, then upload the payment screenshot."
                    </CardDescription>
                </CardHeader>
                <CardContent class="flex flex-col gap-3">
                    {move || {
                        let ctx = app.payment.with(|p| p.context.clone());
                        match ctx {
                            Some(ctx) => view! { <PaymentDetails ctx=ctx /> }.into_any(),
                            None => {
                                view! {
                                    <div class="text-xs text-muted-foreground">"No booking selected."</div>
                                }
                                    .into_any()
                            }
                        }
                    }}

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="payment-file">"Payment screenshot"</Label>
                        <FileInput id="payment-file" on_pick=on_pick node_ref=file_ref />
                        {move || {
                            app.payment
                                .with(|p| p.file.as_ref().map(|f| f.file_name.clone()))
                                .map(|name| {
                                    view! { <span class="text-xs text-muted-foreground">{name}</span> }
                                })
                        }}
                    </div>

                    <div class="flex items-center gap-2">
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=uploading
                            on:click=move |_| ctl.upload_payment()
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=uploading fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if uploading() { "Uploading..." } else { "Upload screenshot" }}
                            </span>
                        </Button>
                        <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost on:click=on_clear>
                            "Clear"
                        </Button>
                    </div>
                </CardContent>
                <CardFooter>
                    <NoticeBanner notice=app.payment_notice />
                </CardFooter>
            </Card>
        </section>
    }
}

#[component]
fn PaymentDetails(ctx: PaymentContext) -> impl IntoView {
    view! {
        <div class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 text-sm">
            <span class="text-muted-foreground">"Booking"</span>
            <span>{format!("#{}", ctx.booking_id)}</span>
            <span class="text-muted-foreground">"Owner UPI"</span>
            <span class="font-mono">{ctx.owner_upi_label()}</span>
            <span class="text-muted-foreground">"Amount"</span>
            <span class="font-medium">{money(ctx.amount)}</span>
        </div>
        <p class="text-xs text-muted-foreground">{ctx.note_label()}</p>
    }
}
