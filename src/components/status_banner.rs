//! Status Banner Component
//!
//! Last error message and the loading indicator.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn StatusBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let error = move || ctx.state.with(|s| s.status.error.clone());

    view! {
        {move || error().map(|message| view! {
            <p class="error-message">"Error: " {message}</p>
        })}
        <Show when=move || ctx.busy()>
            <p>"Loading..."</p>
        </Show>
    }
}
