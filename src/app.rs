//! Item Desk Frontend App
//!
//! Single page: status line, add/edit form, item list.

use leptos::prelude::*;

use item_sync::{ApiConfig, HttpCollection};

use crate::components::{ItemForm, ItemList, StatusBanner};
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::default();
    log::info!("[APP] Item service at {}", config.base_url());

    match HttpCollection::new(&config) {
        Ok(remote) => view! { <ItemDesk remote=remote /> }.into_any(),
        Err(e) => {
            log::error!("[APP] {}", e);
            view! {
                <div class="App">
                    <p class="error-message">"Error: " {e.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn ItemDesk(remote: HttpCollection) -> impl IntoView {
    let ctx = AppContext::new(remote);
    provide_context(ctx);

    // Load items on mount
    Effect::new(move |_| {
        ctx.run(|sync| async move { sync.load().await });
    });

    view! {
        <div class="App">
            <header class="App-header">
                <h1>"Item Management SPA"</h1>
            </header>

            <StatusBanner />
            <ItemForm />
            <ItemList />
        </div>
    }
}
