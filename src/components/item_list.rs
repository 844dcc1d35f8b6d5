//! Item List Component
//!
//! Renders the collection in order, or an empty-state hint.

use leptos::prelude::*;

use crate::components::ItemCard;
use crate::context::AppContext;

#[component]
pub fn ItemList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let is_empty = move || ctx.state.with(|s| s.items.is_empty() && !s.status.busy);
    let items = move || ctx.state.with(|s| s.items.clone());

    view! {
        <div class="items-list">
            <div class="items-header">
                <h2>"Items"</h2>
                <button
                    type="button"
                    class="reload-button"
                    disabled=move || ctx.busy()
                    on:click=move |_| ctx.run(|sync| async move { sync.load().await })
                >
                    "Reload"
                </button>
            </div>
            <Show
                when=is_empty
                fallback=move || view! {
                    <ul>
                        <For
                            each=items
                            // Re-render a card whenever its server copy changes
                            key=|item| (item.id.clone(), item.name.clone(), item.description.clone())
                            children=move |item| view! { <ItemCard item=item /> }
                        />
                    </ul>
                }
            >
                <p>"No items found. Add some!"</p>
            </Show>
        </div>
    }
}
