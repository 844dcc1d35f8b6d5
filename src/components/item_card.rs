//! Item Card Component
//!
//! One item with its edit/delete actions.

use leptos::prelude::*;

use item_sync::Item;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;

#[component]
pub fn ItemCard(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Row actions are off while a request runs or another edit is open
    let locked = move || !ctx.state.with(|s| s.row_actions_enabled());

    let edit_id = item.id.clone();
    let delete_id = item.id.clone();

    view! {
        <li class="item-card">
            <div>
                <h3>{item.name}</h3>
                <p>{item.description}</p>
                <small>"ID: " {item.id.to_string()}</small>
            </div>
            <div class="item-actions">
                <button
                    disabled=locked
                    on:click=move |_| {
                        if let Err(e) = ctx.with_sync(|sync| sync.begin_edit(&edit_id)) {
                            log::warn!("[APP] {}", e);
                        }
                    }
                >
                    "Edit"
                </button>
                <DeleteConfirmButton
                    button_class="delete-button"
                    disabled=Signal::derive(locked)
                    on_confirm=Callback::new(move |_: ()| {
                        let id = delete_id.clone();
                        ctx.run(move |sync| async move { sync.delete(&id).await });
                    })
                />
            </div>
        </li>
    }
}
