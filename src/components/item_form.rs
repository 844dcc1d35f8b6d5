//! Item Form Component
//!
//! One form for both modes: composing a new item, or editing an existing one.
//! Edit mode takes precedence while an edit session is open.

use leptos::prelude::*;

use item_sync::EditSession;

use crate::context::AppContext;

#[component]
pub fn ItemForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let name_value = move || {
        ctx.state.with(|s| match &s.edit {
            EditSession::Editing { name, .. } => name.clone(),
            EditSession::Idle => s.draft.name.clone(),
        })
    };
    let description_value = move || {
        ctx.state.with(|s| match &s.edit {
            EditSession::Editing { description, .. } => description.clone(),
            EditSession::Idle => s.draft.description.clone(),
        })
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.run(|sync| async move { sync.submit().await });
    };

    view! {
        <form class="item-form" on:submit=on_submit>
            <h2>{move || if ctx.editing() { "Edit Item" } else { "Add New Item" }}</h2>
            <div class="form-group">
                <label for="itemName">"Name:"</label>
                <input
                    type="text"
                    id="itemName"
                    placeholder="Item Name"
                    required
                    prop:value=name_value
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.with_sync(|sync| {
                            if sync.is_editing() {
                                sync.set_edit_name(value);
                            } else {
                                sync.set_draft_name(value);
                            }
                        });
                    }
                />
            </div>
            <div class="form-group">
                <label for="itemDesc">"Description:"</label>
                <input
                    type="text"
                    id="itemDesc"
                    placeholder="Item Description"
                    required
                    prop:value=description_value
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.with_sync(|sync| {
                            if sync.is_editing() {
                                sync.set_edit_description(value);
                            } else {
                                sync.set_draft_description(value);
                            }
                        });
                    }
                />
            </div>

            <Show
                when=move || ctx.editing()
                fallback=move || view! {
                    <button type="submit" disabled=move || ctx.busy()>"Add Item"</button>
                }
            >
                <button type="submit" disabled=move || ctx.busy()>"Update Item"</button>
                <button
                    type="button"
                    class="cancel-button"
                    disabled=move || ctx.busy()
                    on:click=move |_| ctx.with_sync(|sync| sync.cancel_edit())
                >
                    "Cancel"
                </button>
            </Show>
        </form>
    }
}
