//! Records of the selected collection: list, add/edit dialog and delete
//! confirmation.

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::ApiClient;
use crate::components::record_editor::RecordEditorDialog;
use crate::components::record_table::RecordTable;
use crate::config::RuntimeConfig;
use crate::records::{LoadTicket, Notice, RecordsState, RecordsView, WriteRequest, DELETE_FAILED, SAVE_SUCCEEDED};
use crate::types::Record;

#[component]
pub fn RecordsPanel(#[prop(into)] collection: Signal<Option<String>>) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let config = expect_context::<RuntimeConfig>();
    let id_field = config.id_field.clone();
    let policy = config.required_policy();

    let state = RwSignal::new(RecordsState::default());
    let notice = RwSignal::new(Notice::default());
    // Replacing the handle cancels the previous banner's timer
    let notice_timer = StoredValue::new_local(None::<Timeout>);

    let fetch = {
        let client = client.clone();
        move |ticket: LoadTicket| {
            let client = client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.list_records(&ticket.collection).await.map_err(|e| {
                    log::error!("Failed to load records for {}: {}", ticket.collection, e);
                    e.user_message()
                });
                let applied = state.try_update(|s| s.finish_load(ticket, result)).unwrap_or(false);
                if !applied {
                    log::debug!("Discarded a stale records response");
                }
            });
        }
    };

    // Selection changes drop the old list before the new one is requested
    let fetch_on_change = fetch.clone();
    Effect::new(move |_| match collection.get() {
        Some(name) => {
            if let Some(ticket) = state.try_update(|s| s.begin_load(&name)) {
                fetch_on_change(ticket);
            }
        }
        None => state.update(|s| s.clear()),
    });

    // Typing in the dialog must not touch the list: only a new revision does
    let view_revision = Memo::new(move |_| state.with(|s| s.view_revision()));
    let view_state = Memo::new(move |_| {
        view_revision.track();
        state.with_untracked(|s| s.view().clone())
    });
    let schema = {
        let config = config.clone();
        let id_field = id_field.clone();
        Memo::new(move |_| {
            view_revision.track();
            state.with_untracked(|s| {
                let declared = s.collection().and_then(|name| config.declared_fields(name));
                s.schema(declared, &id_field)
            })
        })
    };
    let can_add = move || {
        view_state.with(|v| matches!(v, RecordsView::Loaded { .. }))
            && schema.with(|s| s.as_ref().is_some_and(|s| !s.is_empty()))
    };

    let on_add = move |_| {
        let today = today_utc();
        let opened = state
            .try_update(|s| s.handle_add_new(schema.get_untracked().as_ref(), today))
            .unwrap_or(false);
        if !opened {
            log::warn!("No fields known for this collection; cannot add a record");
        }
    };

    let on_edit = {
        let id_field = id_field.clone();
        Callback::new(move |record: Record| {
            if let Some(Err(msg)) = state.try_update(|s| s.handle_edit(&record, &id_field)) {
                alert(msg);
            }
        })
    };

    let on_delete = {
        let id_field = id_field.clone();
        Callback::new(move |record: Record| {
            if let Some(Err(msg)) = state.try_update(|s| s.request_delete(&record, &id_field)) {
                alert(msg);
            }
        })
    };

    let on_save = {
        let client = client.clone();
        let fetch = fetch.clone();
        let id_field = id_field.clone();
        Callback::new(move |()| {
            let Some(Ok(request)) = state.try_update(|s| s.prepare_save(&id_field, policy)) else {
                return;
            };
            let client = client.clone();
            let fetch = fetch.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match &request {
                    WriteRequest::Create { collection, payload } => client.create_record(collection, payload).await,
                    WriteRequest::Update { collection, id, payload } => {
                        client.update_record(collection, id, payload).await
                    }
                };
                match result {
                    Ok(()) => {
                        log::info!("Saved record in {}", request.collection());
                        if let Some(ticket) = state.try_update(|s| s.save_succeeded(request.collection())).flatten() {
                            fetch(ticket);
                        }
                        let serial = notice.try_update(|n| n.show(SAVE_SUCCEEDED)).unwrap_or_default();
                        let timer = Timeout::new(3000, move || notice.update(|n| n.expire(serial)));
                        notice_timer.set_value(Some(timer));
                    }
                    Err(e) => {
                        log::error!("Failed to save record in {}: {}", request.collection(), e);
                        state.update(|s| s.save_failed(&e.user_message()));
                    }
                }
            });
        })
    };

    let on_cancel = Callback::new(move |()| state.update(|s| s.close_editor()));

    let on_delete_confirm = move |_| {
        let Some((collection, id)) = state.try_update(|s| s.confirm_delete()).flatten() else {
            return;
        };
        let client = client.clone();
        let fetch = fetch.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match client.delete_record(&collection, &id).await {
                Ok(()) => {
                    log::info!("Deleted {} from {}", id, collection);
                    if let Some(ticket) = state.try_update(|s| s.delete_succeeded(&collection)).flatten() {
                        fetch(ticket);
                    }
                }
                Err(e) => {
                    log::error!("Failed to delete {} from {}: {}", id, collection, e);
                    state.update(|s| s.delete_failed());
                    alert(DELETE_FAILED);
                }
            }
        });
    };

    let dialog_id_field = id_field.clone();

    view! {
        <div class="p-6">
            <div class="flex justify-between items-center mb-6">
                <div>
                    <h2 class="text-2xl font-bold">
                        {move || collection.get().unwrap_or_else(|| "Records".to_string())}
                    </h2>
                    {move || view_state.with(|v| match v {
                        RecordsView::Loaded { records, .. } => Some(view! {
                            <p class="text-sm text-gray-600">{format!("Total Records: {}", records.len())}</p>
                        }),
                        _ => None,
                    })}
                </div>
                <div class="flex flex-col items-end">
                    <button
                        class="bg-green-500 hover:bg-green-600 text-white px-4 py-2 rounded flex items-center gap-2 disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || !can_add()
                        on:click=on_add
                    >
                        <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                        </svg>
                        "Add New"
                    </button>
                    <Show when=move || view_state.with(|v| matches!(v, RecordsView::Loaded { .. })) && !can_add()>
                        <span class="mt-1 text-xs text-gray-500">"No fields known for this collection"</span>
                    </Show>
                </div>
            </div>

            {move || notice.with(|n| n.message().map(str::to_string)).map(|msg| view! {
                <div class="mb-4 p-3 bg-green-50 border border-green-200 rounded text-green-800 text-sm">{msg}</div>
            })}

            {move || view_state.with(|v| match v {
                RecordsView::NoCollection => view! {
                    <div class="text-center py-12 text-gray-500">"Select a collection to view its records"</div>
                }.into_any(),
                RecordsView::Loading { .. } => view! {
                    <div class="text-center py-12 text-gray-500">"Loading records..."</div>
                }.into_any(),
                RecordsView::Failed { message, .. } => view! {
                    <div class="p-4 bg-red-50 border border-red-200 rounded text-red-800">
                        {format!("Failed to load records: {}", message)}
                    </div>
                }.into_any(),
                RecordsView::Loaded { records, .. } => match schema.get() {
                    // A declared schema still gives an empty collection its columns
                    Some(schema) => view! {
                        <RecordTable
                            columns=schema.fields
                            records=records.clone()
                            on_edit=on_edit
                            on_delete=on_delete
                        />
                    }.into_any(),
                    None => view! {
                        <div class="text-center py-12 text-gray-500">"No records in this collection"</div>
                    }.into_any(),
                },
            })}

            <Show when=move || state.with(|s| s.editor.is_open())>
                <RecordEditorDialog
                    state=state
                    id_field=dialog_id_field.clone()
                    on_save=on_save
                    on_cancel=on_cancel
                />
            </Show>

            // Delete confirmation modal
            {move || state.with(|s| s.delete_target.clone()).map(|id| view! {
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                    <div class="bg-white rounded-lg shadow-xl p-6 max-w-md w-full mx-4">
                        <h3 class="text-lg font-semibold text-gray-900 mb-2">"Delete Record?"</h3>
                        <p class="text-gray-600 mb-4">
                            "Are you sure you want to delete "
                            <span class="font-mono text-sm bg-gray-100 px-1 rounded">{id.to_string()}</span>
                            "? This action cannot be undone."
                        </p>
                        <div class="flex justify-end gap-3">
                            <button
                                class="px-4 py-2 text-gray-700 border border-gray-300 rounded hover:bg-gray-50"
                                on:click=move |_| state.update(|s| s.cancel_delete())
                                disabled=move || state.with(|s| s.deleting)
                            >
                                "Cancel"
                            </button>
                            <button
                                class="px-4 py-2 bg-red-500 text-white rounded hover:bg-red-600 disabled:opacity-50"
                                on:click=on_delete_confirm.clone()
                                disabled=move || state.with(|s| s.deleting)
                            >
                                {move || if state.with(|s| s.deleting) { "Deleting..." } else { "Delete" }}
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

/// Current calendar day in UTC
fn today_utc() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .unwrap_or_default()
}

fn alert(msg: &str) {
    web_sys::window().and_then(|w| w.alert_with_message(msg).ok());
}
