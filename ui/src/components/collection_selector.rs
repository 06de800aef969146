//! Searchable single-select dropdown listing the available collections.
//!
//! The selected name is owned by the parent: this component only reads it
//! and reports choices through `on_change`.

use leptos::html::Div;
use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;
use crate::selector::{SelectorEvent, SelectorState};

#[component]
pub fn CollectionSelector(
    /// Currently committed selection
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Receives every selection, including the automatic first pick
    on_change: Callback<String>,
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let state = RwSignal::new(SelectorState::default());
    let root_ref = NodeRef::<Div>::new();

    // Responses arriving after unmount are dropped
    let mounted = Arc::new(AtomicBool::new(true));
    {
        let mounted = mounted.clone();
        on_cleanup(move || mounted.store(false, Ordering::Relaxed));
    }

    let load = move || {
        let client = client.clone();
        let mounted = mounted.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = client.list_collections().await;
            if !mounted.load(Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(names) => {
                    log::info!("Loaded {} collections", names.len());
                    state.update(|s| s.loaded(names));
                }
                Err(e) => {
                    log::error!("Failed to load collections: {}", e);
                    state.update(|s| s.failed());
                }
            }
        });
    };

    let initial_load = load.clone();
    Effect::new(move |_| initial_load());

    let emit = move |event: SelectorEvent| match event {
        SelectorEvent::Selected(name) => on_change.run(name),
    };

    // Default to the first collection when nothing is chosen yet
    Effect::new(move |_| {
        let current = value.get();
        if let Some(event) = state.with(|s| s.auto_select(current.as_deref())) {
            emit(event);
        }
    });

    // Pointer-down anywhere outside the component closes the panel
    let handle = window_event_listener(leptos::ev::mousedown, move |ev| {
        let Some(root) = root_ref.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| root.contains(Some(&node)));
        if !inside && state.with_untracked(|s| s.open) {
            state.update(|s| s.dismiss());
        }
    });
    on_cleanup(move || handle.remove());

    let retry = move |_| {
        state.update(|s| s.retry());
        load();
    };

    view! {
        <div class="w-full max-w-md" node_ref=root_ref>
            {label.map(|l| view! {
                <label class="block text-sm font-medium text-gray-700 mb-1">{l}": "</label>
            })}
            <div
                class=move || format!(
                    "relative select-none border border-gray-300 rounded-lg bg-white {}",
                    if state.with(|s| s.is_interactive()) { "cursor-pointer" } else { "cursor-not-allowed opacity-75" }
                )
                on:click=move |_| state.update(|s| s.toggle())
            >
                <div class="flex items-center justify-between px-3 py-2">
                    <span class="truncate">
                        {move || {
                            if state.with(|s| s.is_loading()) {
                                "Loading...".to_string()
                            } else {
                                value.get().unwrap_or_else(|| "Select a collection".to_string())
                            }
                        }}
                    </span>
                    <svg class="w-4 h-4 text-gray-500" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path
                            stroke-linecap="round"
                            stroke-linejoin="round"
                            stroke-width="2"
                            d=move || if state.with(|s| s.open) { "M5 15l7-7 7 7" } else { "M19 9l-7 7-7-7" }
                        />
                    </svg>
                </div>

                <Show when=move || state.with(|s| s.open && s.is_interactive())>
                    <div
                        class="absolute left-0 right-0 top-full mt-1 z-20 bg-white border border-gray-300 rounded-lg shadow-lg"
                        on:click=move |ev| ev.stop_propagation()
                    >
                        <div class="p-2 border-b border-gray-100">
                            <input
                                type="text"
                                autofocus
                                class="w-full px-2 py-1.5 border border-gray-300 rounded focus:ring-blue-500 focus:border-blue-500"
                                placeholder="Search collections..."
                                prop:value=move || state.with(|s| s.search.clone())
                                on:input=move |ev| {
                                    let query = event_target_value(&ev);
                                    state.update(|s| s.set_search(query));
                                }
                            />
                        </div>
                        <div class="max-h-60 overflow-y-auto">
                            {move || {
                                let names = state.with(|s| s.filtered());
                                if names.is_empty() {
                                    view! { <div class="px-3 py-2 text-sm text-gray-500">"No matches"</div> }.into_any()
                                } else {
                                    names.into_iter().map(|name| {
                                        let is_current = value.get().as_deref() == Some(name.as_str());
                                        let name_for_click = name.clone();
                                        view! {
                                            <div
                                                class=format!(
                                                    "px-3 py-2 cursor-pointer hover:bg-blue-50 {}",
                                                    if is_current { "bg-blue-50 font-medium" } else { "" }
                                                )
                                                on:click=move |_| {
                                                    let event = state.try_update(|s| s.select(&name_for_click));
                                                    if let Some(event) = event {
                                                        emit(event);
                                                    }
                                                }
                                            >
                                                {name}
                                            </div>
                                        }
                                    }).collect::<Vec<_>>().into_any()
                                }
                            }}
                        </div>
                    </div>
                </Show>
            </div>

            {move || {
                let retry = retry.clone();
                state.with(|s| s.error().map(str::to_string)).map(move |e| view! {
                    <div class="mt-2 flex items-center gap-3 p-2 bg-red-50 border border-red-200 rounded text-red-800 text-sm">
                        <span>{e}</span>
                        <button class="text-red-700 underline hover:text-red-900" on:click=retry>
                            "Retry"
                        </button>
                    </div>
                })
            }}
        </div>
    }
}
