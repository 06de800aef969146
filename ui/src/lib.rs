use leptos::prelude::*;

mod api;
mod components;
mod config;
mod error;
mod form;
mod records;
mod schema;
mod selector;
mod types;

use api::ApiClient;
use components::collection_selector::CollectionSelector;
use components::records_panel::RecordsPanel;
use config::{resolve_base_url, PageLocation, RuntimeConfig};

#[component]
pub fn App() -> impl IntoView {
    let (runtime_config, set_runtime_config) = signal(Option::<RuntimeConfig>::None);

    wasm_bindgen_futures::spawn_local(async move {
        let config = match api::fetch_runtime_config().await {
            Ok(config) => config.or_else(RuntimeConfig::from_build_env()),
            Err(e) => {
                log::warn!("Host published no runtime config ({}), using build defaults", e);
                RuntimeConfig::from_build_env()
            }
        };
        set_runtime_config.set(Some(config));
    });

    view! {
        {move || match runtime_config.get() {
            Some(config) => view! { <AdminShell config=config /> }.into_any(),
            None => view! {
                <div class="flex h-screen items-center justify-center text-gray-500">"Loading..."</div>
            }.into_any(),
        }}
    }
}

#[component]
fn AdminShell(config: RuntimeConfig) -> impl IntoView {
    let base_url = resolve_base_url(&config, PageLocation::current().as_ref());
    log::info!("Using API at {} ({:?})", base_url, config.environment());
    provide_context(ApiClient::new(base_url));
    provide_context(config);

    let selected = RwSignal::new(Option::<String>::None);

    view! {
        <div class="min-h-screen bg-gray-100">
            <header class="bg-gray-800 text-white px-6 py-4">
                <h1 class="text-2xl font-bold">"Collection Admin"</h1>
            </header>
            <main class="max-w-7xl mx-auto">
                <div class="px-6 pt-6">
                    <CollectionSelector
                        value=selected
                        on_change=Callback::new(move |name: String| selected.set(Some(name)))
                        label="Collection"
                    />
                </div>
                <RecordsPanel collection=selected />
            </main>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
