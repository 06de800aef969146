//! Create/edit dialog shared by "Add New" and row editing

use leptos::prelude::*;

use crate::form::{FieldKind, REQUIRED_HINT};
use crate::records::RecordsState;

/// Modal form over the editor held in `state`
#[component]
pub fn RecordEditorDialog(
    state: RwSignal<RecordsState>,
    id_field: String,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    // Only the field list drives the layout; typing must not rebuild inputs
    let fields = Memo::new(move |_| {
        state.with(|s| {
            s.editor
                .form()
                .map(|form| form.fields(&id_field).map(str::to_string).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
            <div class="bg-white rounded-lg p-6 max-w-3xl w-full mx-4 max-h-[90vh] overflow-y-auto">
                <div class="flex justify-between items-center mb-4">
                    <h3 class="text-lg font-semibold">{move || state.with(|s| s.editor.title())}</h3>
                    <button class="text-gray-400 hover:text-gray-600" on:click=move |_| on_cancel.run(())>
                        <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                        </svg>
                    </button>
                </div>

                <Show when=move || state.with(|s| s.save_error.is_some())>
                    <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded mb-4 text-sm">
                        {move || state.with(|s| s.save_error.clone().unwrap_or_default())}
                    </div>
                </Show>

                <div class="flex flex-col gap-4">
                    {move || fields.get().into_iter().map(|field| view! {
                        <FieldInput field=field state=state />
                    }).collect::<Vec<_>>()}
                </div>

                <div class="flex justify-end gap-3 mt-6 pt-4 border-t border-gray-200">
                    <button
                        class="px-4 py-2 text-gray-600 hover:bg-gray-100 rounded-lg"
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50"
                        disabled=move || state.with(|s| s.saving)
                        on:click=move |_| on_save.run(())
                    >
                        {move || if state.with(|s| s.saving) { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FieldInput(field: String, state: RwSignal<RecordsState>) -> impl IntoView {
    let kind = FieldKind::classify(&field);
    let label = format!("{} *", field.to_uppercase());

    let value = {
        let field = field.clone();
        move || state.with(|s| s.editor.form().map(|f| f.value(&field)).unwrap_or_default())
    };
    let on_input = {
        let field = field.clone();
        move |ev: web_sys::Event| {
            let text = event_target_value(&ev);
            state.update(|s| s.update_field(&field, text));
        }
    };
    let hint = {
        let value = value.clone();
        move || if value().is_empty() { REQUIRED_HINT } else { kind.helper_text() }
    };
    let hint_class = {
        let value = value.clone();
        move || if value().is_empty() { "mt-1 text-xs text-red-500" } else { "mt-1 text-xs text-gray-500" }
    };
    let border = {
        let value = value.clone();
        move || {
            format!(
                "w-full px-3 py-2 border rounded-lg focus:ring-blue-500 focus:border-blue-500 {}",
                if value().is_empty() { "border-red-400" } else { "border-gray-300" }
            )
        }
    };

    let input = match kind {
        FieldKind::TextArea => view! {
            <textarea
                rows=4
                required
                class=border
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Date => view! {
            <input
                type="date"
                required
                class=border
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input
                type="text"
                required
                class=border
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
            {input}
            <p class=hint_class>{hint}</p>
        </div>
    }
}
