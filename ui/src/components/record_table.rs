use leptos::prelude::*;

use crate::types::{display_value, Record};

/// Table of records with per-row edit/delete actions.
///
/// Cells follow `columns`; a record without one of the columns gets an
/// empty cell and keys outside the column set are not shown.
#[component]
pub fn RecordTable(
    columns: Vec<String>,
    records: Vec<Record>,
    on_edit: Callback<Record>,
    on_delete: Callback<Record>,
) -> impl IntoView {
    let header = columns.clone();

    view! {
        <div class="bg-white rounded-lg shadow overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200 border border-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        {header.into_iter().map(|column| view! {
                            <th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider border border-gray-200">
                                {column.to_uppercase()}
                            </th>
                        }).collect::<Vec<_>>()}
                        <th class="px-4 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider border border-gray-200">
                            "Actions"
                        </th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {records.into_iter().enumerate().map(|(index, record)| {
                        let cells: Vec<String> = columns
                            .iter()
                            .map(|c| record.get(c).map(display_value).unwrap_or_default())
                            .collect();
                        let record_for_edit = record.clone();
                        let record_for_delete = record;
                        view! {
                            <tr class=if index % 2 == 0 { "bg-gray-50" } else { "bg-white" }>
                                {cells.into_iter().map(|text| view! {
                                    <td class="px-4 py-2 align-top border border-gray-200">
                                        <pre class="m-0 max-h-[200px] overflow-y-auto whitespace-pre-wrap break-words font-sans text-sm">
                                            {text}
                                        </pre>
                                    </td>
                                }).collect::<Vec<_>>()}
                                <td class="px-4 py-2 text-center whitespace-nowrap border border-gray-200">
                                    <button
                                        class="text-blue-600 hover:text-blue-900 mr-3"
                                        title="Edit"
                                        on:click=move |_| on_edit.run(record_for_edit.clone())
                                    >
                                        "Edit"
                                    </button>
                                    <button
                                        class="text-red-600 hover:text-red-900"
                                        title="Delete"
                                        on:click=move |_| on_delete.run(record_for_delete.clone())
                                    >
                                        "Delete"
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
}
