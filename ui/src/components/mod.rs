pub mod collection_selector;
pub mod record_editor;
pub mod record_table;
pub mod records_panel;
