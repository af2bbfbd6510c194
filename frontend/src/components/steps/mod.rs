//! One component per wizard step.
//!
//! Steps receive read-only snapshots of the wizard through their props and tell
//! the controller what happened through a single `on_report` callback. A step
//! owns the request it issues; once it is unmounted, a late response has no
//! component left to land in.

use common::model::connection::ConnectionConfig;
use common::model::file::UploadedFile;
use common::model::schema::TableSchema;
use common::model::selection::ColumnSelection;
use yew::prelude::*;

pub mod columns;
pub mod connection;
pub mod direction;
pub mod file;
pub mod preview;
pub mod tables;

#[derive(Debug, Clone, PartialEq)]
pub enum StepReport {
    /// The backend accepted this connection.
    Connected(ConnectionConfig),
    TableSelected(String),
    ColumnsLoaded { table: String, columns: TableSchema },
    ColumnToggled(String),
    AllColumnsToggled,
    FileSelected(UploadedFile),
    DelimiterChanged(char),
    ExportFileNameChanged(String),
    SubmitRequested,
}

/// Checkbox list over `selection` with a select-all toggle on top.
pub fn column_checklist(selection: &ColumnSelection, on_report: &Callback<StepReport>) -> Html {
    let toggle_all = on_report.reform(|_: Event| StepReport::AllColumnsToggled);

    html! {
        <div class="column-list">
            <label class="column-item select-all">
                <input
                    type="checkbox"
                    checked={selection.is_all_selected()}
                    onchange={toggle_all}
                />
                <span>{"Select all"}</span>
            </label>
            { for selection.available().iter().map(|column| {
                let name = column.name.clone();
                let onchange = on_report.reform(move |_: Event| StepReport::ColumnToggled(name.clone()));
                html! {
                    <label class="column-item" key={column.name.clone()}>
                        <input
                            type="checkbox"
                            checked={selection.is_selected(&column.name)}
                            {onchange}
                        />
                        <span class="column-name">{ &column.name }</span>
                        if let Some(data_type) = &column.data_type {
                            <span class="column-type">{ data_type }</span>
                        }
                    </label>
                }
            }) }
            <div class="hint">
                { format!(
                    "{} of {} columns selected",
                    selection.selected().len(),
                    selection.available().len()
                ) }
            </div>
        </div>
    }
}

/// Inline error line, rendered only when there is something to show.
pub fn inline_error(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! {
            <div class="inline-error">
                <i class="material-icons">{"error_outline"}</i>
                <span>{ message }</span>
            </div>
        },
        None => html! {},
    }
}

pub fn spinner(label: &str) -> Html {
    html! {
        <div class="loading">
            <div class="spin"></div>
            <span>{ label }</span>
        </div>
    }
}
