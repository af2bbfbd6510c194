//! Last step before the transfer: shows a sample of the data and submits.
//!
//! For an ingest the sample comes from the uploaded file. For an export it is
//! fetched from the backend with the export body minus the file name.

use common::error::ApiError;
use common::load::LoadState;
use common::model::direction::Direction;
use common::model::preview::PreviewTable;
use common::requests::{PreviewRequest, RequestContext};
use serde_json::{Map, Value};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{inline_error, spinner, StepReport};
use crate::api;

pub enum Msg {
    Fetch,
    Fetched(Vec<String>, Result<Vec<Map<String, Value>>, ApiError>),
    EditFileName(String),
    Submit,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub ctx: RequestContext,
    pub direction: Direction,
    pub table: String,
    #[prop_or_default]
    pub file_preview: Option<PreviewTable>,
    #[prop_or_default]
    pub preview_request: Option<PreviewRequest>,
    #[prop_or_default]
    pub export_file_name: String,
    pub transferring: bool,
    pub on_report: Callback<StepReport>,
}

pub struct PreviewStep {
    remote: LoadState<PreviewTable>,
}

impl Component for PreviewStep {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            remote: LoadState::Idle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                if ctx.props().direction != Direction::DatabaseToFile {
                    return false;
                }
                let Some(request) = ctx.props().preview_request.clone() else {
                    self.remote = LoadState::Failed("Select a table and columns first".to_string());
                    return true;
                };
                if self.remote.is_loading() {
                    return false;
                }
                self.remote = LoadState::Loading;
                let link = ctx.link().clone();
                let api_ctx = ctx.props().ctx.clone();
                spawn_local(async move {
                    let result = api::preview_rows(&api_ctx, &request).await;
                    link.send_message(Msg::Fetched(request.columns, result));
                });
                true
            }
            Msg::Fetched(columns, result) => {
                if let Err(err) = &result {
                    log::warn!("export preview failed: {}", err);
                }
                self.remote = result
                    .map(|rows| PreviewTable::from_records(&columns, &rows))
                    .into();
                true
            }
            Msg::EditFileName(name) => {
                ctx.props()
                    .on_report
                    .emit(StepReport::ExportFileNameChanged(name));
                false
            }
            Msg::Submit => {
                if ctx.props().transferring {
                    return false;
                }
                ctx.props().on_report.emit(StepReport::SubmitRequested);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        let (caption, sample) = match props.direction {
            Direction::FileToDatabase => (
                format!("First lines of the file, to be loaded into {}", props.table),
                match &props.file_preview {
                    Some(table) => preview_table(table),
                    None => html! { <div class="empty">{"No file selected"}</div> },
                },
            ),
            Direction::DatabaseToFile => (
                format!("Sample rows of {}", props.table),
                match &self.remote {
                    LoadState::Idle | LoadState::Loading => spinner("Loading preview..."),
                    LoadState::Failed(message) => inline_error(Some(message)),
                    LoadState::Loaded(table) => preview_table(table),
                },
            ),
        };

        let submit_label = match props.direction {
            Direction::FileToDatabase => "Ingest Data",
            Direction::DatabaseToFile => "Export Data",
        };

        html! {
            <div class="preview-step">
                <div class="step-subtitle">{ caption }</div>
                { sample }

                if props.direction == Direction::DatabaseToFile {
                    <label class="form-field">
                        <span>{"File name"}</span>
                        <input
                            type="text"
                            value={props.export_file_name.clone()}
                            disabled={props.transferring}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::EditFileName(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </label>
                }

                <div class="form-actions">
                    if props.transferring {
                        { spinner("Transferring...") }
                    } else {
                        <button class="primary" onclick={link.callback(|_| Msg::Submit)}>
                            <i class="material-icons">{"play_arrow"}</i>
                            { submit_label }
                        </button>
                    }
                </div>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Fetch);
        }
    }
}

fn preview_table(table: &PreviewTable) -> Html {
    if table.is_empty() {
        return html! { <div class="empty">{"Nothing to preview"}</div> };
    }
    html! {
        <div class="preview-scroll">
            <table class="preview">
                <thead>
                    <tr>{ for table.header().iter().map(|cell| html! { <th>{ cell }</th> }) }</tr>
                </thead>
                <tbody>
                    { for table.rows().iter().map(|row| html! {
                        <tr
                            class={classes!(table.is_malformed(row).then_some("malformed"))}
                            title={table.is_malformed(row).then_some("Cell count differs from the header")}
                        >
                            { for row.iter().map(|cell| html! { <td>{ cell }</td> }) }
                        </tr>
                    }) }
                </tbody>
            </table>
            if table.rows().is_empty() {
                <div class="empty">{"No rows"}</div>
            }
        </div>
    }
}
