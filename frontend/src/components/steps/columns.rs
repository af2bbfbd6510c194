use common::error::ApiError;
use common::load::LoadState;
use common::model::connection::ConnectionConfig;
use common::model::schema::TableSchema;
use common::model::selection::ColumnSelection;
use common::requests::RequestContext;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{column_checklist, inline_error, spinner, StepReport};
use crate::api;

pub enum Msg {
    Fetch,
    Fetched(String, Result<TableSchema, ApiError>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub ctx: RequestContext,
    pub connection: ConnectionConfig,
    pub table: String,
    pub selection: ColumnSelection,
    pub on_report: Callback<StepReport>,
}

/// Describes the selected table and lets the user pick the exported columns.
/// The selection itself lives in the wizard; this step only tracks the fetch.
pub struct ColumnsStep {
    load: LoadState<()>,
}

impl Component for ColumnsStep {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            load: LoadState::Idle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                if self.load.is_loading() {
                    return false;
                }
                self.load = LoadState::Loading;
                let link = ctx.link().clone();
                let api_ctx = ctx.props().ctx.clone();
                let connection = ctx.props().connection.clone();
                let table = ctx.props().table.clone();
                spawn_local(async move {
                    let result = api::describe_table(&api_ctx, &connection, &table).await;
                    link.send_message(Msg::Fetched(table, result));
                });
                true
            }
            Msg::Fetched(table, result) => {
                match result {
                    Ok(columns) => {
                        self.load = LoadState::Loaded(());
                        ctx.props()
                            .on_report
                            .emit(StepReport::ColumnsLoaded { table, columns });
                    }
                    Err(err) => {
                        log::warn!("describing {} failed: {}", table, err);
                        self.load = LoadState::Failed(err.to_string());
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let body = match &self.load {
            LoadState::Failed(message) => inline_error(Some(message)),
            LoadState::Loaded(()) if props.selection.available().is_empty() => html! {
                <div class="empty">{ format!("No columns found in {}", props.table) }</div>
            },
            LoadState::Idle | LoadState::Loading if props.selection.available().is_empty() => {
                spinner("Loading columns...")
            }
            _ => column_checklist(&props.selection, &props.on_report),
        };

        html! {
            <div class="columns-step">
                <div class="toolbar">
                    <span class="step-subtitle">{ format!("Columns of {}", props.table) }</span>
                    <button
                        class="icon-btn"
                        title="Refresh"
                        disabled={self.load.is_loading()}
                        onclick={ctx.link().callback(|_| Msg::Fetch)}
                    >
                        <i class="material-icons">{"refresh"}</i>
                    </button>
                </div>
                { body }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Fetch);
        }
    }
}
