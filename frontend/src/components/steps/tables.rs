use common::error::ApiError;
use common::load::LoadState;
use common::model::connection::ConnectionConfig;
use common::requests::RequestContext;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{inline_error, spinner, StepReport};
use crate::api;

pub enum Msg {
    Fetch,
    Fetched(Result<Vec<String>, ApiError>),
    Filter(String),
    Select(String),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub ctx: RequestContext,
    pub connection: ConnectionConfig,
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_report: Callback<StepReport>,
}

/// Lists the tables of the connected database and reports the chosen one.
pub struct TablesStep {
    tables: LoadState<Vec<String>>,
    filter: String,
}

impl Component for TablesStep {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            tables: LoadState::Idle,
            filter: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                if self.tables.is_loading() {
                    return false;
                }
                self.tables = LoadState::Loading;
                let link = ctx.link().clone();
                let api_ctx = ctx.props().ctx.clone();
                let connection = ctx.props().connection.clone();
                spawn_local(async move {
                    let result = api::list_tables(&api_ctx, &connection).await;
                    link.send_message(Msg::Fetched(result));
                });
                true
            }
            Msg::Fetched(result) => {
                if let Err(err) = &result {
                    log::warn!("listing tables failed: {}", err);
                }
                self.tables = result.into();
                true
            }
            Msg::Filter(filter) => {
                self.filter = filter;
                true
            }
            Msg::Select(table) => {
                ctx.props().on_report.emit(StepReport::TableSelected(table));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let selected = ctx.props().selected.as_deref();

        let body = match &self.tables {
            LoadState::Idle | LoadState::Loading => spinner("Loading tables..."),
            LoadState::Failed(message) => inline_error(Some(message)),
            LoadState::Loaded(tables) if tables.is_empty() => html! {
                <div class="empty">{"No tables found in database"}</div>
            },
            LoadState::Loaded(tables) => {
                let needle = self.filter.trim().to_lowercase();
                html! {
                    <ul class="table-list">
                        { for tables
                            .iter()
                            .filter(|t| needle.is_empty() || t.to_lowercase().contains(&needle))
                            .map(|table| {
                                let name = table.clone();
                                let onclick = link.callback(move |_| Msg::Select(name.clone()));
                                html! {
                                    <li
                                        key={table.clone()}
                                        class={classes!("table-item", (selected == Some(table.as_str())).then_some("selected"))}
                                        {onclick}
                                    >
                                        <i class="material-icons">{"table_chart"}</i>
                                        <span>{ table }</span>
                                    </li>
                                }
                            }) }
                    </ul>
                }
            }
        };

        html! {
            <div class="tables-step">
                <div class="toolbar">
                    <input
                        type="search"
                        placeholder="Filter tables"
                        value={self.filter.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Filter(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                    <button
                        class="icon-btn"
                        title="Refresh"
                        disabled={self.tables.is_loading()}
                        onclick={link.callback(|_| Msg::Fetch)}
                    >
                        <i class="material-icons">{"refresh"}</i>
                    </button>
                </div>
                { body }
                if let Some(table) = selected {
                    <div class="hint">{ format!("Selected table: {}", table) }</div>
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Fetch);
        }
    }
}
