//! Connection form. The draft is only reported to the wizard once the backend
//! accepts it.

use common::error::ApiError;
use common::model::connection::{parse_port, ConnectionConfig};
use common::requests::RequestContext;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{inline_error, spinner, StepReport};
use crate::api;
use crate::helpers::show_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    Port,
    Database,
    Username,
    Password,
}

pub enum Msg {
    Edit(Field, String),
    Test,
    Tested(ConnectionConfig, Result<(), ApiError>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub ctx: RequestContext,
    /// Previously adopted connection, used to pre-fill the form.
    #[prop_or_default]
    pub adopted: Option<ConnectionConfig>,
    pub on_report: Callback<StepReport>,
}

pub struct ConnectionStep {
    draft: ConnectionConfig,
    /// Raw port input, parsed on submit.
    port: String,
    testing: bool,
    error: Option<String>,
}

impl ConnectionStep {
    fn draft_config(&self) -> Result<ConnectionConfig, String> {
        let port = parse_port(&self.port).map_err(|e| e.to_string())?;
        let config = ConnectionConfig {
            port,
            ..self.draft.normalized()
        };
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

impl Component for ConnectionStep {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let draft = ctx.props().adopted.clone().unwrap_or_default();
        Self {
            port: draft.port.to_string(),
            draft,
            testing: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(field, value) => {
                match field {
                    Field::Host => self.draft.host = value,
                    Field::Port => self.port = value,
                    Field::Database => self.draft.database = value,
                    Field::Username => self.draft.username = value,
                    Field::Password => self.draft.password = value,
                }
                true
            }
            Msg::Test => {
                if self.testing {
                    return false;
                }
                let config = match self.draft_config() {
                    Ok(config) => config,
                    Err(message) => {
                        self.error = Some(message);
                        return true;
                    }
                };
                self.testing = true;
                self.error = None;

                let link = ctx.link().clone();
                let api_ctx = ctx.props().ctx.clone();
                spawn_local(async move {
                    let result = api::test_connection(&api_ctx, &config).await;
                    link.send_message(Msg::Tested(config, result));
                });
                true
            }
            Msg::Tested(config, result) => {
                self.testing = false;
                match result {
                    Ok(()) => {
                        log::info!("connection to {}:{} accepted", config.host, config.port);
                        show_toast("Connection successful");
                        ctx.props().on_report.emit(StepReport::Connected(config));
                    }
                    Err(err) => {
                        log::warn!("connection test failed: {}", err);
                        self.error = Some(err.to_string());
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |label: &'static str, field: Field, kind: &'static str, value: String, placeholder: &'static str| {
            let oninput = link.callback(move |e: InputEvent| {
                Msg::Edit(field, e.target_unchecked_into::<HtmlInputElement>().value())
            });
            html! {
                <label class="form-field">
                    <span>{ label }</span>
                    <input type={kind} {value} {placeholder} {oninput} disabled={self.testing} />
                </label>
            }
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Test
        });

        html! {
            <form class="connection-form" {onsubmit}>
                { input("Host", Field::Host, "text", self.draft.host.clone(), "localhost") }
                { input("Port", Field::Port, "number", self.port.clone(), "8123") }
                { input("Database", Field::Database, "text", self.draft.database.clone(), "default") }
                { input("Username", Field::Username, "text", self.draft.username.clone(), "default") }
                { input("Password", Field::Password, "password", self.draft.password.clone(), "") }

                { inline_error(self.error.as_deref()) }

                <div class="form-actions">
                    if self.testing {
                        { spinner("Testing connection...") }
                    } else {
                        <button type="submit" class="primary">
                            <i class="material-icons">{"power"}</i>
                            {"Test Connection"}
                        </button>
                    }
                </div>
            </form>
        }
    }
}
