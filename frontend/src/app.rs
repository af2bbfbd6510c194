use common::config::UiConfig;
use common::requests::RequestContext;
use common::responses::LoginResponse;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::{html, Component, Context, Html, NodeRef};

use crate::api;
use crate::auth;
use crate::components::login::LoginSheet;
use crate::components::top_sheet::open_top_sheet;
use crate::components::wizard::WizardComponent;
use crate::helpers::show_toast;

pub enum Msg {
    ConfigLoaded(UiConfig),
    OpenLogin,
    LoggedIn(LoginResponse),
    Logout,
}

/// Application root. Holds the backend address and the bearer token, and is
/// the only place that reads or writes the stored token.
pub struct App {
    config: Option<UiConfig>,
    token: Option<String>,
    user: Option<String>,
    login_ref: NodeRef,
}

impl App {
    fn request_context(&self) -> Option<RequestContext> {
        self.config
            .as_ref()
            .map(|c| RequestContext::new(&c.api_base_url).with_token(self.token.clone()))
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(api::load_ui_config().await));
        });
        Self {
            config: None,
            token: auth::load_token(),
            user: None,
            login_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                log::info!("ingestion backend at {}", config.api_base_url);
                self.config = Some(config);
                true
            }
            Msg::OpenLogin => {
                open_top_sheet(&self.login_ref);
                false
            }
            Msg::LoggedIn(response) => {
                auth::store_token(&response.token);
                self.token = Some(response.token);
                self.user = response
                    .user
                    .get("username")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                show_toast("Signed in");
                true
            }
            Msg::Logout => {
                auth::clear_token();
                self.token = None;
                self.user = None;
                show_toast("Signed out");
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(request_ctx) = self.request_context() else {
            return html! { <div class="loading">{"Loading..."}</div> };
        };

        let account = if self.token.is_some() {
            html! {
                <div class="account">
                    <span>{ self.user.clone().unwrap_or_else(|| "Signed in".to_string()) }</span>
                    <button class="icon-btn" title="Sign out" onclick={link.callback(|_| Msg::Logout)}>
                        <i class="material-icons">{"logout"}</i>
                    </button>
                </div>
            }
        } else {
            html! {
                <button class="icon-btn" title="Sign in" onclick={link.callback(|_| Msg::OpenLogin)}>
                    <i class="material-icons">{"login"}</i>
                    <span class="icon-label">{"Sign in"}</span>
                </button>
            }
        };

        html! {
            <div class="app">
                <header class="app-bar">
                    <i class="material-icons">{"swap_horiz"}</i>
                    <h1>{"ClickHouse Transfer"}</h1>
                    <span class="spacer"></span>
                    { account }
                </header>
                <LoginSheet
                    ctx={request_ctx.clone()}
                    node_ref={self.login_ref.clone()}
                    on_logged_in={link.callback(Msg::LoggedIn)}
                />
                <main>
                    <WizardComponent ctx={request_ctx} />
                </main>
            </div>
        }
    }
}
