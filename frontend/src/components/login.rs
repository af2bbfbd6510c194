//! Sign-in dialog. On success the token is handed to the application root,
//! which stores it and threads it into every later request.

use common::error::{ApiError, ValidationError};
use common::requests::{LoginRequest, RequestContext};
use common::responses::LoginResponse;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::steps::{inline_error, spinner};
use crate::components::top_sheet::{close_top_sheet, TopSheet};

pub enum Msg {
    Username(String),
    Password(String),
    Submit,
    Done(Result<LoginResponse, ApiError>),
    Close,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub ctx: RequestContext,
    pub node_ref: NodeRef,
    pub on_logged_in: Callback<LoginResponse>,
}

pub struct LoginSheet {
    username: String,
    password: String,
    pending: bool,
    error: Option<String>,
}

impl Component for LoginSheet {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Username(value) => {
                self.username = value;
                true
            }
            Msg::Password(value) => {
                self.password = value;
                true
            }
            Msg::Submit => {
                if self.pending {
                    return false;
                }
                if self.username.trim().is_empty() {
                    self.error = Some(ValidationError::MissingField("Username").to_string());
                    return true;
                }
                self.pending = true;
                self.error = None;
                let request = LoginRequest {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                };
                let link = ctx.link().clone();
                let api_ctx = ctx.props().ctx.clone();
                spawn_local(async move {
                    let result = api::login(&api_ctx, &request).await;
                    link.send_message(Msg::Done(result));
                });
                true
            }
            Msg::Done(result) => {
                self.pending = false;
                match result {
                    Ok(response) => {
                        self.password.clear();
                        close_top_sheet(&ctx.props().node_ref);
                        ctx.props().on_logged_in.emit(response);
                    }
                    Err(err) => {
                        log::warn!("login failed: {}", err);
                        self.error = Some(err.to_string());
                    }
                }
                true
            }
            Msg::Close => {
                self.error = None;
                close_top_sheet(&ctx.props().node_ref);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <TopSheet node_ref={ctx.props().node_ref.clone()}>
                <form class="login-form" {onsubmit}>
                    <div class="sheet-title">
                        <span>{"Sign in"}</span>
                        <button type="button" class="icon-btn" title="Close" onclick={link.callback(|_| Msg::Close)}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    <label class="form-field">
                        <span>{"Username"}</span>
                        <input
                            type="text"
                            value={self.username.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::Username(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </label>
                    <label class="form-field">
                        <span>{"Password"}</span>
                        <input
                            type="password"
                            value={self.password.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::Password(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </label>
                    { inline_error(self.error.as_deref()) }
                    <div class="form-actions">
                        if self.pending {
                            { spinner("Signing in...") }
                        } else {
                            <button type="submit" class="primary">{"Sign in"}</button>
                        }
                    </div>
                </form>
            </TopSheet>
        }
    }
}
