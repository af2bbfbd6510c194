use crate::app::App;

mod api;
mod app;
mod auth;
mod components;
mod helpers;
mod logging;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
