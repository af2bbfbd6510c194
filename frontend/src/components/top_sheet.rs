//! Sheet that slides down from the top of the page, used for dialogs.

use js_sys::Function;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

pub struct TopSheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(sheet_ref: &NodeRef) {
    toggle_show(sheet_ref, "add");
}

pub fn close_top_sheet(sheet_ref: &NodeRef) {
    toggle_show(sheet_ref, "remove");
}

/// Adds or removes the `show` class on the next tick so that the CSS
/// transition runs after the sheet is mounted.
fn toggle_show(sheet_ref: &NodeRef, method: &str) {
    let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() else {
        return;
    };
    let func = Function::new_no_args(&format!(
        "document.getElementById('{}').classList.{}('show')",
        sheet.id(),
        method
    ));
    if let Some(window) = web_sys::window() {
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&func, 50)
            .is_err()
        {
            log::warn!("could not schedule top sheet transition");
        }
    }
}
