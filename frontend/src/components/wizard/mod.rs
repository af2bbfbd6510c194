//! Wizard controller: owns the [`Wizard`](common::wizard::Wizard) state machine,
//! mounts the component of the current step and applies what the steps report.
//!
//! The transfer itself is started here because it needs the ticket issued by
//! the state machine; its result comes back through this component's link and
//! is dropped if the wizard moved on in the meantime.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::WizardProps;
pub use state::WizardComponent;

impl Component for WizardComponent {
    type Message = Msg;
    type Properties = WizardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WizardComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
