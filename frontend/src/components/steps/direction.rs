use common::model::direction::Direction;
use yew::{classes, html, Callback, Component, Context, Html, Properties};

pub struct DirectionStep;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub current: Direction,
    pub on_choose: Callback<Direction>,
}

impl Component for DirectionStep {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        DirectionStep
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="direction-cards">
                { for Direction::ALL.iter().map(|&direction| {
                    let (icon, detail) = match direction {
                        Direction::FileToDatabase => ("upload_file", "Load a delimited file into a ClickHouse table."),
                        Direction::DatabaseToFile => ("download", "Export columns of a ClickHouse table to a CSV file."),
                    };
                    let onclick = props.on_choose.reform(move |_| direction);
                    html! {
                        <button
                            class={classes!("direction-card", (direction == props.current).then_some("active"))}
                            {onclick}
                        >
                            <i class="material-icons">{ icon }</i>
                            <span class="direction-title">{ direction.label() }</span>
                            <span class="hint">{ detail }</span>
                        </button>
                    }
                }) }
            </div>
        }
    }
}
