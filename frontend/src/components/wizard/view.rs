//! View of the wizard controller: direction switch, stepper, the mounted step
//! and the navigation bar.

use common::model::direction::Direction;
use common::model::transfer::TransferOutcome;
use common::wizard::Step;
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::WizardComponent;
use crate::components::steps::columns::ColumnsStep;
use crate::components::steps::connection::ConnectionStep;
use crate::components::steps::direction::DirectionStep;
use crate::components::steps::file::FileStep;
use crate::components::steps::preview::PreviewStep;
use crate::components::steps::tables::TablesStep;
use crate::helpers::{format_bytes, format_count};

pub fn view(component: &WizardComponent, ctx: &Context<WizardComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="wizard">
            { build_header(component, link) }
            { build_stepper(component) }
            <section class="step-body">
                <h2>{ component.wizard.step().label() }</h2>
                { build_step(component, ctx) }
            </section>
            { build_nav(component, link) }
        </div>
    }
}

fn build_header(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    let current = component.wizard.direction();
    let onchange = link.batch_callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Direction::from_value(&select.value()).map(Msg::ChooseDirection)
    });
    html! {
        <div class="wizard-header">
            <label class="form-field inline">
                <span>{"Direction"}</span>
                <select {onchange} disabled={component.wizard.is_transferring()}>
                    { for Direction::ALL.iter().map(|d| html! {
                        <option value={d.as_str()} selected={*d == current}>{ d.label() }</option>
                    }) }
                </select>
            </label>
        </div>
    }
}

fn build_stepper(component: &WizardComponent) -> Html {
    let active = component.wizard.step_index();
    html! {
        <ol class="stepper">
            { for component.wizard.steps().iter().enumerate().map(|(i, step)| {
                let state = match i.cmp(&active) {
                    std::cmp::Ordering::Less => "done",
                    std::cmp::Ordering::Equal => "active",
                    std::cmp::Ordering::Greater => "pending",
                };
                html! {
                    <li class={classes!("stepper-item", state)}>
                        <span class="stepper-index">{ i + 1 }</span>
                        <span class="stepper-label">{ step.label() }</span>
                    </li>
                }
            }) }
        </ol>
    }
}

fn build_step(component: &WizardComponent, ctx: &Context<WizardComponent>) -> Html {
    let wizard = &component.wizard;
    let link = ctx.link();
    let api_ctx = ctx.props().ctx.clone();
    let on_report = link.callback(Msg::Report);

    match wizard.step() {
        Step::SelectingDirection => html! {
            <DirectionStep
                current={wizard.direction()}
                on_choose={link.callback(Msg::ChooseDirection)}
            />
        },
        Step::ConfiguringConnection => html! {
            <ConnectionStep
                ctx={api_ctx}
                adopted={wizard.connection().cloned()}
                {on_report}
            />
        },
        Step::SelectingTable => match wizard.connection() {
            Some(connection) => html! {
                <TablesStep
                    ctx={api_ctx}
                    connection={connection.clone()}
                    selected={wizard.table().map(str::to_string)}
                    {on_report}
                />
            },
            None => missing("Connection has not been tested yet"),
        },
        Step::SelectingColumns => match (wizard.connection(), wizard.table()) {
            (Some(connection), Some(table)) => html! {
                <ColumnsStep
                    ctx={api_ctx}
                    connection={connection.clone()}
                    table={table.to_string()}
                    selection={wizard.columns().clone()}
                    {on_report}
                />
            },
            _ => missing("Please select a table"),
        },
        Step::SelectingFile => html! {
            <FileStep
                file={wizard.file().cloned()}
                selection={wizard.columns().clone()}
                {on_report}
            />
        },
        Step::Previewing => html! {
            <PreviewStep
                ctx={api_ctx}
                direction={wizard.direction()}
                table={wizard.table().unwrap_or_default().to_string()}
                file_preview={wizard.file_preview()}
                preview_request={wizard.preview_request()}
                export_file_name={wizard.export_file_name_input()}
                transferring={wizard.is_transferring()}
                {on_report}
            />
        },
        Step::Terminal => build_outcome(wizard.outcome()),
    }
}

fn missing(message: &str) -> Html {
    html! { <div class="inline-error">{ message }</div> }
}

fn build_outcome(outcome: Option<&TransferOutcome>) -> Html {
    let Some(outcome) = outcome else {
        return html! {};
    };
    let (icon, class) = if outcome.is_success() {
        ("check_circle", "success")
    } else {
        ("error", "failure")
    };
    let detail = match outcome {
        TransferOutcome::Ingested { table, records } => {
            Some(format!("{} rows written to {}", format_count(*records), table))
        }
        TransferOutcome::Exported { bytes, .. } => {
            Some(format!("{} downloaded", format_bytes(*bytes)))
        }
        TransferOutcome::Failed { .. } => None,
    };
    html! {
        <div class={classes!("outcome", class)}>
            <i class="material-icons">{ icon }</i>
            <div>
                <div class="outcome-message">{ outcome.to_string() }</div>
                if let Some(detail) = detail {
                    <div class="hint">{ detail }</div>
                }
            </div>
        </div>
    }
}

fn build_nav(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    let wizard = &component.wizard;
    let step = wizard.step();
    let busy = wizard.is_transferring();
    let hint = component
        .notice
        .clone()
        .or_else(|| match step {
            Step::Previewing | Step::Terminal | Step::SelectingDirection => None,
            _ => wizard.check_step().err().map(|e| e.to_string()),
        });

    html! {
        <div class="wizard-nav">
            <button
                disabled={step == Step::SelectingDirection || busy}
                onclick={link.callback(|_| Msg::Back)}
            >
                <i class="material-icons">{"arrow_back"}</i>
                {"Back"}
            </button>

            if let Some(hint) = hint {
                <span class="nav-hint">{ hint }</span>
            }

            if step == Step::Terminal {
                <button class="primary" onclick={link.callback(|_| Msg::StartOver)}>
                    <i class="material-icons">{"restart_alt"}</i>
                    {"Start over"}
                </button>
            } else if step != Step::Previewing {
                <button
                    class="primary"
                    disabled={!wizard.can_advance()}
                    onclick={link.callback(|_| Msg::Next)}
                >
                    {"Next"}
                    <i class="material-icons">{"arrow_forward"}</i>
                </button>
            }
        </div>
    }
}
