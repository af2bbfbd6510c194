//! Update function of the wizard controller.
//!
//! Every message is applied to the [`Wizard`] state machine; the returned
//! `bool` tells Yew whether to re-render. Validation failures are kept in
//! `notice` and shown next to the navigation buttons.

use common::error::ApiError;
use common::model::transfer::TransferReceipt;
use common::requests::{RequestContext, TransferPlan};
use common::wizard::{Step, Wizard};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::{Delivery, Msg};
use super::state::WizardComponent;
use crate::api;
use crate::components::steps::StepReport;
use crate::helpers::{show_toast, trigger_download};

pub fn update(component: &mut WizardComponent, ctx: &Context<WizardComponent>, msg: Msg) -> bool {
    match msg {
        Msg::ChooseDirection(direction) => {
            let wizard = &mut component.wizard;
            if direction != wizard.direction() {
                wizard.change_direction(direction);
            } else if wizard.step() == Step::SelectingDirection {
                wizard.advance();
            }
            component.notice = None;
            true
        }
        Msg::Next => {
            if component.wizard.advance() {
                component.notice = None;
            } else {
                component.notice = component.wizard.check_step().err().map(|e| e.to_string());
            }
            true
        }
        Msg::Back => {
            component.wizard.retreat();
            component.notice = None;
            true
        }
        Msg::StartOver => {
            component.wizard.reset();
            component.notice = None;
            true
        }
        Msg::Report(report) => apply_report(component, ctx, report),
        Msg::TransferFinished(ticket, result) => {
            let wizard = &mut component.wizard;
            if !wizard.is_current(ticket) {
                log::warn!("transfer result arrived after the wizard moved on");
                return false;
            }
            let receipt = result.map(|delivery| deliver(wizard, delivery));
            wizard.finish_transfer(ticket, receipt);
            if let Some(outcome) = wizard.outcome() {
                show_toast(&outcome.to_string());
            }
            true
        }
    }
}

fn apply_report(
    component: &mut WizardComponent,
    ctx: &Context<WizardComponent>,
    report: StepReport,
) -> bool {
    let wizard = &mut component.wizard;
    let result = match report {
        StepReport::Connected(config) => wizard.adopt_connection(config),
        StepReport::TableSelected(table) => wizard.select_table(&table),
        StepReport::ColumnsLoaded { table, columns } => {
            wizard.columns_loaded(&table, columns);
            Ok(())
        }
        StepReport::ColumnToggled(name) => {
            wizard.toggle_column(&name);
            Ok(())
        }
        StepReport::AllColumnsToggled => {
            wizard.toggle_all_columns();
            Ok(())
        }
        StepReport::FileSelected(file) => wizard.select_file(file),
        StepReport::DelimiterChanged(delimiter) => {
            wizard.set_delimiter(delimiter);
            Ok(())
        }
        StepReport::ExportFileNameChanged(name) => {
            wizard.set_export_file_name(&name);
            Ok(())
        }
        StepReport::SubmitRequested => wizard.begin_transfer().map(|(ticket, plan)| {
            let link = ctx.link().clone();
            let api_ctx = ctx.props().ctx.clone();
            spawn_local(async move {
                let result = run_transfer(&api_ctx, plan).await;
                link.send_message(Msg::TransferFinished(ticket, result));
            });
        }),
    };
    component.notice = result.err().map(|e| e.to_string());
    true
}

async fn run_transfer(ctx: &RequestContext, plan: TransferPlan) -> Result<Delivery, ApiError> {
    match plan {
        TransferPlan::Ingest(request) => {
            log::info!(
                "ingesting {} ({} bytes) into {}",
                request.file_name,
                request.file_bytes.len(),
                request.table_name
            );
            api::ingest(ctx, &request).await.map(Delivery::Ingested)
        }
        TransferPlan::Export(request) => {
            log::info!("exporting {} to {}", request.table_name, request.file_name);
            api::export(ctx, &request).await.map(Delivery::Exported)
        }
    }
}

/// Turns a delivery for the current ticket into a receipt. An export is saved
/// to disk only here, once the result is known to still be wanted.
fn deliver(wizard: &Wizard, delivery: Delivery) -> TransferReceipt {
    match delivery {
        Delivery::Ingested(records) => TransferReceipt::Ingested { records },
        Delivery::Exported(bytes) => {
            let file_name = wizard.export_file_name();
            if let Err(err) = trigger_download(&file_name, &bytes) {
                log::error!("saving {} failed: {:?}", file_name, err);
                show_toast(&format!("Could not save {}", file_name));
            }
            TransferReceipt::Exported { bytes: bytes.len() }
        }
    }
}
