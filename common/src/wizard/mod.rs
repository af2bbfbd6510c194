//! The step-sequencing state machine behind the transfer wizard.
//!
//! [`Wizard`] owns every user-entered parameter. The browser components receive
//! read-only snapshots of it and report results back to the controller, which
//! applies them through the methods below. Transitions follow a single rule set:
//!
//! - `advance` only moves when the current step's completion predicate holds;
//! - `retreat` always moves back and never clears entered data;
//! - `change_direction` drops everything downstream of the direction, because
//!   the two directions consume differently shaped input.
//!
//! Transfers are guarded by an epoch counter: every step change bumps it, so a
//! result arriving for a step that is no longer mounted is discarded.

mod step;

use log::{debug, warn};

pub use step::{Step, sequence};

use crate::error::{ApiError, ValidationError};
use crate::model::connection::ConnectionConfig;
use crate::model::direction::Direction;
use crate::model::file::UploadedFile;
use crate::model::preview::{PREVIEW_LINES, PreviewTable};
use crate::model::schema::ColumnDescriptor;
use crate::model::selection::ColumnSelection;
use crate::model::transfer::{TransferOutcome, TransferReceipt};
use crate::requests::{ExportRequest, IngestRequest, PreviewRequest, TransferPlan};

/// Proof that a transfer was started in a given epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTicket {
    epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wizard {
    step: Step,
    direction: Direction,
    connection: Option<ConnectionConfig>,
    table: Option<String>,
    columns: ColumnSelection,
    /// Table the database-derived `columns` were fetched for.
    columns_table: Option<String>,
    file: Option<UploadedFile>,
    export_file_name: Option<String>,
    outcome: Option<TransferOutcome>,
    in_flight: Option<TransferTicket>,
    epoch: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> [Step; 6] {
        sequence(self.direction)
    }

    pub fn step_index(&self) -> usize {
        self.steps()
            .iter()
            .position(|s| *s == self.step)
            .unwrap_or_default()
    }

    pub fn connection(&self) -> Option<&ConnectionConfig> {
        self.connection.as_ref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// The download name for an export, `<table>_export.csv` unless edited.
    pub fn export_file_name(&self) -> String {
        self.export_file_name_input().trim().to_string()
    }

    /// The file name exactly as typed, for echoing back into the input.
    pub fn export_file_name_input(&self) -> String {
        match (&self.export_file_name, &self.table) {
            (Some(name), _) => name.clone(),
            (None, Some(table)) => format!("{}_export.csv", table),
            (None, None) => String::new(),
        }
    }

    pub fn outcome(&self) -> Option<&TransferOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_transferring(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Completion predicate of the current step.
    pub fn check_step(&self) -> Result<(), ValidationError> {
        match self.step {
            Step::SelectingDirection => Ok(()),
            Step::ConfiguringConnection => match &self.connection {
                Some(c) if !c.host.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::NotConnected),
            },
            Step::SelectingTable => match &self.table {
                Some(t) if !t.is_empty() => Ok(()),
                _ => Err(ValidationError::NoTableSelected),
            },
            Step::SelectingFile => match &self.file {
                Some(f) if !f.is_empty() => self.check_columns(),
                _ => Err(ValidationError::NoFileSelected),
            },
            Step::SelectingColumns => self.check_columns(),
            Step::Previewing | Step::Terminal => Err(ValidationError::NotReady),
        }
    }

    fn check_columns(&self) -> Result<(), ValidationError> {
        if self.columns.is_empty() {
            Err(ValidationError::NoColumnsSelected)
        } else {
            Ok(())
        }
    }

    pub fn can_advance(&self) -> bool {
        self.check_step().is_ok()
    }

    /// Moves to the next step if the current one is complete. Returns whether
    /// the step changed.
    pub fn advance(&mut self) -> bool {
        if let Err(reason) = self.check_step() {
            debug!("advance from {:?} blocked: {}", self.step, reason);
            return false;
        }
        match step::next(self.direction, self.step) {
            Some(next) => {
                self.move_to(next);
                true
            }
            None => false,
        }
    }

    /// Moves to the previous step. Entered data is kept; only a terminal outcome
    /// is dropped so that the transfer can be submitted again.
    pub fn retreat(&mut self) -> bool {
        match step::previous(self.direction, self.step) {
            Some(previous) => {
                if self.step == Step::Terminal {
                    self.outcome = None;
                }
                self.move_to(previous);
                true
            }
            None => false,
        }
    }

    /// Switches direction and clears every downstream choice.
    pub fn change_direction(&mut self, direction: Direction) {
        debug!("direction changed to {:?}", direction);
        self.direction = direction;
        self.clear_choices();
        self.move_to(Step::ConfiguringConnection);
    }

    /// Starts over with the current direction.
    pub fn reset(&mut self) {
        self.clear_choices();
        self.move_to(Step::SelectingDirection);
    }

    fn clear_choices(&mut self) {
        self.connection = None;
        self.table = None;
        self.columns = ColumnSelection::default();
        self.columns_table = None;
        self.file = None;
        self.export_file_name = None;
        self.outcome = None;
    }

    fn move_to(&mut self, step: Step) {
        if self.in_flight.take().is_some() {
            debug!("leaving {:?} with a transfer in flight; its result will be dropped", self.step);
        }
        debug!("wizard step {:?} -> {:?}", self.step, step);
        self.step = step;
        self.epoch += 1;
    }

    /// Adopts a connection that the backend accepted and moves on to table
    /// selection.
    ///
    /// A config that differs from the adopted one invalidates the table and the
    /// columns fetched from the previous database.
    pub fn adopt_connection(&mut self, config: ConnectionConfig) -> Result<(), ValidationError> {
        let config = config.normalized();
        config.validate()?;
        if self.connection.as_ref() != Some(&config) {
            self.table = None;
            self.export_file_name = None;
            if self.direction == Direction::DatabaseToFile {
                self.columns = ColumnSelection::default();
            }
            self.columns_table = None;
        }
        self.connection = Some(config);
        if self.step == Step::ConfiguringConnection {
            self.advance();
        }
        Ok(())
    }

    pub fn select_table(&mut self, table: &str) -> Result<(), ValidationError> {
        if table.is_empty() {
            return Err(ValidationError::NoTableSelected);
        }
        if self.table.as_deref() != Some(table) {
            self.table = Some(table.to_string());
            self.export_file_name = None;
            if self.direction == Direction::DatabaseToFile {
                self.columns = ColumnSelection::default();
                self.columns_table = None;
            }
        }
        Ok(())
    }

    /// Applies the result of describing `table`.
    ///
    /// The first load selects every column; a re-fetch of the same table keeps
    /// the user's choices. Results for a table other than the selected one are
    /// ignored.
    pub fn columns_loaded(&mut self, table: &str, available: Vec<ColumnDescriptor>) -> bool {
        if self.direction != Direction::DatabaseToFile || self.table.as_deref() != Some(table) {
            warn!("ignoring columns of {} for a different selection", table);
            return false;
        }
        if self.columns_table.as_deref() == Some(table) {
            self.columns.refresh(available);
        } else {
            self.columns = ColumnSelection::all(available);
            self.columns_table = Some(table.to_string());
        }
        true
    }

    pub fn toggle_column(&mut self, name: &str) -> bool {
        self.columns.toggle(name)
    }

    pub fn toggle_all_columns(&mut self) {
        self.columns.toggle_all();
    }

    /// Replaces the selected file wholesale; its header becomes the offered
    /// column list with everything selected.
    pub fn select_file(&mut self, file: UploadedFile) -> Result<(), ValidationError> {
        if file.is_empty() {
            return Err(ValidationError::NoFileSelected);
        }
        debug!("file {} selected ({} bytes)", file.file_name(), file.bytes().len());
        self.columns = ColumnSelection::from_names(file.columns());
        self.file = Some(file);
        Ok(())
    }

    /// Re-reads the selected file's header with another delimiter.
    pub fn set_delimiter(&mut self, delimiter: char) {
        if let Some(file) = &self.file {
            if file.delimiter() == delimiter {
                return;
            }
            let file = file.with_delimiter(delimiter);
            self.columns = ColumnSelection::from_names(file.columns());
            self.file = Some(file);
        }
    }

    /// Stores the file name input as typed. Clearing it brings the default
    /// name back.
    pub fn set_export_file_name(&mut self, name: &str) {
        self.export_file_name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Local sample of the selected file.
    pub fn file_preview(&self) -> Option<PreviewTable> {
        self.file
            .as_ref()
            .map(|f| PreviewTable::from_text(&f.text(), f.delimiter(), PREVIEW_LINES))
    }

    /// Body of the backend preview call for an export.
    ///
    /// Independent of the export file name, which only matters for the download.
    pub fn preview_request(&self) -> Option<PreviewRequest> {
        if self.direction != Direction::DatabaseToFile || self.columns.is_empty() {
            return None;
        }
        Some(PreviewRequest {
            config: self.connection.clone()?,
            table_name: self.table.clone()?,
            columns: self.columns.selected().to_vec(),
        })
    }

    /// Builds the transfer request from the current choices.
    pub fn transfer_plan(&self) -> Result<TransferPlan, ValidationError> {
        let config = self.connection.clone().ok_or(ValidationError::NotConnected)?;
        let table_name = self.table.clone().ok_or(ValidationError::NoTableSelected)?;
        if self.columns.is_empty() {
            return Err(ValidationError::NoColumnsSelected);
        }
        let columns = self.columns.selected().to_vec();

        match self.direction {
            Direction::FileToDatabase => {
                let file = self.file.as_ref().ok_or(ValidationError::NoFileSelected)?;
                Ok(TransferPlan::Ingest(IngestRequest {
                    config,
                    table_name,
                    columns,
                    delimiter: file.delimiter(),
                    file_name: file.file_name().to_string(),
                    file_bytes: file.bytes().to_vec(),
                }))
            }
            Direction::DatabaseToFile => {
                let file_name = self.export_file_name();
                if file_name.is_empty() {
                    return Err(ValidationError::MissingFileName);
                }
                Ok(TransferPlan::Export(ExportRequest {
                    config,
                    table_name,
                    columns,
                    file_name,
                }))
            }
        }
    }

    /// Marks a transfer as started. Only one may be in flight, and only from
    /// the preview step.
    pub fn begin_transfer(&mut self) -> Result<(TransferTicket, TransferPlan), ValidationError> {
        if self.step != Step::Previewing {
            return Err(ValidationError::NotReady);
        }
        if self.in_flight.is_some() {
            return Err(ValidationError::TransferInFlight);
        }
        let plan = self.transfer_plan()?;
        let ticket = TransferTicket { epoch: self.epoch };
        self.in_flight = Some(ticket);
        debug!("transfer of {} started", plan.table_name());
        Ok((ticket, plan))
    }

    /// Whether `ticket` belongs to the transfer currently in flight.
    pub fn is_current(&self, ticket: TransferTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Records the result of the transfer started with `ticket` and moves to the
    /// terminal step. Results for a ticket from an earlier epoch are dropped.
    pub fn finish_transfer(
        &mut self,
        ticket: TransferTicket,
        result: Result<TransferReceipt, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            warn!("discarding result of a stale transfer");
            return false;
        }
        self.in_flight = None;

        let table = self.table.clone().unwrap_or_default();
        let outcome = match result {
            Ok(TransferReceipt::Ingested { records }) => {
                TransferOutcome::Ingested { table, records }
            }
            Ok(TransferReceipt::Exported { bytes }) => TransferOutcome::Exported {
                table,
                file_name: self.export_file_name(),
                bytes,
            },
            Err(err) => TransferOutcome::Failed {
                message: err.to_string(),
            },
        };
        debug!("transfer finished: {}", outcome);
        self.outcome = Some(outcome);
        self.move_to(Step::Terminal);
        true
    }
}
