use common::error::ApiError;
use common::model::direction::Direction;
use common::wizard::TransferTicket;

use crate::components::steps::StepReport;

/// What came back from a transfer call, before it is checked against the
/// ticket it was started with.
pub enum Delivery {
    Ingested(u64),
    Exported(Vec<u8>),
}

pub enum Msg {
    ChooseDirection(Direction),
    Next,
    Back,
    StartOver,
    Report(StepReport),
    TransferFinished(TransferTicket, Result<Delivery, ApiError>),
}
