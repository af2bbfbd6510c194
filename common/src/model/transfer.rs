use std::fmt;

/// What the backend reported for a successful transfer, before it is tied to
/// the wizard's table and file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferReceipt {
    Ingested { records: u64 },
    Exported { bytes: usize },
}

/// Terminal result of a transfer job, shown on the last wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Ingested {
        table: String,
        records: u64,
    },
    Exported {
        table: String,
        file_name: String,
        bytes: usize,
    },
    Failed {
        message: String,
    },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, TransferOutcome::Failed { .. })
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Ingested { records, .. } => {
                write!(f, "Successfully transferred {} records", records)
            }
            TransferOutcome::Exported {
                table, file_name, ..
            } => write!(f, "Successfully exported {} to {}", table, file_name),
            TransferOutcome::Failed { message } => write!(f, "Transfer failed: {}", message),
        }
    }
}
