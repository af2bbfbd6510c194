use crate::model::direction::Direction;

/// One mounted state of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    SelectingDirection,
    ConfiguringConnection,
    SelectingTable,
    SelectingFile,
    SelectingColumns,
    Previewing,
    Terminal,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::SelectingDirection => "Choose Direction",
            Step::ConfiguringConnection => "Configure Connection",
            Step::SelectingTable => "Select Table",
            Step::SelectingFile => "Select File",
            Step::SelectingColumns => "Select Columns",
            Step::Previewing => "Preview Data",
            Step::Terminal => "Result",
        }
    }
}

/// The ordered steps of a wizard run in `direction`.
pub fn sequence(direction: Direction) -> [Step; 6] {
    let middle = match direction {
        Direction::FileToDatabase => Step::SelectingFile,
        Direction::DatabaseToFile => Step::SelectingColumns,
    };
    [
        Step::SelectingDirection,
        Step::ConfiguringConnection,
        Step::SelectingTable,
        middle,
        Step::Previewing,
        Step::Terminal,
    ]
}

pub(crate) fn next(direction: Direction, step: Step) -> Option<Step> {
    let steps = sequence(direction);
    let idx = steps.iter().position(|s| *s == step)?;
    steps.get(idx + 1).copied()
}

pub(crate) fn previous(direction: Direction, step: Step) -> Option<Step> {
    let steps = sequence(direction);
    let idx = steps.iter().position(|s| *s == step)?;
    idx.checked_sub(1).map(|i| steps[i])
}
