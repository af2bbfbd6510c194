use common::wizard::Wizard;

/// State of the wizard controller: the step machine plus the last message
/// shown under the navigation bar.
pub struct WizardComponent {
    pub wizard: Wizard,
    pub notice: Option<String>,
}

impl WizardComponent {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            notice: None,
        }
    }
}
