use common::requests::RequestContext;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WizardProps {
    /// Base URL and credential for every backend call made by the steps.
    pub ctx: RequestContext,
}
