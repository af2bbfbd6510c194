pub mod login;
pub mod steps;
pub mod top_sheet;
pub mod wizard;
