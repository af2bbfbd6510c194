pub mod connection;
pub mod direction;
pub mod file;
pub mod preview;
pub mod schema;
pub mod selection;
pub mod transfer;
