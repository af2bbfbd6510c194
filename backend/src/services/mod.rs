pub mod ui_config;
