// Module exports for models
// Plain data consumed and produced by the layout services

pub mod event;
pub mod key;
pub mod layout;
pub mod resource;
pub mod settings;
pub mod ui;
