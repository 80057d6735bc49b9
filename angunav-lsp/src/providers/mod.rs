//! LSP feature providers

pub mod code_actions;
