//! angunav LSP - Language Server for component file navigation
//!
//! This crate provides a Language Server Protocol implementation that lets
//! an editor jump between the logic, template and style files of a UI
//! component (e.g. `foo.component.ts`, `foo.component.html` and
//! `foo.component.scss`) by filename suffix.

pub mod backend;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod navigator;
pub mod providers;
pub mod resolve;
pub mod role;
pub mod visibility;
