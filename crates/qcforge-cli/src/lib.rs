//! qcforge CLI library.
//!
//! The binary in `main.rs` parses arguments; the actual operations live in
//! [`commands`], and [`dispatch`] maps the selected engine to its adapter.

pub mod commands;
pub mod dispatch;
