//! Reusable UI components

pub mod confirm_dialog;
