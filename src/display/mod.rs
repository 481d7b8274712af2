//! Terminal display and formatting utilities.
//!
//! Renders token views and extracted keys either as human-readable
//! sections or as machine-readable JSON.

pub mod json_printer;
pub mod key_list;
pub mod token_view;
