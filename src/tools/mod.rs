//! macrocalc Tools module
//!
//! MCP tool implementations for the macro calculator.

pub mod macros;
pub mod status;
