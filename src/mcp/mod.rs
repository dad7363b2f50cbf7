//! MCP server for macrocalc

mod server;

pub use server::MacroService;
