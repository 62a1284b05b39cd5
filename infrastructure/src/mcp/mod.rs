//! MCP client adapter (rmcp)

mod gateway;
mod http;

pub use gateway::{RmcpGateway, RmcpSession};
