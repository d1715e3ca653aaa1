pub mod history_api;
pub mod server;
pub mod upload;

pub use server::{GatewayState, start_server};
