pub mod bridge;
pub mod ws_bridge;
