//! Penguin App — serves the prediction form and its WebSocket IPC.

pub mod config;
pub mod embedded_ui;
pub mod ipc;
pub mod session;
pub mod ws_bridge;
