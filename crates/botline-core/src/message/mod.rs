pub mod client;
pub mod dispatch;

pub use client::MessagingClient;
pub use dispatch::{DispatchError, InboundQueue, run_dispatcher};
