//! Domain reducers.  `update.rs` offers each message to them in turn; a
//! reducer returns `true` when it consumed the message.

pub mod auth;
pub mod canvas;
pub mod tools;
