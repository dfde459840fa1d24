//! Core traits shared by the SDK facade and resource clients.

mod token_sink;

pub use token_sink::TokenSink;
