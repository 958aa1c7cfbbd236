//! Travel Buzz — interval-paced synthetic message streams.
//!
//! A producer renders random travel sentences from slot templates, and a
//! consumer renders canned responses and derives metadata from the message
//! each one wraps. Both run the same generator inside a cancellable loop.

pub mod config;
pub mod core;
pub mod logging;
pub mod runtime;
pub mod schema;
pub mod shutdown;
