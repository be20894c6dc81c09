//! StateGraph integration tests: compile-time validation, invoke, routing, errors,
//! streaming and concurrent use of one compiled graph.

#[path = "../init_logging.rs"]
mod init_logging;

mod common;
mod compile;
mod concurrency;
mod errors;
mod invoke;
mod routing;
mod stream;
