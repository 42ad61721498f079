//! HTTP layer: router, handlers, error mapping, extractors.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
