//! Router-wide middleware.

pub mod request_id;
