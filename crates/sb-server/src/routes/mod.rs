//! Route handlers, one module per resource.

pub mod images;
pub mod pages;
pub mod upload;
