//! Request middleware applied in front of the handlers.

pub mod upload_limit;
