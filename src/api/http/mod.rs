// src/api/http/mod.rs

pub mod handlers;
pub mod recommendations;
pub mod router;

pub use router::http_router;
