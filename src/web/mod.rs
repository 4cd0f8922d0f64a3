//! Browser-facing HTML layer.
//!
//! A single form that shortens a URL and shows the result, rendered
//! server-side with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Web route configuration

pub mod handlers;
pub mod routes;
