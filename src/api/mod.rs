//! HTTP surface - the browser page and the JSON API

pub mod handlers;
pub mod routes;
