//! # iotfleet-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **server-side-rendered HTML dashboard**: fleet list with name
//!   filter, fleet create / edit / delete forms, fleet overview, and the
//!   per-board "plugin status on fleet" table with its action buttons
//! - Serve a small **JSON API** (`/api/fleets`, `/api/fleets/{id}`,
//!   `/api/fleets/{fleet}/plugins/{plugin}/status`)
//! - Create one [`RequestCache`](iotfleet_app::request_cache::RequestCache)
//!   per request and hand it to the services
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML.
//! - Mutations are `<form>` POSTs answered with a redirect (PRG pattern).
//! - The outcome of a mutation travels to the next page as a flash message
//!   in the redirect query string (`flash`, `level`).
//!
//! ## Dependency rule
//! Depends on `iotfleet-app` (for port traits and services) and
//! `iotfleet-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
