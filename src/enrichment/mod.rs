//! Catalog enrichment module - resolves tracks and fetches album art from
//! the upstream catalog.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - internal types and the error taxonomy
//! - **Transport** (`transport.rs`) - the HTTP seam; production reqwest
//!   implementation plus scripted test mocks
//! - **Executor** (`http.rs`) - rate-limit-aware retrying GET
//! - **Spotify API** (`spotify/`) - auth, search and track detail, with the
//!   wire shapes isolated in DTOs and converted through an adapter
//! - **Service** (`service.rs`) - the batch driver with per-row fault
//!   isolation
//!
//! This decoupling means:
//! 1. API changes don't ripple through the codebase
//! 2. Every retry and failure path is testable without a network
//! 3. Rate-limit and pacing delays are injectable, so tests run fast

pub mod domain;
pub mod http;
pub mod service;
pub mod spotify;
pub mod transport;

pub use domain::{AccessToken, CatalogError, Credentials, TrackId};
pub use service::{EnrichmentConfig, EnrichmentService, RunSummary};
