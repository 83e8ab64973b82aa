//! # adgen-render
//!
//! HTTP client for the external rendering API that flattens a [`Layout`]
//! onto its background and, on request, stores the finished ad.
//!
//! ```rust,no_run
//! use adgen_render::{RenderApiClient, RenderApiConfig};
//!
//! let client = RenderApiClient::new(
//!     RenderApiConfig::new("https://render.example.com/api/image-gen", "token"),
//! ).unwrap();
//! ```
//!
//! [`Layout`]: adgen_core::Layout

pub mod client;
pub mod config;

pub use client::{RenderApiClient, RenderRequest};
pub use config::{AdMetadata, RenderApiConfig};
