//! # adgen-data
//!
//! Reads a company's highest-reach historical ads from Supabase and turns
//! them into the example descriptions the concept generator is primed with.
//!
//! The query keeps the top rows by `eu_total_reach`, shuffles them, keeps a
//! sample and flattens each ad's linked image descriptions.

pub mod config;
pub mod records;
pub mod supabase;

pub use config::{DEFAULT_FETCH_LIMIT, DEFAULT_SAMPLE_SIZE, SupabaseConfig};
pub use records::{AdRecord, sample_descriptions};
pub use supabase::SupabaseAdSource;
