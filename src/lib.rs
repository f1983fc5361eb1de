//! Minimal Rust crate for gathering flat instance facts from an EC2-style
//! metadata service.
//!
//! The metadata service exposes a self-describing tree: listings are
//! newline-delimited child names, with directories marked by a trailing `/`
//! and leaves holding text content. This crate crawls that tree, flattens every reachable
//! leaf into a sanitized fact name, and augments the result with a derived
//! region fact.
//!
//! # Features
//!
//! - Recursive crawl of the metadata tree with a fixed per-request timeout
//! - Best-effort semantics: fetch failures mean "fact absent", never errors
//! - Template-safe fact names (alphanumerics and underscores only)
//! - User-data and public-key facts from their dedicated endpoints
//! - Region inference from the availability-zone fact
//!
//! # Example
//!
//! ```ignore
//! use instance_facts::{FactGatherer, FactsError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FactsError> {
//!     let facts = FactGatherer::new()?.gather().await;
//!
//!     for (name, value) in facts.iter() {
//!         println!("{name}={value}");
//!     }
//!
//!     // e.g. ec2_instance_id=i-1234567890abcdef0
//!     //      ec2_placement_availability_zone=eu-west-1a
//!     //      ec2_placement_region=eu-west-1
//!     Ok(())
//! }
//! ```
//!
//! # Fact Naming
//!
//! | Metadata path | Fact name |
//! |---------------|-----------|
//! | `instance-id` | `ec2_instance_id` |
//! | `placement/availability-zone` | `ec2_placement_availability_zone` |
//! | `security-groups` | `ec2_security_groups` (comma-joined) |
//! | (derived) | `ec2_placement_region` |

mod client;
mod crawl;
mod error;
mod facts;
mod gatherer;
mod normalize;
mod region;

pub use error::FactsError;
pub use facts::FactTable;
pub use gatherer::FactGatherer;
pub use region::AWS_REGIONS;
