//! FactGatherer struct and core implementation.

use tracing::debug;

use crate::client::{MetadataClient, DEFAULT_BASE_URL};
use crate::crawl::TreeCrawler;
use crate::error::FactsError;
use crate::facts::FactTable;
use crate::normalize::{self, DEFAULT_FILTER_PATTERNS};
use crate::region::{self, AWS_REGIONS};

/// Metadata tree root path.
const METADATA_PATH: &str = "/latest/meta-data/";

/// User-data endpoint path (outside the recursive tree).
const USER_DATA_PATH: &str = "/latest/user-data";

/// Public SSH key endpoint path (outside the recursive tree).
const PUBLIC_KEY_PATH: &str = "/latest/meta-data/public-keys/0/openssh-key";

/// Default namespace token prepended to every fact name.
const DEFAULT_FACT_PREFIX: &str = "ec2_";

/// Main interface for gathering instance facts from the metadata service.
///
/// One gatherer owns one HTTP client; each [`gather`](Self::gather) call
/// runs a full crawl and returns a finished table.
///
/// # Example
///
/// ```ignore
/// use instance_facts::{FactGatherer, FactsError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), FactsError> {
///     let facts = FactGatherer::new()?.gather().await;
///     if let Some(instance_type) = facts.get("ec2_instance_type") {
///         println!("running on a {instance_type}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FactGatherer {
    client: MetadataClient,
    metadata_uri: String,
    user_data_uri: String,
    public_key_uri: String,
    fact_prefix: String,
    filter_patterns: Vec<String>,
    known_regions: Vec<String>,
}

impl FactGatherer {
    /// Create a gatherer against the default link-local metadata service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, FactsError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a gatherer with a custom base URL (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: &str) -> Result<Self, FactsError> {
        let client = MetadataClient::with_base_url(base_url)?;
        let base = client.base_url().to_string();
        Ok(Self {
            client,
            metadata_uri: format!("{base}{METADATA_PATH}"),
            user_data_uri: format!("{base}{USER_DATA_PATH}"),
            public_key_uri: format!("{base}{PUBLIC_KEY_PATH}"),
            fact_prefix: DEFAULT_FACT_PREFIX.to_string(),
            filter_patterns: DEFAULT_FILTER_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            known_regions: AWS_REGIONS.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Override the metadata tree root URI.
    pub fn with_metadata_uri(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = uri.into();
        self
    }

    /// Override the user-data endpoint URI.
    pub fn with_user_data_uri(mut self, uri: impl Into<String>) -> Self {
        self.user_data_uri = uri.into();
        self
    }

    /// Override the public SSH key endpoint URI.
    pub fn with_public_key_uri(mut self, uri: impl Into<String>) -> Self {
        self.public_key_uri = uri.into();
        self
    }

    /// Override the fact name prefix.
    ///
    /// The prefix is subject to the same character rules as fact names, so
    /// any `:` or `-` in it is rewritten to `_` up front.
    pub fn with_fact_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fact_prefix = normalize::sanitize_prefix(&prefix.into());
        self
    }

    /// Override the exclusion patterns (substring match on flattened names).
    pub fn with_filter_patterns(mut self, patterns: Vec<String>) -> Self {
        self.filter_patterns = patterns;
        self
    }

    /// Override the known-region set used for region inference.
    ///
    /// Order matters: the first region code the zone starts with wins.
    pub fn with_known_regions(mut self, regions: Vec<String>) -> Self {
        self.known_regions = regions;
        self
    }

    /// Get the fact name prefix in effect.
    pub fn fact_prefix(&self) -> &str {
        &self.fact_prefix
    }

    /// Crawl the metadata tree and return the flat fact table.
    ///
    /// Never fails: per-node fetch errors leave the corresponding fact
    /// absent, and a completely unreachable service yields an empty table.
    pub async fn gather(&self) -> FactTable {
        let mut crawler = TreeCrawler::new(&self.client);
        crawler.crawl(&self.metadata_uri, true).await;
        let raw = crawler.into_raw();

        let mut facts = normalize::flatten(
            &raw,
            &self.metadata_uri,
            &self.fact_prefix,
            &self.filter_patterns,
        );

        if let Some(user_data) = self.client.try_get_text(&self.user_data_uri).await {
            facts.insert(format!("{}user-data", self.fact_prefix), user_data);
        }
        if let Some(public_key) = self.client.try_get_text(&self.public_key_uri).await {
            facts.insert(format!("{}public-key", self.fact_prefix), public_key);
        }

        normalize::sanitize_varnames(&mut facts);
        region::add_region(&mut facts, &self.fact_prefix, &self.known_regions);

        debug!(facts = facts.len(), "gathered instance facts");
        facts
    }
}
