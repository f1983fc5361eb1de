//! Recursive crawl of the metadata tree.

use std::collections::BTreeMap;

use tracing::debug;

use crate::client::MetadataClient;

/// Leaf whose newline-separated content is joined with commas, so the
/// security-group list stays a scalar fact value.
const SECURITY_GROUPS_FIELD: &str = "security-groups";

/// Walks the metadata tree and accumulates raw URI → content pairs.
///
/// The crawler owns the raw table for the duration of one crawl; it is
/// handed off via [`into_raw`](Self::into_raw) afterward. Directory URIs
/// (ending in `/`) are recursed into, never recorded. A URI is fetched at
/// most once, which also terminates crawls over cyclic or repeated
/// listings. Fetch failures and empty bodies leave the URI absent from the
/// table.
pub struct TreeCrawler<'a> {
    client: &'a MetadataClient,
    raw: BTreeMap<String, String>,
}

impl<'a> TreeCrawler<'a> {
    /// Create a crawler borrowing the given client.
    pub fn new(client: &'a MetadataClient) -> Self {
        Self {
            client,
            raw: BTreeMap::new(),
        }
    }

    /// Fetch the listing at `uri` and record every reachable leaf.
    ///
    /// When `recurse` is false, subdirectory entries are skipped and only
    /// leaves listed directly under `uri` are fetched.
    pub async fn crawl(&mut self, uri: &str, recurse: bool) {
        let Some(listing) = self.client.try_get_text(uri).await else {
            return;
        };

        for field in listing.split('\n') {
            if field.is_empty() {
                continue;
            }
            let child_uri = join_uri(uri, field);
            if field.ends_with('/') && recurse {
                Box::pin(self.crawl(&child_uri, recurse)).await;
            }
            if child_uri.ends_with('/') || self.raw.contains_key(&child_uri) {
                continue;
            }
            let Some(content) = self.client.try_get_text(&child_uri).await else {
                continue;
            };
            let content = if field == SECURITY_GROUPS_FIELD {
                join_security_groups(&content)
            } else {
                content
            };
            self.raw.insert(child_uri, content);
        }
        debug!(uri, nodes = self.raw.len(), "crawled metadata listing");
    }

    /// Consume the crawler, yielding the accumulated raw table.
    pub fn into_raw(self) -> BTreeMap<String, String> {
        self.raw
    }
}

/// Join a parent URI and a child name with exactly one separator.
fn join_uri(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Flatten a newline-separated security-group listing into one value.
fn join_security_groups(content: &str) -> String {
    content.split('\n').collect::<Vec<_>>().join(",")
}
