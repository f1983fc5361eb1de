//! Region inference from the availability-zone fact.

use crate::facts::FactTable;

/// Known region codes, in declaration order. The first code the zone value
/// starts with wins.
pub const AWS_REGIONS: [&str; 8] = [
    "ap-northeast-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "eu-west-1",
    "sa-east-1",
    "us-east-1",
    "us-west-1",
    "us-west-2",
];

/// Derive `<prefix>placement_region` from `<prefix>placement_availability_zone`.
///
/// No-op when the zone fact is absent. A zone that matches no known region
/// code becomes the region value verbatim, so newly introduced zones still
/// produce a usable fact.
pub fn add_region(facts: &mut FactTable, prefix: &str, regions: &[String]) {
    let zone_key = format!("{prefix}placement_availability_zone");
    let Some(zone) = facts.get(&zone_key).map(str::to_string) else {
        return;
    };
    let region = regions
        .iter()
        .find(|r| zone.starts_with(r.as_str()))
        .cloned()
        .unwrap_or(zone);
    facts.insert(format!("{prefix}placement_region"), region);
}
