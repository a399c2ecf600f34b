//! World Bank population data → `World / region / country` tree.
//!
//! Fetching is left to the caller; these functions take the JSON bodies of
//! the two API responses. Both responses are `[paging metadata, [records]]`.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

use crate::tree::{NodeId, Population, Tree, TreeBuilder};

/// Total population per country, 2014.
pub const WORLD_BANK_POPULATIONS: &str = "http://api.worldbank.org/countries/all/indicators/SP.POP.TOTL?format=json&date=2014:2014&per_page=270";

/// Country → region membership.
pub const WORLD_BANK_REGIONS: &str =
    "http://api.worldbank.org/countries?format=json&date=2014:2014&per_page=310";

/// Region label the API uses for non-country groupings ("World", "Arab World", ...).
const AGGREGATES_REGION: &str = "Aggregates";

const ROOT_NAME: &str = "World";

#[derive(Debug, Deserialize)]
struct Labelled {
    value: String,
}

#[derive(Debug, Deserialize)]
struct PopulationRecord {
    country: Labelled,
    value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: String,
    region: Labelled,
}

/// A region and the names of its member countries, in API order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub countries: Vec<String>,
}

fn parse_page<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let (_paging, records): (IgnoredAny, Option<Vec<T>>) =
        serde_json::from_str(json).context("unexpected World Bank response shape")?;
    Ok(records.unwrap_or_default())
}

/// Population value as reported; older responses use strings, newer ones numbers.
fn population_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Country name → population. Missing, unreadable and non-positive values are dropped.
pub fn parse_populations(json: &str) -> Result<HashMap<String, u64>> {
    let records: Vec<PopulationRecord> =
        parse_page(json).context("parsing population data")?;

    let mut populations = HashMap::with_capacity(records.len());
    for record in records {
        let Some(count) = record.value.as_ref().and_then(population_value) else {
            continue;
        };
        if count == 0 {
            continue;
        }
        populations.insert(record.country.value.trim().to_string(), count);
    }
    tracing::debug!("Parsed populations for {} countries", populations.len());
    Ok(populations)
}

/// Regions in first-seen order, each with its member countries.
///
/// Records without a country name, and the aggregates pseudo-region, are skipped.
pub fn parse_regions(json: &str) -> Result<Vec<Region>> {
    let records: Vec<CountryRecord> = parse_page(json).context("parsing region data")?;

    let mut regions: Vec<Region> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let country = record.name.trim();
        let region = record.region.value.trim();
        if country.is_empty() || region.is_empty() || region == AGGREGATES_REGION {
            continue;
        }
        let slot = *index.entry(region.to_string()).or_insert_with(|| {
            regions.push(Region {
                name: region.to_string(),
                countries: Vec::new(),
            });
            regions.len() - 1
        });
        regions[slot].countries.push(country.to_string());
    }
    tracing::debug!("Parsed {} regions", regions.len());
    Ok(regions)
}

/// Assemble `World → regions → countries`.
///
/// Countries without a population figure are left out, and so are regions
/// left with no countries.
pub fn build_population_tree(
    populations: &HashMap<String, u64>,
    regions: &[Region],
) -> Result<Tree<Population>> {
    let mut builder = TreeBuilder::<Population>::new();
    let mut region_ids = Vec::with_capacity(regions.len());

    for region in regions {
        let countries: Vec<NodeId> = region
            .countries
            .iter()
            .filter_map(|country| {
                populations
                    .get(country)
                    .map(|&count| builder.leaf(country.as_str(), count))
            })
            .collect();
        if countries.is_empty() {
            tracing::debug!("Region '{}' has no countries with data, omitted", region.name);
            continue;
        }
        let id = builder
            .internal(region.name.as_str(), countries)
            .with_context(|| format!("building region {}", region.name))?;
        region_ids.push(id);
    }

    let world = builder.internal(ROOT_NAME, region_ids)?;
    let tree = builder.finish(world)?;
    tracing::info!(
        "Population tree: {} regions, world total {}",
        tree.child_count(world),
        tree.total_weight(world)
    );
    Ok(tree)
}

/// Parse both responses and build the tree.
pub fn load_population_tree(populations_json: &str, regions_json: &str) -> Result<Tree<Population>> {
    let populations = parse_populations(populations_json)?;
    let regions = parse_regions(regions_json)?;
    build_population_tree(&populations, &regions)
}
