use crate::progress::{Indicator, IndicatorLookup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    pillars: Vec<Pillar>,
}

#[derive(Debug, Clone, Copy)]
struct Position {
    pillar: usize,
    output: usize,
    indicator: usize,
}

/// Pillar → output → indicator hierarchy with an id index over every
/// indicator, sub-indicators included.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "CatalogDocument")]
pub struct Catalog {
    pillars: Vec<Pillar>,
    index: HashMap<String, Position>,
}

/// An indicator together with the pillar and output it is filed under.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorContext<'a> {
    pub pillar: &'a Pillar,
    pub output: &'a Output,
    pub indicator: &'a Indicator,
}

impl From<CatalogDocument> for Catalog {
    fn from(document: CatalogDocument) -> Self {
        Self::new(document.pillars)
    }
}

impl Catalog {
    pub fn new(pillars: Vec<Pillar>) -> Self {
        let mut index = HashMap::new();

        for (p, pillar) in pillars.iter().enumerate() {
            for (o, output) in pillar.outputs.iter().enumerate() {
                for (i, indicator) in output.indicators.iter().enumerate() {
                    if index.contains_key(&indicator.id) {
                        tracing::warn!(indicator = %indicator.id, "duplicate indicator id, keeping first");
                        continue;
                    }
                    index.insert(
                        indicator.id.clone(),
                        Position {
                            pillar: p,
                            output: o,
                            indicator: i,
                        },
                    );
                }
            }
        }

        Self { pillars, index }
    }

    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<IndicatorContext<'_>> {
        let position = self.index.get(id)?;
        let pillar = &self.pillars[position.pillar];
        let output = &pillar.outputs[position.output];
        Some(IndicatorContext {
            pillar,
            output,
            indicator: &output.indicators[position.indicator],
        })
    }

    /// Every indicator in catalog order.
    pub fn indicators(&self) -> impl Iterator<Item = IndicatorContext<'_>> {
        self.pillars.iter().flat_map(|pillar| {
            pillar.outputs.iter().flat_map(move |output| {
                output.indicators.iter().map(move |indicator| IndicatorContext {
                    pillar,
                    output,
                    indicator,
                })
            })
        })
    }

    /// Ids referenced from any composite's sub-indicator map.
    pub fn sub_indicator_ids(&self) -> HashSet<&str> {
        self.indicators()
            .flat_map(|context| context.indicator.sub_indicator_ids.values())
            .map(String::as_str)
            .collect()
    }

    /// Indicators that are not only a component of some composite.
    pub fn top_level_indicators(&self) -> Vec<IndicatorContext<'_>> {
        let subs = self.sub_indicator_ids();
        self.indicators()
            .filter(|context| !subs.contains(context.indicator.id.as_str()))
            .collect()
    }
}

impl IndicatorLookup for Catalog {
    fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.get(id).map(|context| context.indicator)
    }
}

/// 1-based display ordinals for top-level indicators in catalog order.
pub fn number_indicators(catalog: &Catalog) -> BTreeMap<String, usize> {
    catalog
        .top_level_indicators()
        .into_iter()
        .enumerate()
        .map(|(position, context)| (context.indicator.id.clone(), position + 1))
        .collect()
}
