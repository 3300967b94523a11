//! Internal accumulator for OpenStreetMap (OSM) PBF street extraction.
//!
//! The parallel first pass counts elements and collects named highway ways
//! with their node references. Each element starts a fresh accumulator, so
//! no coordinates are known at that point; every reference stays pending
//! until the sequential second pass records the node positions.
//!
//! Positions are kept as the file gives them. A node outside WGS84 is passed
//! on to the normalizer rather than discarded.
use std::collections::{HashMap, HashSet};

use geo::Coord;
use osmpbf::Element;
use streets_core::StreetRecord;

use super::ids::{OsmElementKind, element_id};
use super::tags::{StreetTags, street_tags};
use super::{OsmStreetReport, OsmStreetSummary};
use crate::geometry::representative_point;

#[derive(Debug, Default)]
pub(super) struct OsmStreetAccumulator {
    summary: OsmStreetSummary,
    nodes: HashMap<u64, Coord<f64>>,
    pending_nodes: HashSet<u64>,
    ways: Vec<StreetWay>,
}

#[derive(Debug)]
struct StreetWay {
    id: u64,
    tags: StreetTags,
    node_refs: Vec<u64>,
}

impl OsmStreetAccumulator {
    pub(super) fn process_element(&mut self, element: Element<'_>) {
        match element {
            Element::Node(_) | Element::DenseNode(_) => self.process_node(),
            Element::Way(way) => self.process_way(way.id(), way.tags(), way.refs()),
            Element::Relation(_) => self.summary.relations += 1,
        }
    }

    pub(super) const fn process_node(&mut self) {
        self.summary.nodes += 1;
    }

    pub(super) fn process_way<'a, T, R>(&mut self, raw_id: i64, tags: T, refs: R)
    where
        T: IntoIterator<Item = (&'a str, &'a str)>,
        R: IntoIterator<Item = i64>,
    {
        self.summary.ways += 1;
        let Some(street) = street_tags(tags) else {
            return;
        };
        let Some(id) = element_id(OsmElementKind::Way, raw_id) else {
            return;
        };
        let node_refs: Vec<u64> = refs
            .into_iter()
            .filter_map(|node_id| element_id(OsmElementKind::Node, node_id))
            .collect();
        self.pending_nodes.extend(node_refs.iter().copied());
        self.summary.street_ways += 1;
        self.ways.push(StreetWay {
            id,
            tags: street,
            node_refs,
        });
    }

    pub(super) fn combine(mut self, other: Self) -> Self {
        self.summary = self.summary.combine(other.summary);
        self.ways.extend(other.ways);
        self.pending_nodes.extend(other.pending_nodes);
        self
    }

    pub(super) fn has_pending_nodes(&self) -> bool {
        !self.pending_nodes.is_empty()
    }

    pub(super) fn pending_node_count(&self) -> usize {
        self.pending_nodes.len()
    }

    pub(super) fn resolve_pending_node(&mut self, raw_id: i64, lon: f64, lat: f64) {
        let Some(id) = element_id(OsmElementKind::Node, raw_id) else {
            return;
        };
        if self.pending_nodes.remove(&id) {
            self.nodes.insert(id, Coord { x: lon, y: lat });
        }
    }

    /// Place each street at the mean of its resolved nodes.
    pub(super) fn into_report(self) -> OsmStreetReport {
        let Self {
            mut summary,
            nodes,
            mut ways,
            ..
        } = self;
        ways.sort_by_key(|way| way.id);
        let streets = ways
            .into_iter()
            .map(|way| {
                let record = StreetRecord::new(way.tags.name)
                    .with_highway_type(way.tags.highway)
                    .with_osm_id(way.id);
                let resolved = way.node_refs.iter().filter_map(|id| nodes.get(id)).copied();
                match representative_point(resolved) {
                    Some(centre) => record.with_coordinates(centre.y, centre.x),
                    None => {
                        summary.unlocated_streets += 1;
                        record
                    }
                }
            })
            .collect();
        OsmStreetReport { summary, streets }
    }
}
