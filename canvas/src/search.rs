//! Quick-find index over every loaded entity.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use serde::Serialize;

use crate::doc::{EntityId, EntityKind, FloorPlanDoc};

/// Display name for entities that carry none.
pub const UNNAMED: &str = "Unnamed";

/// One row in the quick-find list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: EntityId,
    #[serde(rename = "type")]
    pub type_label: &'static str,
    /// Searchable name; empty when the entity has none.
    pub name: String,
    /// `name`, or [`UNNAMED`] when that is empty. Shown, never matched.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SearchHit {
    fn new(kind: EntityKind, id: &str, name: String) -> Self {
        let display_name = if name.is_empty() { UNNAMED.to_owned() } else { name.clone() };
        Self {
            kind,
            id: id.to_owned(),
            type_label: kind.type_label(),
            name,
            display_name,
            description: None,
            category: None,
        }
    }

    fn described(mut self, description: Option<&String>) -> Self {
        self.description = description.cloned();
        self
    }

    /// Case-insensitive substring match over name, description, category
    /// and type label. `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        let fields = [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.category.as_deref(),
            Some(self.type_label),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Flatten the active entities of `doc` into a single list, grouped by kind.
#[must_use]
pub fn build_index(doc: &FloorPlanDoc) -> Vec<SearchHit> {
    let mut hits = Vec::with_capacity(doc.len());

    for poi in doc.pois().iter().filter(|e| e.is_active) {
        let mut hit = SearchHit::new(EntityKind::Poi, &poi.id, poi.name.clone()).described(poi.description.as_ref());
        hit.category = Some(poi.category.clone()).filter(|c| !c.is_empty());
        hits.push(hit);
    }
    for e in doc.entrances().iter().filter(|e| e.is_active) {
        hits.push(SearchHit::new(EntityKind::Entrance, &e.id, e.name.clone()).described(e.description.as_ref()));
    }
    for e in doc.elevators().iter().filter(|e| e.is_active) {
        hits.push(SearchHit::new(EntityKind::Elevator, &e.id, e.name.clone()).described(e.description.as_ref()));
    }
    for path in doc.paths().iter().filter(|e| e.is_active) {
        let name = match path.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Path ({} points)", path.points.len()),
        };
        hits.push(SearchHit::new(EntityKind::Path, &path.id, name));
    }
    for zone in doc.zones().iter().filter(|e| e.is_active) {
        hits.push(
            SearchHit::new(EntityKind::Zone, &zone.id, zone.name.clone().unwrap_or_default())
                .described(zone.description.as_ref()),
        );
    }
    for label in doc.labels().iter().filter(|e| e.is_active) {
        hits.push(SearchHit::new(EntityKind::Label, &label.id, label.text.clone()));
    }
    for m in doc.measurements().iter().filter(|e| e.is_active) {
        hits.push(SearchHit::new(EntityKind::Measurement, &m.id, format!("{} {}", m.distance, m.unit)));
    }
    for a in doc.annotations().iter().filter(|e| e.is_active) {
        hits.push(SearchHit::new(EntityKind::Annotation, &a.id, a.name.clone()).described(a.description.as_ref()));
    }

    hits
}

/// Filter `hits` by `query`. A blank query returns every hit.
#[must_use]
pub fn filter<'a>(hits: &'a [SearchHit], query: &str) -> Vec<&'a SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return hits.iter().collect();
    }
    hits.iter().filter(|hit| hit.matches(&needle)).collect()
}

/// Build the index and filter it in one step.
#[must_use]
pub fn search(doc: &FloorPlanDoc, query: &str) -> Vec<SearchHit> {
    let hits = build_index(doc);
    filter(&hits, query).into_iter().cloned().collect()
}
