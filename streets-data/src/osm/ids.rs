use log::warn;

#[derive(Copy, Clone, Debug)]
pub(super) enum OsmElementKind {
    Node,
    Way,
}

/// Convert a raw OSM identifier, skipping negative (unsaved editor) ids.
pub(super) fn element_id(kind: OsmElementKind, raw_id: i64) -> Option<u64> {
    u64::try_from(raw_id)
        .inspect_err(|_| {
            warn!("Skipped OSM {kind:?} {raw_id}: negative identifiers are unsupported");
        })
        .ok()
}
