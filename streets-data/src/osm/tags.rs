//! Tag utilities for street extraction.
//!
//! A way is a street candidate when it carries both `highway` and `name`,
//! mirroring the `way["highway"]["name"]` Overpass selector.

/// Name and raw highway value of a street way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StreetTags {
    pub(super) name: String,
    pub(super) highway: String,
}

pub(super) fn street_tags<'a, T>(tags: T) -> Option<StreetTags>
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut name = None;
    let mut highway = None;
    for (key, value) in tags {
        match key {
            "name" => name = Some(value),
            "highway" => highway = Some(value),
            _ => {}
        }
    }
    Some(StreetTags {
        name: name?.to_owned(),
        highway: highway?.to_owned(),
    })
}
