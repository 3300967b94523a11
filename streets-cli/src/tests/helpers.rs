//! Test helpers for composing clean command inputs and layered overrides.

use super::*;
use crate::clean::CleanConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Overpass response exercising every cleaning stage.
pub(super) const SAMPLE_OVERPASS: &str = r#"{"elements": [
    {"type": "way", "id": 101, "center": {"lat": 51.4695, "lon": -0.0688},
     "tags": {"highway": "secondary", "name": "Rye Lane"}},
    {"type": "way", "id": 102, "center": {"lat": 51.5010, "lon": -0.0985},
     "tags": {"highway": "unclassified", "name": "Bankside"}},
    {"type": "way", "id": 103, "center": {"lat": 51.4820, "lon": -0.0590},
     "tags": {"highway": "residential", "name": "Unnamed Road"}},
    {"type": "way", "id": 104, "center": {"lat": 53.4794, "lon": -2.2453},
     "tags": {"highway": "primary", "name": "Deansgate"}},
    {"type": "way", "id": 105, "center": {"lat": 51.4700, "lon": -0.0690},
     "tags": {"highway": "secondary", "name": "Rye  Lane"}},
    {"type": "way", "id": 106, "center": {"lat": 51.4700, "lon": -0.0690},
     "tags": {"highway": "footway", "name": "Ab"}}
]}"#;

/// OS Open Names rows placed only by their postcode district.
pub(super) const SAMPLE_OS_NAMES: &str = "\
ID,NAME1,NAME1_LANG,NAME2,NAME2_LANG,TYPE,LOCAL_TYPE,GEOMETRY_X,GEOMETRY_Y,POSTCODE_DISTRICT
osgb1,Rye Lane,eng,,,transportNetwork,Named Road,534350,175960,SE15
osgb2,Deansgate,eng,,,transportNetwork,Named Road,383500,398000,M3
osgb3,Peckham,eng,,,populatedPlace,Suburban Area,534500,176300,SE15
";

#[derive(Debug, Clone, Default)]
pub(super) struct LayerOverrides {
    pub(super) overpass_json: Option<Utf8PathBuf>,
    pub(super) osm_pbf: Option<Utf8PathBuf>,
    pub(super) os_names: Option<Utf8PathBuf>,
    pub(super) output_dir: Option<Utf8PathBuf>,
}

#[derive(Debug)]
pub(super) struct DatasetFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
    cli_overpass: Utf8PathBuf,
    config_overpass: Utf8PathBuf,
    config_pbf: Utf8PathBuf,
    env_pbf: Utf8PathBuf,
}

impl DatasetFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let cli_overpass = root.join("cli.overpass.json");
        let config_overpass = root.join("config.overpass.json");
        let config_pbf = root.join("config.osm.pbf");
        let env_pbf = root.join("env.osm.pbf");
        for path in [&cli_overpass, &config_overpass] {
            fs::write(path, SAMPLE_OVERPASS).expect("write Overpass response");
        }
        for path in [&config_pbf, &env_pbf] {
            fs::write(path, b"dataset contents").expect("write PBF placeholder");
        }
        Self {
            _dir: dir,
            root,
            cli_overpass,
            config_overpass,
            config_pbf,
            env_pbf,
        }
    }

    pub(super) fn overpass(&self) -> &Utf8Path {
        &self.cli_overpass
    }

    pub(super) fn config_overpass(&self) -> &Utf8Path {
        &self.config_overpass
    }

    pub(super) fn config_pbf(&self) -> &Utf8Path {
        &self.config_pbf
    }

    pub(super) fn env_pbf(&self) -> &Utf8Path {
        &self.env_pbf
    }

    pub(super) fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("out")
    }
}

/// Apply the file and environment layers beneath the CLI arguments, in the
/// same precedence `load_and_merge` uses, then resolve the configuration.
pub(super) fn merge_layers(
    mut cli_args: CleanArgs,
    file_layer: Option<LayerOverrides>,
    env_layer: Option<LayerOverrides>,
) -> Result<CleanConfig, CliError> {
    merge_field(
        &mut cli_args.overpass_json,
        extract_field(env_layer.as_ref(), |layer| &layer.overpass_json),
        extract_field(file_layer.as_ref(), |layer| &layer.overpass_json),
    );
    merge_field(
        &mut cli_args.osm_pbf,
        extract_field(env_layer.as_ref(), |layer| &layer.osm_pbf),
        extract_field(file_layer.as_ref(), |layer| &layer.osm_pbf),
    );
    merge_field(
        &mut cli_args.os_names,
        extract_field(env_layer.as_ref(), |layer| &layer.os_names),
        extract_field(file_layer.as_ref(), |layer| &layer.os_names),
    );
    merge_field(
        &mut cli_args.output_dir,
        extract_field(env_layer.as_ref(), |layer| &layer.output_dir),
        extract_field(file_layer.as_ref(), |layer| &layer.output_dir),
    );
    let config = CleanConfig::try_from(cli_args)?;
    config.validate_sources()?;
    Ok(config)
}

fn merge_field<T: Clone>(target: &mut Option<T>, env_value: Option<T>, file_value: Option<T>) {
    if target.is_none()
        && let Some(value) = env_value.or(file_value)
    {
        *target = Some(value);
    }
}

fn extract_field<T: Clone>(
    layer: Option<&LayerOverrides>,
    accessor: fn(&LayerOverrides) -> &Option<T>,
) -> Option<T> {
    layer.and_then(|entry| accessor(entry).clone())
}
