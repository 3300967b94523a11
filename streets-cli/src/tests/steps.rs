//! Behaviour-driven step definitions driving the clean CLI scenarios.

use super::helpers::{DatasetFiles, LayerOverrides, merge_layers};
use super::*;
use crate::clean::{CleanConfig, execute_clean, resolve_clean_config};
use camino::Utf8PathBuf;
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rusqlite::Connection;
use std::cell::RefCell;
use streets_core::CleaningSummary;

/// Aggregates clean CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CleanWorld {
    dataset_files: DatasetFiles,
    cli_args: RefCell<Vec<String>>,
    config_result: RefCell<Option<Result<CleanConfig, CliError>>>,
    run_result: RefCell<Option<Result<CleaningSummary, CliError>>>,
    stdout: RefCell<Vec<u8>>,
    config_layer: RefCell<Option<LayerOverrides>>,
    env_layer: RefCell<Option<LayerOverrides>>,
}

impl CleanWorld {
    fn new() -> Self {
        Self {
            dataset_files: DatasetFiles::new(),
            cli_args: RefCell::new(Vec::new()),
            config_result: RefCell::new(None),
            run_result: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            config_layer: RefCell::new(None),
            env_layer: RefCell::new(None),
        }
    }

    fn parse_clean_args(&self) -> Result<CleanArgs, CliError> {
        let mut invocation = vec!["streets".to_owned(), "clean".to_owned()];
        invocation.extend(self.cli_args.borrow().iter().cloned());
        let cli = Cli::try_parse_from(invocation).map_err(CliError::ArgumentParsing)?;
        match cli.command {
            Command::Clean(args) => Ok(args),
        }
    }

    fn config(&self) -> CleanConfig {
        self.config_result
            .borrow()
            .as_ref()
            .expect("configuration attempted")
            .as_ref()
            .expect("expected a valid configuration")
            .clone()
    }

    fn output_dir(&self) -> Utf8PathBuf {
        self.dataset_files.output_dir()
    }
}

#[fixture]
fn world() -> CleanWorld {
    CleanWorld::new()
}

#[given("a saved Overpass response exists on disk")]
fn response_exists(#[from(world)] world: &CleanWorld) {
    assert!(
        world.dataset_files.overpass().exists(),
        "expected the Overpass response to exist on disk"
    );
}

#[given("I pass the Overpass response with the CLI flag")]
fn cli_provides_overpass(#[from(world)] world: &CleanWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_OVERPASS_JSON}"),
        world.dataset_files.overpass().to_string(),
    ]);
}

#[given("I direct output to a scratch directory")]
fn cli_provides_output(#[from(world)] world: &CleanWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_OUTPUT_DIR}"),
        world.output_dir().to_string(),
    ]);
}

#[given("I omit all input configuration")]
fn omit_configuration(#[from(world)] world: &CleanWorld) {
    world.cli_args.borrow_mut().clear();
    *world.config_layer.borrow_mut() = None;
    *world.env_layer.borrow_mut() = None;
}

#[given("the inputs are provided via a config file")]
fn provided_via_config(#[from(world)] world: &CleanWorld) {
    let dataset = &world.dataset_files;
    *world.config_layer.borrow_mut() = Some(LayerOverrides {
        overpass_json: Some(dataset.config_overpass().to_path_buf()),
        osm_pbf: Some(dataset.config_pbf().to_path_buf()),
        os_names: None,
        output_dir: Some(world.output_dir()),
    });
}

#[given("the PBF path is overridden via environment variables")]
fn pbf_overridden_by_env(#[from(world)] world: &CleanWorld) {
    *world.env_layer.borrow_mut() = Some(LayerOverrides {
        osm_pbf: Some(world.dataset_files.env_pbf().to_path_buf()),
        ..LayerOverrides::default()
    });
}

#[when("I configure the clean command")]
fn configure_clean(#[from(world)] world: &CleanWorld) {
    let file_layer = world.config_layer.borrow().clone();
    let env_layer = world.env_layer.borrow().clone();
    let outcome = world.parse_clean_args().and_then(|args| {
        if file_layer.is_some() || env_layer.is_some() {
            merge_layers(args, file_layer, env_layer)
        } else {
            resolve_clean_config(args)
        }
    });
    world.config_result.replace(Some(outcome));
}

#[when("I run the clean command")]
fn run_clean_command(#[from(world)] world: &CleanWorld) {
    let outcome = world
        .parse_clean_args()
        .and_then(|args| merge_layers(args, None, None))
        .and_then(|config| execute_clean(&config, &mut *world.stdout.borrow_mut()));
    world.run_result.replace(Some(outcome));
}

#[then("the clean plan reads the CLI-provided response")]
fn plan_uses_cli_paths(#[from(world)] world: &CleanWorld) {
    let config = world.config();
    assert_eq!(
        config.overpass_json.as_deref(),
        Some(world.dataset_files.overpass())
    );
    assert_eq!(config.osm_pbf, None);
    assert_eq!(config.output_dir, Utf8PathBuf::from("."));
    assert!(!config.keep_unassigned);
}

#[then("the CLI reports that no input was given")]
fn reports_missing_input(#[from(world)] world: &CleanWorld) {
    let borrowed = world.config_result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingInput => {
            let message = error.to_string();
            assert!(message.contains(ENV_OVERPASS_JSON), "{message}");
            assert!(message.contains(ENV_OSM_PBF), "{message}");
            assert!(message.contains(ENV_OS_NAMES), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("CLI and environment layers override configuration defaults")]
fn precedence_holds(#[from(world)] world: &CleanWorld) {
    let config = world.config();
    let dataset = &world.dataset_files;
    assert_eq!(config.overpass_json.as_deref(), Some(dataset.overpass()));
    assert_eq!(config.osm_pbf.as_deref(), Some(dataset.env_pbf()));
    assert_eq!(config.output_dir, world.output_dir());
}

fn expect_summary(world: &CleanWorld) -> CleaningSummary {
    world
        .run_result
        .borrow()
        .as_ref()
        .expect("run attempted")
        .as_ref()
        .expect("expected a successful run")
        .clone()
}

#[then("streets.json lists the cleaned streets")]
fn json_lists_streets(#[from(world)] world: &CleanWorld) {
    let summary = expect_summary(world);
    let body = std::fs::read_to_string(world.output_dir().join(STREETS_JSON))
        .expect("read streets.json");
    let report: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
    let streets = report["streets"].as_array().expect("streets array");
    let placed: Vec<(&str, &str)> = streets
        .iter()
        .map(|street| {
            (
                street["name"].as_str().expect("name"),
                street["area_code"].as_str().expect("area code"),
            )
        })
        .collect();
    assert_eq!(placed, [("Rye Lane", "SE15"), ("Bankside", "SE1")]);
    let rye_lane = streets.first().expect("Rye Lane written");
    assert_eq!(rye_lane["borough"], "Southwark Council");
    assert_eq!(
        rye_lane["location"],
        serde_json::json!({"latitude": 51.4695, "longitude": -0.0688})
    );
    assert_eq!(report["summary"]["retained"], summary.retained);
    assert_eq!(report["summary"]["rejected"]["too_short"], 1);
}

#[then("streets.db holds the same streets")]
fn db_holds_streets(#[from(world)] world: &CleanWorld) {
    let conn = Connection::open(world.output_dir().join(STREETS_DB).as_std_path())
        .expect("open streets.db");
    let mut statement = conn
        .prepare("SELECT name, area_code, osm_id, borough FROM streets ORDER BY id")
        .expect("prepare query");
    let rows: Vec<(String, String, i64, String)> = statement
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .expect("query rows")
        .collect::<Result<_, _>>()
        .expect("decode rows");
    assert_eq!(
        rows,
        [
            (
                "Rye Lane".to_owned(),
                "SE15".to_owned(),
                101,
                "Southwark Council".to_owned()
            ),
            (
                "Bankside".to_owned(),
                "SE1".to_owned(),
                102,
                "Southwark Council".to_owned()
            ),
        ]
    );
}

#[then("the summary line reports every stage")]
fn summary_line(#[from(world)] world: &CleanWorld) {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("utf-8 stdout");
    assert_eq!(
        stdout.trim_end(),
        "candidates=6 accepted=4 rejected=2 (too_short=1 blocklisted_pattern=1) \
         unassigned=1 duplicates=1 written=2"
    );
}

macro_rules! register_clean_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/clean_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CleanWorld) {
            let _ = world;
        }
    };
}

register_clean_scenario!(cli_flag_selection, "selecting inputs via CLI flags");
register_clean_scenario!(rejecting_missing_inputs, "rejecting a run without inputs");
register_clean_scenario!(
    layering_cli_config_env,
    "layering CLI, config file, and environment values"
);
register_clean_scenario!(end_to_end_clean, "cleaning a saved response end to end");
