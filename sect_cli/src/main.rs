//! # Sectify CLI Application
//!
//! Runs the section-analysis pipelines from a JSON job file and prints the
//! result curves as JSON, one entry per pipeline. A pipeline that fails
//! reports its structured error in place without suppressing its siblings.
//!
//! ## Usage
//!
//! ```text
//! sect_cli <job.json>    analyze the job file
//! sect_cli               run the built-in demo column
//! ```
//!
//! ## Job file
//!
//! ```json
//! {
//!   "member": "column",
//!   "direction": "Y",
//!   "concrete": { "fc": 210, "ec": 218819.788, "eps_c0": 0.002, "eps_cu": 0.0038 },
//!   "steel": { "fy": 4200, "fsu": 6300, "es": 2100000, "eps_y": 0.002,
//!              "eps_sh": 0.008, "eps_su": 0.10 },
//!   "section": { "width": 40, "height": 40, "cover": 4, "tie_dia": 10,
//!                "tie_spacing": 10, "corner_dia": 18, "edge_dia": 16,
//!                "bars_x": 3, "bars_y": 3, "legs_x": 3, "legs_y": 3 },
//!   "fibers": { "strips": 100 },
//!   "asce": { "span": 3.0, "axial_load": 20000, "shear_demand": 10000 },
//!   "asce_condition": "Flexure"
//! }
//! ```

use std::env;
use std::fs;
use std::process::ExitCode;

use log::info;
use serde_json::{json, Value};

use sect_core::analysis::asce::{
    beam_backbone, column_backbone, AsceBeamParams, AsceColumnParams, BeamCondition,
    ColumnCondition,
};
use sect_core::analysis::{
    beam_suite, column_suite, interaction_diagram, MomentCurvatureConfig,
};
use sect_core::confinement::ConfinementSolver;
use sect_core::errors::{SectError, SectResult};
use sect_core::params::ParameterMap;
use sect_core::{BeamSection, ColumnSection, ConcreteMaterial, Direction, SteelMaterial};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let job: Value = match args.get(1) {
        Some(path) => {
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading {path}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error parsing {path}: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            eprintln!("Sectify CLI - no job file given, running the demo column");
            demo_job()
        }
    };

    match run_job(&job) {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("Error rendering output: {e}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}

fn demo_job() -> Value {
    json!({
        "member": "column",
        "direction": "Y",
        "concrete": { "fc": 210.0, "ec": 218819.788, "eps_c0": 0.002, "eps_cu": 0.0038 },
        "steel": { "fy": 4200.0, "fsu": 6300.0, "es": 2100000.0,
                   "eps_y": 0.002, "eps_sh": 0.008, "eps_su": 0.10 },
        "section": { "width": 40.0, "height": 40.0, "cover": 4.0, "tie_dia": 10.0,
                     "tie_spacing": 10.0, "corner_dia": 18.0, "edge_dia": 16.0,
                     "bars_x": 3, "bars_y": 3, "legs_x": 3, "legs_y": 3 },
        "fibers": { "strips": 100 },
        "asce": { "span": 3.0, "axial_load": 20000.0, "shear_demand": 10000.0 },
        "asce_condition": "Flexure"
    })
}

fn category(job: &Value, key: &str) -> SectResult<ParameterMap> {
    let value = job
        .get(key)
        .cloned()
        .ok_or_else(|| SectError::missing_parameter(key))?;
    serde_json::from_value(value)
        .map_err(|e| SectError::invalid_parameter(key, "<object>", e.to_string()))
}

/// One pipeline result as a JSON entry: the value on success, the
/// structured error otherwise.
fn entry<T: serde::Serialize>(result: SectResult<T>) -> Value {
    match result {
        Ok(value) => serde_json::to_value(value)
            .unwrap_or_else(|e| json!({ "error": e.to_string() })),
        Err(e) => json!({ "error": e }),
    }
}

fn run_job(job: &Value) -> SectResult<Value> {
    let concrete = ConcreteMaterial::from_map(&category(job, "concrete")?)?;
    let steel = SteelMaterial::from_map(&category(job, "steel")?)?;
    let section_map = category(job, "section")?;

    let mut config = MomentCurvatureConfig::default();
    if job.get("fibers").is_some() {
        let fibers = category(job, "fibers")?;
        config.mesh_strips = fibers.require_count("strips")?;
        config.theta_f = fibers.get_or("theta_f", config.theta_f)?;
        config.tolerance = fibers.get_or("tolerance", config.tolerance)?;
        config.target_axial = fibers.get_or("target_axial", config.target_axial)?;
    }

    let member = job.get("member").and_then(Value::as_str).unwrap_or("beam");
    info!("analyzing {member} section");

    let output = match member {
        "column" => {
            let section = ColumnSection::from_map(&section_map)?;
            let direction = match job.get("direction").and_then(Value::as_str) {
                Some("X") => Direction::X,
                _ => Direction::Y,
            };
            let curves = column_suite(
                &concrete,
                &steel,
                &section,
                direction,
                &ConfinementSolver::default(),
                &config,
            );
            let mc: serde_json::Map<String, Value> = curves
                .into_iter()
                .map(|(pipeline, result)| (format!("{pipeline:?}"), entry(result)))
                .collect();

            let mut output = json!({
                "moment_curvature": mc,
                "interaction": entry(interaction_diagram(&concrete, &steel, &section, direction)),
            });
            if job.get("asce").is_some() {
                let demand = AsceColumnParams::from_map(&category(job, "asce")?)?;
                let condition = match job.get("asce_condition").and_then(Value::as_str) {
                    Some("Shear") => ColumnCondition::Shear,
                    _ => ColumnCondition::Flexure,
                };
                output["asce"] = entry(column_backbone(
                    &concrete, &steel, &section, direction, &demand, condition,
                ));
            }
            output
        }
        _ => {
            let section = BeamSection::from_map(&section_map)?;
            let curves = beam_suite(&concrete, &steel, &section, &config);
            let mc: serde_json::Map<String, Value> = curves
                .into_iter()
                .map(|(pipeline, result)| (format!("{pipeline:?}"), entry(result)))
                .collect();

            let mut output = json!({ "moment_curvature": mc });
            if job.get("asce").is_some() {
                let demand = AsceBeamParams::from_map(&category(job, "asce")?)?;
                let condition = match job.get("asce_condition").and_then(Value::as_str) {
                    Some("Shear") => BeamCondition::Shear,
                    Some("Development") => BeamCondition::Development,
                    Some("Embedment") => BeamCondition::Embedment,
                    _ => BeamCondition::Flexure,
                };
                output["asce"] = entry(beam_backbone(
                    &concrete, &steel, &section, &demand, condition,
                ));
            }
            output
        }
    };
    Ok(output)
}
