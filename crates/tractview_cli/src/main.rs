//! CLI probe for the tractview core.
//!
//! # Responsibility
//! - Load a deployment config, compute one joined view, and write the
//!   renderer hand-off (GeoJSON) to stdout.
//! - Keep output deterministic for quick local sanity checks.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tractview_core::model::indicator::category_of;
use tractview_core::{
    compute_joined_view, core_version, init_logging, load_config, load_reference, Selection,
    ViewOptions,
};

const DEFAULT_CONFIG_PATH: &str = "tractview.toml";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("tractview: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let year_arg = args.next();
    let column_arg = args.next();

    let config = load_config(Path::new(&config_path)).map_err(|err| err.to_string())?;

    if let Some(dir) = &config.logging.dir {
        let dir = dir.to_string_lossy();
        init_logging(&config.logging.level, &dir)?;
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let reference = load_reference(&config).map_err(|err| err.to_string())?;

    let year = match year_arg {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| format!("invalid year `{raw}`"))?,
        None => single_configured_year(&reference.supported_years())?,
    };

    let column = column_arg.or_else(|| config.default_column.clone());
    let Some(column) = column else {
        return Err("no column given and no default_column configured".to_string());
    };
    let category = category_of(&column)
        .ok_or_else(|| format!("column `{column}` belongs to no indicator family"))?;

    let selection =
        Selection::new(year, category, Some(column), 1.0).map_err(|err| err.to_string())?;
    let options = ViewOptions {
        default_column: config.default_column.clone(),
        viewport: config.viewport,
    };

    let view =
        compute_joined_view(&selection, &reference, &options).map_err(|err| err.to_string())?;

    if view.diagnostics.suspected_id_mismatch {
        eprintln!(
            "tractview: warning: no tract matched the join ({} boundaries, {} rows); \
             check identifier formats in the source files",
            view.diagnostics.geometry_count, view.diagnostics.indicator_count
        );
    }
    eprintln!(
        "tractview: year={} county={} tracts={}",
        view.year,
        reference.county(),
        view.records.len()
    );

    println!("{}", tractview_core::to_geojson_string(&view));
    Ok(())
}

fn single_configured_year(supported: &[u16]) -> Result<u16, String> {
    match supported {
        [only] => Ok(*only),
        _ => Err(format!(
            "no year given; pick one of {supported:?} on the command line"
        )),
    }
}
