use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use eden_catalog::{aoi_from_catalog, load_catalog, select_regions};
use eden_ingest::read_polygon_source;
use eden_output::{aoi_from_bounds, write_bounds, write_layer, write_qa};
use eden_registry::{PrepConfig, Registry, prepare_regions};

use crate::cli::{AoiArgs, PrepArgs, RegionsArgs};
use crate::summary::apply_table_style;

/// What a prep run produced, for the end-of-run summary.
pub struct PrepOutcome {
    pub registry: Registry,
    pub layer_name: String,
    pub layer_path: Option<PathBuf>,
    pub bounds_path: Option<PathBuf>,
    pub qa_path: Option<PathBuf>,
    pub dry_run: bool,
}

pub fn run_prep(args: &PrepArgs) -> Result<PrepOutcome> {
    let span = info_span!("prep", scheme = %args.scheme, level = args.level);
    let _guard = span.enter();

    let catalog = load_catalog(&args.catalog).context("load region catalog")?;
    let selection =
        select_regions(&catalog, &args.scheme, args.level).context("select catalog regions")?;
    let source = read_polygon_source(&args.source).context("read boundary source")?;

    let config = PrepConfig {
        code_field: args.code_field.clone(),
        target_crs: args.target_crs.clone(),
        area_crs: args.area_crs.clone(),
        dissolve: !args.no_dissolve,
    };
    let registry =
        prepare_regions(&selection, &source, &config).context("prepare region registry")?;

    let store_dir = args.store.clone().unwrap_or_else(|| {
        args.source
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("registry")
    });
    let layer_name = args
        .layer
        .clone()
        .unwrap_or_else(|| format!("{}_l{}", args.scheme.to_lowercase(), args.level));
    let bounds_path = args
        .bounds
        .clone()
        .unwrap_or_else(|| store_dir.join("bounds.parquet"));

    if args.dry_run {
        info!(layer = %layer_name, "dry run; skipping artifact writes");
        return Ok(PrepOutcome {
            registry,
            layer_name,
            layer_path: None,
            bounds_path: None,
            qa_path: None,
            dry_run: true,
        });
    }

    let layer_path =
        write_layer(&store_dir, &layer_name, &registry).context("write geometry store layer")?;
    write_bounds(&bounds_path, &registry).context("write bounds table")?;
    let qa_path = match &args.qa {
        Some(path) => {
            write_qa(path, &registry).context("write QA export")?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(PrepOutcome {
        registry,
        layer_name,
        layer_path: Some(layer_path),
        bounds_path: Some(bounds_path),
        qa_path,
        dry_run: false,
    })
}

pub fn run_aoi(args: &AoiArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog).context("load region catalog")?;
    let selection =
        select_regions(&catalog, &args.scheme, args.level).context("select catalog regions")?;

    // The computed bounds table is authoritative; catalog bounds are the
    // hand-maintained fallback.
    if let Some(path) = &args.bounds
        && path.exists()
    {
        let wanted = selection.wanted_codes();
        if let Some(bbox) = aoi_from_bounds(path, &wanted).context("read bounds table")? {
            println!("{}", bbox.format(args.precision));
            return Ok(());
        }
        info!(path = %path.display(), "no selected codes in bounds table; falling back to catalog");
    }

    match aoi_from_catalog(&catalog) {
        Some(bbox) => {
            println!("{}", bbox.format(args.precision));
            Ok(())
        }
        None => bail!(
            "no bounds available for scheme={} level={}; run prep to compute them",
            args.scheme,
            args.level
        ),
    }
}

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog).context("load region catalog")?;
    let mut regions: Vec<_> = catalog
        .regions
        .iter()
        .filter(|region| {
            args.scheme
                .as_deref()
                .is_none_or(|scheme| region.scheme == scheme)
                && args.level.is_none_or(|level| region.level == level)
        })
        .collect();
    regions.sort_by(|a, b| {
        a.scheme
            .cmp(&b.scheme)
            .then(a.level.cmp(&b.level))
            .then(a.uid.cmp(&b.uid))
    });

    let mut table = Table::new();
    table.set_header(vec!["UID", "Scheme", "Level", "Code", "Name"]);
    apply_table_style(&mut table);
    for region in regions {
        table.add_row(vec![
            region.uid.clone(),
            region.scheme.clone(),
            region.level.to_string(),
            eden_model::normalize_raw(region.code.as_ref()),
            region.display_name().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
