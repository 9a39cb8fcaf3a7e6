use anyhow::{Context, Result};
use protestmap_core::{
    build_dataset, core_version, load_once, JsonRowSource, MapScene, Normalizer, QueryState,
    TrackerConfig,
};
use serde_json::json;
use std::path::PathBuf;

pub fn build(
    config: &TrackerConfig,
    rows: PathBuf,
    out: Option<PathBuf>,
    as_json: bool,
) -> Result<()> {
    let out = out.unwrap_or_else(|| config.dataset_path.clone());
    let source = JsonRowSource::new(rows);
    let normalizer = Normalizer::new(config.columns.clone());

    let report = build_dataset(&source, &normalizer, &out)
        .with_context(|| format!("building dataset into {}", out.display()))?;

    if as_json {
        let body = json!({
            "rows_fetched": report.rows_fetched,
            "points_written": report.points_written,
            "dropped_missing_id": report.dropped_missing_id,
            "dropped_bad_coordinates": report.dropped_bad_coordinates,
            "defaulted_dates": report.defaulted_dates,
            "output": report.output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("Fetched {} rows!", report.rows_fetched);
        println!(
            "wrote {} points to {} (dropped {} without id, {} with bad coordinates)",
            report.points_written,
            report.output.display(),
            report.dropped_missing_id,
            report.dropped_bad_coordinates
        );
    }
    Ok(())
}

pub struct QueryArgs {
    pub data: Option<PathBuf>,
    pub url: Option<String>,
    pub current: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
    pub embeds: bool,
}

pub fn query(config: &TrackerConfig, args: QueryArgs, as_json: bool) -> Result<()> {
    let path = args.data.unwrap_or_else(|| config.dataset_path.clone());
    let dataset =
        load_once(&path).with_context(|| format!("loading dataset {}", path.display()))?;

    let mut state = args
        .url
        .as_deref()
        .map(QueryState::from_query_string)
        .unwrap_or_default();
    if let Some(current) = args.current {
        state.selected_id = Some(current);
    }
    if args.from.is_some() {
        state.range_start = args.from;
    }
    if args.to.is_some() {
        state.range_end = args.to;
    }

    let mut options = config.render;
    options.show_embeds |= args.embeds;

    let view = dataset.engine().evaluate(&state);
    let scene = MapScene::from_view(&view, &options);

    if as_json {
        let body = json!({
            "range": view.range,
            "total_points": dataset.len(),
            "visible_points": view.points.len(),
            "selection_in_range": view.selection_in_range(),
            "state": view.state,
            "scene": scene,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match view.range {
        Some(range) => println!(
            "range {}..{} ({} of {} points)",
            range.start,
            range.end,
            view.points.len(),
            dataset.len()
        ),
        None => println!("range none (0 of {} points)", dataset.len()),
    }
    for marker in &scene.markers {
        println!(
            "marker {} lat={} lng={} radius={}{}",
            marker.id,
            marker.latitude,
            marker.longitude,
            marker.radius,
            if marker.selected { " selected" } else { "" }
        );
    }
    if let Some(popup) = &scene.popup {
        println!("popup {} {}", popup.title, popup.date_label);
        if let Some(notes) = &popup.notes {
            println!("  {notes}");
        }
        for link in &popup.links {
            println!("  {}", link.label);
        }
        if !view.selection_in_range() {
            println!("  (selected point is outside the visible range)");
        }
    }
    println!("query {}", scene.query);
    Ok(())
}

pub fn version(as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", json!({ "core_version": core_version() }));
    } else {
        println!("protestmap_core version={}", core_version());
    }
    Ok(())
}
