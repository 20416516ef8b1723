use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::core::PointSet;
use crate::foundation::error::{HeatError, HeatResult};

/// Load a JSON array of `{"x": <number>, "y": <number>}` objects.
///
/// Extra fields on each object are ignored. Missing or non-numeric coordinates are reported with
/// the index of the offending element.
#[tracing::instrument(level = "debug")]
pub fn load_points(path: &Path) -> HeatResult<PointSet> {
    let f = File::open(path).with_context(|| format!("open coordinates '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| HeatError::data(format!("parse '{}': {e}", path.display())))?;
    let points = points_from_value(&value)?;
    tracing::info!(count = points.len(), path = %path.display(), "loaded coordinates");
    Ok(points)
}

/// Parse the coordinate format of [`load_points`] from a string.
pub fn parse_points(json: &str) -> HeatResult<PointSet> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| HeatError::data(format!("parse points: {e}")))?;
    points_from_value(&value)
}

fn points_from_value(value: &serde_json::Value) -> HeatResult<PointSet> {
    let items = value
        .as_array()
        .ok_or_else(|| HeatError::data("coordinates must be a JSON array of objects"))?;
    let mut xs = Vec::with_capacity(items.len());
    let mut ys = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        xs.push(coordinate(item, i, "x")?);
        ys.push(coordinate(item, i, "y")?);
    }
    PointSet::new(xs, ys)
}

fn coordinate(item: &serde_json::Value, index: usize, key: &str) -> HeatResult<f64> {
    match item.get(key) {
        None => Err(HeatError::data(format!(
            "point {index} is missing required key '{key}'"
        ))),
        Some(v) => v.as_f64().ok_or_else(|| {
            HeatError::data(format!("point {index} has non-numeric '{key}': {v}"))
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/points.rs"]
mod tests;
