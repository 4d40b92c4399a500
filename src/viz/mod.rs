//! Export of plot-ready data: CSV series and GraphML networks

use anyhow::{anyhow, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::coords::Coordinates;
use crate::graph::Network;

/// Write equally long columns as CSV with a header row
pub fn write_series_csv(path: &Path, headers: &[&str], columns: &[&[f64]]) -> Result<()> {
    if headers.len() != columns.len() {
        return Err(anyhow!(
            "{} headers for {} columns",
            headers.len(),
            columns.len()
        ));
    }
    let rows = columns.first().map_or(0, |c| c.len());
    if columns.iter().any(|c| c.len() != rows) {
        return Err(anyhow!("CSV columns must have equal length"));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{}", headers.join(","))?;
    for row in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| c[row].to_string()).collect();
        writeln!(file, "{}", line.join(","))?;
    }
    file.flush()?;

    log::info!("Wrote {} rows to {}", rows, path.display());
    Ok(())
}

/// Maps node values onto a white-to-red colour ramp.
///
/// The lower bound sits slightly below the minimum so that the smallest value
/// still gets a visible tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorScale {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;
        let eps = (min / 1000.0).max(1e-10);
        Some(Self {
            vmin: min - eps,
            vmax: max,
        })
    }

    /// Position of `value` in `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmax <= self.vmin {
            return 0.0;
        }
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }

    /// Hex colour for `value`
    pub fn color(&self, value: f64) -> String {
        let t = self.normalize(value);
        let fade = |full: f64, end: f64| (full + (end - full) * t).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            fade(255.0, 179.0),
            fade(247.0, 0.0),
            fade(236.0, 0.0)
        )
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write a network as GraphML, optionally with one value per node (and its
/// colour) and node coordinates looked up by label
pub fn write_graphml(
    path: &Path,
    network: &Network,
    node_values: Option<(&str, &[f64])>,
    coords: Option<&Coordinates>,
) -> Result<()> {
    if let Some((name, values)) = node_values {
        if values.len() != network.node_count() {
            return Err(anyhow!(
                "{} has {} values for {} nodes",
                name,
                values.len(),
                network.node_count()
            ));
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = BufWriter::new(File::create(path)?);
    let edgedefault = if network.is_directed() { "directed" } else { "undirected" };

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    if let Some((name, _)) = node_values {
        writeln!(
            file,
            "  <key id=\"value\" for=\"node\" attr.name=\"{}\" attr.type=\"double\"/>",
            escape_xml(name)
        )?;
        writeln!(file, "  <key id=\"color\" for=\"node\" attr.name=\"color\" attr.type=\"string\"/>")?;
    }
    if coords.is_some() {
        writeln!(file, "  <key id=\"x\" for=\"node\" attr.name=\"x\" attr.type=\"double\"/>")?;
        writeln!(file, "  <key id=\"y\" for=\"node\" attr.name=\"y\" attr.type=\"double\"/>")?;
    }
    writeln!(file, "  <key id=\"weight\" for=\"edge\" attr.name=\"weight\" attr.type=\"double\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"{}\">", edgedefault)?;

    let scale = node_values.and_then(|(_, values)| ColorScale::from_values(values));
    for node in network.nodes() {
        let label = network.label(node);
        writeln!(file, "    <node id=\"n{}\">", node)?;
        writeln!(file, "      <data key=\"label\">{}</data>", escape_xml(label))?;
        if let (Some((_, values)), Some(scale)) = (node_values, scale) {
            let value = values[node as usize];
            writeln!(file, "      <data key=\"value\">{}</data>", value)?;
            writeln!(file, "      <data key=\"color\">{}</data>", scale.color(value))?;
        }
        if let Some(&(x, y)) = coords.and_then(|c| c.get(label)) {
            writeln!(file, "      <data key=\"x\">{}</data>", x)?;
            writeln!(file, "      <data key=\"y\">{}</data>", y)?;
        }
        writeln!(file, "    </node>")?;
    }

    for (edge_id, (u, v)) in network.edges().into_iter().enumerate() {
        let weight = network.weight(u, v).unwrap_or(1.0);
        writeln!(
            file,
            "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\">\n      <data key=\"weight\">{}</data>\n    </edge>",
            edge_id, u, v, weight
        )?;
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;
    file.flush()?;

    log::info!("Wrote GraphML to {}", path.display());
    Ok(())
}
