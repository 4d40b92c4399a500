//! Binary node coordinate maps used by the network exports

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;

/// Node label -> 2D plotting position
pub type Coordinates = HashMap<String, (f64, f64)>;

/// Read a bincode-encoded coordinate map
pub fn load_coordinates<P: AsRef<Path>>(path: P) -> Result<Coordinates> {
    let path = path.as_ref();
    log::info!("Reading coordinates: {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}

/// Write a coordinate map in the format read by `load_coordinates`
pub fn save_coordinates<P: AsRef<Path>>(path: P, coords: &Coordinates) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, coords)?;
    Ok(())
}

/// Evenly spaced positions on the unit circle, in node order
pub fn circular_layout(labels: &[String]) -> Coordinates {
    let n = labels.len().max(1) as f64;
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n;
            (label.clone(), (angle.cos(), angle.sin()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_survive_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coords.bin");
        let mut coords = Coordinates::new();
        coords.insert("1".to_string(), (0.5, -1.0));
        coords.insert("2".to_string(), (3.0, 4.0));

        save_coordinates(&path, &coords).unwrap();
        assert_eq!(load_coordinates(&path).unwrap(), coords);
    }

    #[test]
    fn garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coords.bin");
        std::fs::write(&path, [0xFFu8; 3]).unwrap();
        assert!(load_coordinates(&path).is_err());
    }

    #[test]
    fn circle_positions() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let coords = circular_layout(&labels);
        assert!((coords["a"].0 - 1.0).abs() < 1e-12);
        assert!((coords["b"].0 + 1.0).abs() < 1e-12);
    }
}
