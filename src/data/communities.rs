//! Community files: one community per line

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::community::Partition;
use crate::error::{NetError, Result};

/// Parse whitespace-separated integer node ids, one community per line.
/// Lines starting with `#` are skipped; communities are labelled 0, 1, ...
/// in file order.
pub fn parse_partition<R: BufRead>(reader: R) -> Result<Partition> {
    let mut communities = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let members = line
            .split_whitespace()
            .map(|field| {
                field.parse::<u32>().map_err(|_| NetError::Parse {
                    line: i + 1,
                    msg: format!("invalid node id {:?}", field),
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        communities.push(members);
    }
    Ok(Partition::from_communities(communities))
}

/// Load a community file
pub fn load_partition<P: AsRef<Path>>(path: P) -> Result<Partition> {
    let path = path.as_ref();
    log::info!("Reading communities: {}", path.display());
    parse_partition(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_communities() {
        let partition = parse_partition(Cursor::new("# ground truth\n1 2 3\n4 5\n")).unwrap();
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.communities[&0], vec![1, 2, 3]);
        assert_eq!(partition.communities[&1], vec![4, 5]);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = parse_partition(Cursor::new("1 a\n")).unwrap_err();
        assert!(matches!(err, NetError::Parse { line: 1, .. }));
    }
}
