use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::{debug, warn};

use crate::error::Result;
use crate::report::grouped::ReportGroup;

/// Writes each group's projected, ordered rows to `<dir>/<group>.csv`.
///
/// Group names are sanitized into file names, so distinct groups can map to
/// the same file; later groups then get a `-2`, `-3`, ... suffix. Names are
/// compared case-insensitively since the filesystem may be.
#[derive(Debug)]
pub struct GroupExporter {
    dir: PathBuf,
    used: HashSet<String>,
}

impl GroupExporter {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            used: HashSet::new(),
        }
    }

    pub fn export(&mut self, group: &ReportGroup<'_>) -> Result<PathBuf> {
        let stem = self.claim(&group.name());
        let path = self.dir.join(format!("{}.csv", stem));
        write_group_csv(&path, group)?;
        debug!("Exported {} rows of '{}' to {}", group.len(), group.name(), path.display());
        Ok(path)
    }

    fn claim(&mut self, name: &str) -> String {
        let stem = file_stem(name);
        let mut candidate = stem.clone();
        let mut n = 1;
        while !self.used.insert(candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{}-{}", stem, n);
        }
        if n > 1 {
            warn!("Group '{}' clashes with an earlier export, writing {}.csv", name, candidate);
        }
        candidate
    }
}

fn write_group_csv(path: &Path, group: &ReportGroup<'_>) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(group.columns().iter().map(|c| c.name()))?;
    for row in group.rows() {
        wtr.write_record(row.values.iter().map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if stem.is_empty() { "_".to_string() } else { stem }
}
