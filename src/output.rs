use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::region::Street;
use crate::Result;

/// Writes street names into `<root>/<province>/<city>.txt`.
///
/// The first write of a file in a run truncates it, later writes append.
pub struct StreetWriter {
    root: PathBuf,
    seen: HashSet<PathBuf>,
}

/// Keeps a display name inside its parent directory.
fn file_safe(name: &str) -> String {
    let name = name.replace(&['/', '\\'][..], "-");
    if matches!(name.as_str(), "" | "." | "..") {
        format!("-{}", name)
    } else {
        name
    }
}

impl StreetWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        StreetWriter {
            root: root.as_ref().to_path_buf(),
            seen: HashSet::new(),
        }
    }

    pub fn files_written(&self) -> usize {
        self.seen.len()
    }

    /// Returns the file written to, or `None` when there was nothing to write.
    pub fn write_city(
        &mut self,
        province: &str,
        city: &str,
        streets: &[Street],
    ) -> Result<Option<PathBuf>> {
        if streets.is_empty() {
            return Ok(None);
        }

        let dir = self.root.join(file_safe(province));
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.txt", file_safe(city)));

        let mut options = OpenOptions::new();
        if self.seen.contains(&path) {
            debug!("Appending {} street(s) to {:?}", streets.len(), path);
            options.append(true).create(true);
        } else {
            options.write(true).create(true).truncate(true);
        }

        let mut file = BufWriter::new(options.open(&path)?);
        for street in streets {
            writeln!(file, "{}", street.name)?;
        }
        file.flush()?;

        self.seen.insert(path.clone());
        Ok(Some(path))
    }
}
