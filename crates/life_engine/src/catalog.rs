use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_debug;
use life_core::pattern_select::{Row, Section};
use life_core::{CatalogError, Pattern, PatternCatalog};

/// Pattern files laid out as `root/<group>/<title>.<ext>`.
///
/// Each immediate subdirectory is a section and each file inside it a row
/// titled by its file stem. Files directly under `root` and hidden entries
/// are ignored.
pub struct DirectoryPatternCatalog {
    root: PathBuf,
}

impl DirectoryPatternCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PatternCatalog for DirectoryPatternCatalog {
    fn enumerate(&self) -> Result<Vec<Section>, CatalogError> {
        let mut sections = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let Some(title) = visible_name(&entry.path()) else {
                continue;
            };
            if !entry.file_type()?.is_dir() {
                continue;
            }
            sections.push(Section {
                title,
                rows: rows_in(&entry.path())?,
            });
        }
        sections.sort_by(|a, b| a.title.cmp(&b.title));
        engine_debug!("found {} pattern groups under {:?}", sections.len(), self.root);
        Ok(sections)
    }

    fn parse(&self, locator: &Path) -> Result<Pattern, CatalogError> {
        let text = fs::read_to_string(locator)?;
        Ok(Pattern::parse_rle(&file_stem(locator), &text)?)
    }
}

fn rows_in(dir: &Path) -> Result<Vec<Row>, CatalogError> {
    let mut rows = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if visible_name(&path).is_none() || !entry.file_type()?.is_file() {
            continue;
        }
        rows.push(Row {
            title: file_stem(&path),
            locator: path,
            is_favorite: (),
        });
    }
    rows.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(rows)
}

fn visible_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    (!name.starts_with('.')).then_some(name)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
