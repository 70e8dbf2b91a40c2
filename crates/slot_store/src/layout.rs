//! SlotLayout - maps slot indices to file paths

use contracts::StoreConfig;
use std::path::{Path, PathBuf};

/// Deterministic naming for the slot files inside the error directory
#[derive(Debug, Clone)]
pub struct SlotLayout {
    dir: PathBuf,
    prefix: String,
    extension: String,
    num_files: usize,
}

impl SlotLayout {
    /// Build the layout described by a store config
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            dir: config.error_dir_path(),
            prefix: config.file_prefix.clone(),
            extension: config.file_extension.clone(),
            num_files: config.num_files,
        }
    }

    /// Error directory holding every slot
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of slots
    pub fn num_slots(&self) -> usize {
        self.num_files
    }

    /// File name of slot `index`, e.g. `errors.3.xml`
    pub fn file_name(&self, index: usize) -> String {
        format!("{}.{}.{}", self.prefix, index, self.extension)
    }

    /// Full path of slot `index`
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(self.file_name(index))
    }

    /// Slot indices and paths in scan order
    pub fn slots(&self) -> impl Iterator<Item = (usize, PathBuf)> + '_ {
        (0..self.num_files).map(move |index| (index, self.path(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        let layout = SlotLayout::from_config(&StoreConfig::with_root("/app"));
        assert_eq!(layout.num_slots(), 10);
        assert_eq!(layout.file_name(0), "errors.0.xml");
        assert_eq!(layout.file_name(9), "errors.9.xml");
        assert_eq!(
            layout.path(3),
            PathBuf::from("/app/protected/emc-shopkeeper-errors/errors.3.xml")
        );
    }

    #[test]
    fn test_slots_in_index_order() {
        let config = StoreConfig {
            num_files: 3,
            file_prefix: "reports".into(),
            file_extension: "log".into(),
            ..StoreConfig::with_root("/data")
        };
        let layout = SlotLayout::from_config(&config);
        let names: Vec<_> = layout
            .slots()
            .map(|(i, p)| (i, p.file_name().unwrap().to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "reports.0.log".to_string()),
                (1, "reports.1.log".to_string()),
                (2, "reports.2.log".to_string()),
            ]
        );
    }
}
