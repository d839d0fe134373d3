use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists the drug files of a data directory in file-name order.
///
/// A drug file is any regular file directly inside `data_dir` whose extension equals
/// `extension`, except `polymer_path` itself.
pub fn discover_drug_files(
    data_dir: &Path,
    polymer_path: &Path,
    extension: &str,
) -> io::Result<Vec<PathBuf>> {
    let polymer_name = polymer_path.file_name();
    let mut drug_files = Vec::new();

    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == extension);
        if has_extension && path.file_name() != polymer_name {
            drug_files.push(path);
        }
    }

    drug_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        "Found {} drug file(s) with extension '{}' in {:?}.",
        drug_files.len(),
        extension,
        data_dir
    );
    Ok(drug_files)
}
