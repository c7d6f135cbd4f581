//! Report file discovery

use crate::config::is_ignored;
use crate::FileRecord;
use anyhow::Result;
use globset::GlobSet;
use std::path::Path;
use walkdir::WalkDir;

/// Collect every file below `root` whose name equals `report_filename`,
/// tagged with its containing folder. Matching is exact file-name
/// equality, never extension or pattern. Results are ordered by folder
/// path ascending, then relative path, so output is stable across runs.
pub fn find_report_files(
    root: &Path,
    report_filename: &str,
    ignore_set: Option<&GlobSet>,
) -> Result<Vec<FileRecord>> {
    if !root.is_dir() {
        anyhow::bail!("scan root is not a directory: {}", root.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str() != Some(report_filename) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(entry.path(), set) {
                continue;
            }
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        let parent = relative.parent().unwrap_or(Path::new(""));
        let folder_path = parent
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let folder_name = parent
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        files.push(FileRecord {
            full_path: entry.path().to_path_buf(),
            relative_path: relative,
            folder_path,
            folder_name,
        });
    }

    // Stable ordering drives the section order of the generated page
    files.sort_by(|a, b| {
        a.folder_path
            .cmp(&b.folder_path)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });

    Ok(files)
}
