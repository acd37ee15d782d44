//! Loading JavaScript sources from a project directory.

use crate::error::GradeError;
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

/// Directory names that are never descended into
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "__pycache__"];

/// File names that are skipped even when their extension matches
pub const IGNORED_FILES: &[&str] = &["package-lock.json", "package.json", "eslint.config.js"];

/// Extensions of the files that are graded
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx"];

/// One source file and its contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the file, under the code root
    pub path: PathBuf,
    /// UTF-8 contents
    pub text: String,
}

/// All source files under one root, in file-name order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBase {
    /// Sources that were read
    pub files: Vec<SourceFile>,
    /// Matching files that could not be read
    pub skipped: Vec<PathBuf>,
}

impl CodeBase {
    /// Loads every `.js` / `.jsx` file under `root`
    ///
    /// Ignored directories are pruned, ignored file names are skipped, and
    /// files that are not valid UTF-8 or cannot be read are recorded in
    /// [`CodeBase::skipped`].
    ///
    /// # Errors
    ///
    /// [`GradeError::MissingDirectory`] if `root` is not a directory.
    pub fn load(root: &Path) -> Result<Self, GradeError> {
        if !root.is_dir() {
            return Err(GradeError::MissingDirectory(root.to_path_buf()));
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| !is_ignored_dir(entry))
            .build();

        let mut code = Self::default();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "Skipping unreadable entry");
                    continue;
                },
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_source_file(entry.path()) {
                continue;
            }

            match std::fs::read_to_string(entry.path()) {
                Ok(text) => code.files.push(SourceFile {
                    path: entry.path().to_path_buf(),
                    text,
                }),
                Err(error) => {
                    tracing::warn!(path = %entry.path().display(), %error, "Could not read file");
                    code.skipped.push(entry.path().to_path_buf());
                },
            }
        }

        tracing::info!(
            root = %root.display(),
            files = code.files.len(),
            skipped = code.skipped.len(),
            "Loaded code"
        );
        Ok(code)
    }

    /// Number of files read
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file was read
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All file contents joined with newlines, in load order
    #[must_use]
    pub fn joined(&self) -> String {
        self.files
            .iter()
            .map(|file| file.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

/// Whether `path` names a graded source file
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| !IGNORED_FILES.contains(&name));
    let extension_ok = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));

    name_ok && extension_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn source_files_by_extension() {
        assert!(is_source_file(Path::new("src/App.jsx")));
        assert!(is_source_file(Path::new("components/TodoItem.js")));
        assert!(!is_source_file(Path::new("index.html")));
        assert!(!is_source_file(Path::new("module.mjs")));
    }

    #[test]
    fn ignored_names_are_not_sources() {
        assert!(!is_source_file(Path::new("eslint.config.js")));
        assert!(!is_source_file(Path::new("package.json")));
    }

    #[test]
    fn load_prunes_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("components")).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        fs::write(root.join("App.jsx"), "function App() {}").unwrap();
        fs::write(root.join("components/TodoItem.js"), "export default TodoItem;").unwrap();
        fs::write(root.join("node_modules/react/index.js"), "module.exports = {};").unwrap();
        fs::write(root.join(".git/hook.js"), "hook();").unwrap();
        fs::write(root.join("eslint.config.js"), "export default [];").unwrap();
        fs::write(root.join("README.md"), "# readme").unwrap();

        let code = CodeBase::load(root).unwrap();

        let names: Vec<_> = code
            .files
            .iter()
            .map(|f| f.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("App.jsx"), PathBuf::from("components/TodoItem.js")]
        );
        assert!(code.skipped.is_empty());
        assert_eq!(code.joined(), "function App() {}\nexport default TodoItem;");
    }

    #[test]
    fn load_skips_non_utf8_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.js"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("good.js"), "export const x = 1;").unwrap();

        let code = CodeBase::load(dir.path()).unwrap();
        assert_eq!(code.len(), 1);
        assert_eq!(code.skipped, vec![dir.path().join("bad.js")]);
    }

    #[test]
    fn load_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("student_code");

        assert!(matches!(
            CodeBase::load(&missing),
            Err(GradeError::MissingDirectory(path)) if path == missing
        ));
    }
}
