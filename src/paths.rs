use log::warn;
use std::path::{is_separator, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const ACCOUNT_SUFFIX: &str = "_account.csv";
const CREDIT_CARD_SUFFIX: &str = "_cc.csv";

/// Where the two ledgers of a run are written.
#[derive(Debug, PartialEq)]
pub struct OutputPaths {
    pub account: PathBuf,
    pub credit_card: PathBuf,
}

impl OutputPaths {
    /// Names both ledgers after `root`, so `statements/2024` yields
    /// `statements/2024_account.csv` and `statements/2024_cc.csv`.
    pub fn for_root(root: &Path) -> Self {
        let root = root.to_string_lossy();
        let base = root.trim_end_matches(is_separator);

        Self {
            account: PathBuf::from(format!("{}{}", base, ACCOUNT_SUFFIX)),
            credit_card: PathBuf::from(format!("{}{}", base, CREDIT_CARD_SUFFIX)),
        }
    }
}

/// Expands the inputs of a run into a sorted list of fragment files.
///
/// Files are taken as given, directories are walked recursively for CSV
/// files. With no inputs at all `scan_root` is walked instead. Hidden entries
/// and ledgers written by earlier runs are left out of every walk.
pub fn discover(inputs: &[PathBuf], scan_root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();

    if inputs.is_empty() {
        files.extend(walk(scan_root)?);
    }

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(walk(input)?);
        } else {
            warn!("ignoring {}, not a file or directory", input.display());
        }
    }

    let mut files = files.into_iter().map(without_cur_dir).collect::<Vec<_>>();
    files.sort();
    files.dedup();

    Ok(files)
}

fn walk(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) if is_fragment(&entry) => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_fragment(entry: &DirEntry) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }

    // Matched as written: `jan.CSV` is not a fragment.
    let name = entry.file_name().to_string_lossy();
    name.ends_with(".csv")
        && !name.ends_with(ACCOUNT_SUFFIX)
        && !name.ends_with(CREDIT_CARD_SUFFIX)
}

/// `./a/b.csv` becomes `a/b.csv`.
fn without_cur_dir(path: PathBuf) -> PathBuf {
    match path.strip_prefix(".") {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path,
    }
}

fn is_traversal_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".") || path == Path::new("/")
}

/// Finds the deepest directory that contains every one of `files`.
///
/// Starts from the first file's directory and walks upwards until every file
/// lies below it, giving up at the current directory or the filesystem root.
pub fn common_root(files: &[PathBuf]) -> PathBuf {
    let mut root = match files.first().and_then(|file| file.parent()) {
        Some(parent) => parent.to_path_buf(),
        None => return PathBuf::new(),
    };

    for file in files {
        while !file.starts_with(&root) && !is_traversal_root(&root) {
            root = match root.parent() {
                Some(parent) => parent.to_path_buf(),
                None => break,
            };
        }
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn paths(values: &[&str]) -> Vec<PathBuf> {
        values.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn should_find_deepest_shared_directory() {
        let files = paths(&[
            "statements/2024/chequing/jan.csv",
            "statements/2024/chequing/feb.csv",
            "statements/2024/visa/jan.csv",
        ]);

        assert_eq!(common_root(&files), PathBuf::from("statements/2024"));
    }

    #[test]
    fn should_keep_single_directory() {
        let files = paths(&["statements/2024/jan.csv", "statements/2024/feb.csv"]);
        assert_eq!(common_root(&files), PathBuf::from("statements/2024"));
    }

    #[test]
    fn should_stop_at_traversal_roots() {
        assert_eq!(common_root(&paths(&["a/x.csv", "b/y.csv"])), PathBuf::new());
        assert_eq!(
            common_root(&paths(&["/a/x.csv", "/b/y.csv"])),
            PathBuf::from("/")
        );
        assert_eq!(common_root(&paths(&["x.csv"])), PathBuf::new());
        assert_eq!(common_root(&[]), PathBuf::new());
    }

    #[test]
    fn should_compare_whole_components() {
        let files = paths(&["data/2024/a.csv", "data/2024-old/b.csv"]);
        assert_eq!(common_root(&files), PathBuf::from("data"));
    }

    #[test]
    fn should_name_outputs_after_root() {
        assert_eq!(
            OutputPaths::for_root(Path::new("statements/2024/")),
            OutputPaths {
                account: PathBuf::from("statements/2024_account.csv"),
                credit_card: PathBuf::from("statements/2024_cc.csv"),
            }
        );
        assert_eq!(
            OutputPaths::for_root(Path::new("")).account,
            PathBuf::from("_account.csv")
        );
    }

    #[test]
    fn should_discover_csv_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("visa/2024")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("visa/2024/jan.csv"), "").unwrap();
        fs::write(root.join("chequing.csv"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".cache/old.csv"), "").unwrap();
        fs::write(root.join("statements_account.csv"), "").unwrap();
        fs::write(root.join("statements_cc.csv"), "").unwrap();

        let files = discover(&[root.to_path_buf()], Path::new(".")).unwrap();

        assert_eq!(
            files,
            vec![root.join("chequing.csv"), root.join("visa/2024/jan.csv")]
        );
    }

    #[test]
    fn should_match_extension_case_sensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("jan.csv"), "").unwrap();
        fs::write(dir.path().join("feb.CSV"), "").unwrap();
        fs::write(dir.path().join("mar.Csv"), "").unwrap();

        let files = discover(&[], dir.path()).unwrap();

        assert_eq!(files, vec![dir.path().join("jan.csv")]);
    }

    #[test]
    fn should_take_explicit_files_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let statement = dir.path().join("statement.txt");
        fs::write(&statement, "").unwrap();

        let files = discover(
            &[
                statement.clone(),
                statement.clone(),
                dir.path().join("missing.csv"),
            ],
            Path::new("."),
        )
        .unwrap();

        assert_eq!(files, vec![statement]);
    }

    #[test]
    fn should_scan_root_without_inputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("jan.csv"), "").unwrap();

        let files = discover(&[], dir.path()).unwrap();

        assert_eq!(files, vec![dir.path().join("jan.csv")]);
    }

    #[test]
    fn should_strip_leading_cur_dir() {
        assert_eq!(
            without_cur_dir(PathBuf::from("./a/b.csv")),
            PathBuf::from("a/b.csv")
        );
        assert_eq!(
            without_cur_dir(PathBuf::from("a/b.csv")),
            PathBuf::from("a/b.csv")
        );
    }
}
