use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds the path of a keyed entry inside a directory.
///
/// Path separators in the key are replaced by `_` so the entry always stays
/// a direct child of `dir`.
///
/// Example:
/// `.rng_cache` + `"a/b"` + `"bin"` → `.rng_cache/a_b.bin`
pub(crate) fn build_entry_path<P: AsRef<Path>>(dir: P, key: &str, extension: &str) -> PathBuf {
	let safe_key = key.replace(['/', '\\'], "_");
	dir.as_ref().join(format!("{safe_key}.{extension}"))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/generic-fantasy.yaml"` → `"generic-fantasy"`
/// - `"names.txt"` → `"names"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with one of the given extensions in a directory.
///
/// Returns file names only (no paths), sorted.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if !path.is_file() {
			continue;
		}
		let matches = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| extensions.contains(&ext));
		if matches {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
