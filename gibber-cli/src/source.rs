use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use gibber_core::pipeline::TrainingPipeline;

/// A pre-fetched archive of timestamped text snippets.
///
/// Produced by an external acquisition tool; this binary only loads it.
#[derive(Deserialize, Debug)]
pub struct SnippetArchive {
    pub user: String,
    pub snippets: Vec<Snippet>,
}

#[derive(Deserialize, Debug)]
pub struct Snippet {
    pub time: String,
    pub text: String,
}

/// Loads a snippet archive from a JSON file.
pub fn load_snippets(path: &Path) -> Result<SnippetArchive, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Recursively feeds every line of every file under `dir` into the
/// pipeline.
///
/// Line order is preserved per file; the relative order between files
/// follows directory iteration and is not guaranteed. File contents are
/// decoded best-effort, so malformed encoding degrades to replacement
/// characters instead of failing the walk. Unreadable files are logged
/// and skipped.
pub fn feed_directory(dir: &Path, pipeline: &TrainingPipeline) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            feed_directory(&path, pipeline)?;
        } else if path.is_file() {
            match fs::read(&path) {
                Ok(bytes) => {
                    log::debug!("reading {}", path.display());
                    for line in String::from_utf8_lossy(&bytes).lines() {
                        pipeline.feed_line(line.to_owned());
                    }
                }
                Err(e) => log::warn!("skipping {}: {}", path.display(), e),
            }
        }
    }
    Ok(())
}
