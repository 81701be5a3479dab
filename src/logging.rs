use std::fs::{self, File};
use std::path::PathBuf;

/// The terminal is in raw mode while the app runs, so log lines go to a file.
/// `RUST_LOG` overrides the default `info` filter. Returns the log path, or None
/// when no log file could be opened and logging stays off.
pub fn init() -> Option<PathBuf> {
    let (path, file) = open_log_file()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok()
        .map(|_| path)
}

/// `<cache dir>/tuiplot/tuiplot.log`, falling back to the temp dir
fn open_log_file() -> Option<(PathBuf, File)> {
    let candidates = dirs::cache_dir()
        .map(|d| d.join("tuiplot"))
        .into_iter()
        .chain(std::iter::once(std::env::temp_dir()));
    for dir in candidates {
        if fs::create_dir_all(&dir).is_err() {
            continue;
        }
        let path = dir.join("tuiplot.log");
        if let Ok(file) = File::create(&path) {
            return Some((path, file));
        }
    }
    None
}
