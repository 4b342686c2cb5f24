use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;
use zip::ZipArchive;

pub const WORKOUTS_DOC: &str = "list_workouts.json";
pub const METADATA_DOC: &str = "metadata.json";
pub const DIAGRAM_DOC: &str = "diagram_data.json";

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = i16::from(verbose) - i16::from(quiet);
    let level = match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,workout_calendar={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

/// The fixture documents a bundle may hold.
pub const DOCUMENTS: [&str; 3] = [WORKOUTS_DOC, METADATA_DOC, DIAGRAM_DOC];

/// Root of an opened fixture bundle.
///
/// Directory bundles are read in place. A `.zip` is unpacked into a tempdir
/// owned by the handle and removed with it.
#[derive(Debug)]
pub struct BundleHandle {
    dir: PathBuf,
    _tmp: Option<TempDir>,
}

impl BundleHandle {
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            tracing::info!(path = %path.display(), "reading bundle in place");
            return Ok(Self {
                dir: path.to_path_buf(),
                _tmp: None,
            });
        }

        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if !is_zip {
            bail!(
                "Bundle must be a directory or a .zip file: {}",
                path.display()
            );
        }
        Self::unpack(path)
    }

    fn unpack(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening bundle {}", path.display()))?;
        let mut archive =
            ZipArchive::new(file).with_context(|| format!("reading bundle {}", path.display()))?;

        let known = archive
            .file_names()
            .filter(|entry| {
                Path::new(entry)
                    .file_name()
                    .is_some_and(|name| DOCUMENTS.iter().any(|doc| name == *doc))
            })
            .count();
        if known == 0 {
            bail!(
                "{} holds none of {}",
                path.display(),
                DOCUMENTS.join(", ")
            );
        }

        let tmp = tempfile::Builder::new()
            .prefix("workout-bundle-")
            .tempdir()
            .context("creating bundle tempdir")?;
        // Entries resolving outside the target are rejected by the archive.
        archive
            .extract(tmp.path())
            .with_context(|| format!("unpacking bundle {}", path.display()))?;
        tracing::info!(
            bundle = %path.display(),
            root = %tmp.path().display(),
            entries = archive.len(),
            documents = known,
            "bundle unpacked"
        );

        Ok(Self {
            dir: tmp.path().to_path_buf(),
            _tmp: Some(tmp),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a fixture document inside the bundle, if it has one.
    pub fn document(&self, name: &str) -> Option<PathBuf> {
        find_document(&self.dir, name)
    }
}

/// Find `name` directly under `root`, else anywhere below it (shallowest wins).
pub fn find_document(root: &Path, name: &str) -> Option<PathBuf> {
    let direct = root.join(name);
    if direct.is_file() {
        return Some(direct);
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == name)
        .min_by_key(walkdir::DirEntry::depth)
        .map(walkdir::DirEntry::into_path)
}
