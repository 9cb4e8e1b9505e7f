//! Filesystem-backed session registry.
//!
//! Each session owns a single record file, `agents-md-loaded-<key>`, inside
//! the registry directory. The record is a newline-delimited list of
//! absolute paths, appended one line per delivered file and never
//! compacted, since a path is written at most once.
//!
//! Lines hold the raw path bytes, so paths that are not valid UTF-8 survive
//! the round trip. A backslash is stored as `\\` and a newline as `\n`;
//! every other byte is stored verbatim.
//!
//! # Security
//!
//! Session identifiers come from the host and are untrusted. Identifiers
//! that are not plain filenames are sanitised and suffixed with a digest so
//! that the record always lands inside the registry directory and distinct
//! identifiers never share a record.

use crate::storage::SessionId;
use crate::storage::traits::SessionRegistry;
use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Prefix of every registry record filename.
pub const RECORD_PREFIX: &str = "agents-md-loaded-";

/// Hex digits of the SHA-256 digest appended to sanitised identifiers.
const DIGEST_LEN: usize = 16;

/// Maximum identifier length used verbatim in a record name.
const MAX_VERBATIM_LEN: usize = 200;

/// Session registry persisted as one record file per session.
#[derive(Debug)]
pub struct FileRegistry {
    /// Directory holding the record files.
    dir: PathBuf,
    /// Paths added during this process, keyed by record name.
    ///
    /// Consulted alongside the record so that a session whose record cannot
    /// be written still deduplicates within the current invocation.
    overlay: Mutex<HashMap<String, HashSet<PathBuf>>>,
}

impl FileRegistry {
    /// Creates a registry storing records in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overlay: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a registry in the OS temporary directory.
    #[must_use]
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Returns the registry directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the record path for `session`.
    ///
    /// Deterministic: the same identifier always maps to the same record.
    #[must_use]
    pub fn record_path(&self, session: &SessionId) -> PathBuf {
        self.dir.join(record_name(session))
    }

    /// Reads the persisted paths for `session`.
    ///
    /// A missing or unreadable record reads as empty.
    fn read_record(&self, session: &SessionId) -> HashSet<PathBuf> {
        let path = self.record_path(session);
        match fs::read(&path) {
            Ok(contents) => contents
                .split(|b| *b == b'\n')
                .filter(|line| !line.is_empty())
                .map(decode_line)
                .collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                tracing::warn!(
                    record = %path.display(),
                    error = %e,
                    "failed to read session registry; treating as empty"
                );
                HashSet::new()
            },
        }
    }

    fn overlay_contains(&self, session: &SessionId, path: &Path) -> bool {
        let overlay = self.overlay.lock().unwrap_or_else(PoisonError::into_inner);
        overlay
            .get(&record_name(session))
            .is_some_and(|paths| paths.contains(path))
    }

    fn remember(&self, session: &SessionId, path: &Path) {
        let mut overlay = self.overlay.lock().unwrap_or_else(PoisonError::into_inner);
        overlay
            .entry(record_name(session))
            .or_default()
            .insert(path.to_path_buf());
    }
}

impl SessionRegistry for FileRegistry {
    fn open(&self, session: &SessionId) {
        let path = self.record_path(session);
        let result = OpenOptions::new().create(true).append(true).open(&path);
        if let Err(e) = result {
            tracing::warn!(
                record = %path.display(),
                error = %e,
                "session registry unavailable; deduplicating in memory only"
            );
        }
    }

    fn contains(&self, session: &SessionId, path: &Path) -> bool {
        self.overlay_contains(session, path) || self.read_record(session).contains(path)
    }

    fn add(&self, session: &SessionId, path: &Path) -> Result<()> {
        if self.contains(session, path) {
            return Ok(());
        }
        self.remember(session, path);

        let record = self.record_path(session);
        let mut line = encode_line(path);
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&record)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| Error::OperationFailed {
                operation: "append_session_registry".to_string(),
                cause: format!("{}: {e}", record.display()),
            })
    }

    fn destroy(&self, session: &SessionId) {
        let name = record_name(session);
        self.overlay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);

        let path = self.dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(record = %path.display(), "session registry removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {},
            Err(e) => tracing::debug!(
                record = %path.display(),
                error = %e,
                "failed to remove session registry"
            ),
        }
    }
}

/// Encodes a path as one record line, without the terminating newline.
fn encode_line(path: &Path) -> Vec<u8> {
    let bytes = path.as_os_str().as_encoded_bytes();
    let mut line = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => line.extend_from_slice(b"\\\\"),
            b'\n' => line.extend_from_slice(b"\\n"),
            _ => line.push(b),
        }
    }
    line
}

/// Decodes a record line written by [`encode_line`].
fn decode_line(line: &[u8]) -> PathBuf {
    let mut bytes = Vec::with_capacity(line.len());
    let mut iter = line.iter().copied();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match iter.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    PathBuf::from(os_string_from_bytes(bytes))
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Builds the record filename for a session identifier.
///
/// Plain identifiers are used verbatim. Anything else is sanitised and
/// disambiguated with a truncated SHA-256 digest of the original.
fn record_name(session: &SessionId) -> String {
    let id = session.as_str();
    if is_plain(id) {
        return format!("{RECORD_PREFIX}{id}");
    }

    let sanitised: String = id
        .chars()
        .take(MAX_VERBATIM_LEN)
        .map(|c| if is_plain_char(c) { c } else { '_' })
        .collect();
    let digest = hex::encode(Sha256::digest(id.as_bytes()));
    format!("{RECORD_PREFIX}{sanitised}-{}", &digest[..DIGEST_LEN])
}

fn is_plain(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_VERBATIM_LEN
        && id != "."
        && id != ".."
        && id.chars().all(is_plain_char)
}

const fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry() -> (TempDir, FileRegistry) {
        let dir = TempDir::new().unwrap();
        let registry = FileRegistry::new(dir.path());
        (dir, registry)
    }

    #[test]
    fn test_record_path_uses_plain_id_verbatim() {
        let (dir, registry) = registry();
        let session = SessionId::new("abc-123_def.4");
        assert_eq!(
            registry.record_path(&session),
            dir.path().join("agents-md-loaded-abc-123_def.4")
        );
    }

    #[test]
    fn test_record_path_is_deterministic() {
        let (_dir, registry) = registry();
        let session = SessionId::new("a/b c");
        assert_eq!(registry.record_path(&session), registry.record_path(&session));
    }

    #[test]
    fn test_record_path_cannot_escape_dir() {
        let (dir, registry) = registry();
        for id in ["../../etc/passwd", "..", ".", "a/b", "a\\b", "", "x\0y"] {
            let path = registry.record_path(&SessionId::new(id));
            assert_eq!(path.parent(), Some(dir.path()), "id {id:?} escaped");
        }
    }

    #[test]
    fn test_sanitised_ids_do_not_collide() {
        let (_dir, registry) = registry();
        let a = registry.record_path(&SessionId::new("a/b"));
        let b = registry.record_path(&SessionId::new("a:b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_creates_empty_record() {
        let (_dir, registry) = registry();
        let session = SessionId::new("s1");
        registry.open(&session);

        let record = registry.record_path(&session);
        assert!(record.exists());
        assert_eq!(fs::read_to_string(record).unwrap(), "");
    }

    #[test]
    fn test_open_is_idempotent() {
        let (_dir, registry) = registry();
        let session = SessionId::new("s1");
        registry.add(&session, Path::new("/p/agents.md")).unwrap();
        registry.open(&session);

        assert!(registry.contains(&session, Path::new("/p/agents.md")));
    }

    #[test]
    fn test_add_appends_one_line_per_path() {
        let (_dir, registry) = registry();
        let session = SessionId::new("s1");
        registry.add(&session, Path::new("/p/agents.md")).unwrap();
        registry.add(&session, Path::new("/p/src/agents.md")).unwrap();
        registry.add(&session, Path::new("/p/agents.md")).unwrap();

        let contents = fs::read_to_string(registry.record_path(&session)).unwrap();
        assert_eq!(contents, "/p/agents.md\n/p/src/agents.md\n");
    }

    #[test]
    fn test_contains_reads_records_from_other_processes() {
        let (dir, registry) = registry();
        let session = SessionId::new("s1");
        fs::write(
            dir.path().join("agents-md-loaded-s1"),
            "/p/agents.md\n\n/p/src/agents.md\n",
        )
        .unwrap();

        assert!(registry.contains(&session, Path::new("/p/agents.md")));
        assert!(registry.contains(&session, Path::new("/p/src/agents.md")));
        assert!(!registry.contains(&session, Path::new("/p/lib/agents.md")));
    }

    #[test]
    fn test_path_with_newline_is_found_by_another_process() {
        let (dir, first) = registry();
        let session = SessionId::new("s1");
        let path = Path::new("/p/a\nb/agents.md");
        first.add(&session, path).unwrap();

        let second = FileRegistry::new(dir.path());
        assert!(second.contains(&session, path));
        assert!(!second.contains(&session, Path::new("/p/a")));
        assert!(!second.contains(&session, Path::new("b/agents.md")));
    }

    #[test]
    fn test_path_with_backslashes_round_trips() {
        let (dir, first) = registry();
        let session = SessionId::new("s1");
        let path = Path::new("/p/a\\nb\\/agents.md");
        first.add(&session, path).unwrap();

        let second = FileRegistry::new(dir.path());
        assert!(second.contains(&session, path));
        assert!(!second.contains(&session, Path::new("/p/a\nb\\/agents.md")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_found_by_another_process() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, first) = registry();
        let session = SessionId::new("s1");
        let path = Path::new(OsStr::from_bytes(b"/p/caf\xe9/agents.md"));
        first.add(&session, path).unwrap();

        let second = FileRegistry::new(dir.path());
        assert!(second.contains(&session, path));
        assert!(!second.contains(&session, Path::new("/p/caf\u{fffd}/agents.md")));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let (_dir, registry) = registry();
        registry
            .add(&SessionId::new("s1"), Path::new("/p/agents.md"))
            .unwrap();

        assert!(!registry.contains(&SessionId::new("s2"), Path::new("/p/agents.md")));
    }

    #[test]
    fn test_destroy_removes_record() {
        let (_dir, registry) = registry();
        let session = SessionId::new("s1");
        registry.add(&session, Path::new("/p/agents.md")).unwrap();

        registry.destroy(&session);

        assert!(!registry.record_path(&session).exists());
        assert!(!registry.contains(&session, Path::new("/p/agents.md")));
    }

    #[test]
    fn test_destroy_missing_record_is_noop() {
        let (_dir, registry) = registry();
        registry.destroy(&SessionId::new("never-opened"));
    }

    #[test]
    fn test_unwritable_dir_degrades_to_memory() {
        let dir = TempDir::new().unwrap();
        let registry = FileRegistry::new(dir.path().join("missing").join("nested"));
        let session = SessionId::new("s1");

        registry.open(&session);
        let result = registry.add(&session, Path::new("/p/agents.md"));

        assert!(result.is_err());
        assert!(registry.contains(&session, Path::new("/p/agents.md")));
    }
}
