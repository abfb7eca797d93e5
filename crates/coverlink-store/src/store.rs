//! The session store: shared, observable, persistent session state.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use coverlink_protocol::Role;
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::Session;

/// Handle to the one piece of shared mutable state in the client.
///
/// Cheap to clone (`Arc` inside); every clone sees the same session.
/// Reads come from the in-memory copy, which is kept in lockstep with
/// the persisted file — the two never diverge for longer than the
/// duration of a single [`write`](SessionStore::write).
///
/// ## Failure semantics
///
/// The store itself never fails. If the persistence medium is missing,
/// unreadable, or corrupt, every operation degrades to the "absent"
/// (unauthenticated) state with a warning in the log — the rest of the
/// system sees a logged-out user rather than a crash.
///
/// ## Change notification
///
/// After every write or clear, subscribers obtained through
/// [`subscribe`](SessionStore::subscribe) observe the new snapshot. This
/// is a decoupled broadcast: independently mounted views stay in sync
/// without holding references to each other, and a late subscriber
/// simply sees the current value (`tokio::sync::watch` keeps only the
/// latest — exactly the semantics a session snapshot wants).
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    /// Where the session is persisted. `None` for a purely in-memory
    /// store (tests, or a host without durable storage).
    path: Option<PathBuf>,

    /// The in-memory copy — the one every component reads.
    state: RwLock<Option<Session>>,

    /// Broadcast of the latest snapshot.
    notify: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Opens the store backed by the given file, reading any previously
    /// persisted session.
    ///
    /// A missing file means "logged out". An unreadable or corrupt file
    /// also means "logged out" (with a warning) — startup never fails on
    /// account of session state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = load(&path);
        let (notify, _) = watch::channel(initial.clone());
        SessionStore {
            inner: Arc::new(Inner {
                path: Some(path),
                state: RwLock::new(initial),
                notify,
            }),
        }
    }

    /// Creates a store with no persistence medium.
    ///
    /// Behaves identically except nothing survives a restart. Used in
    /// tests and as the degraded mode when no store path is configured.
    pub fn in_memory() -> Self {
        let (notify, _) = watch::channel(None);
        SessionStore {
            inner: Arc::new(Inner {
                path: None,
                state: RwLock::new(None),
                notify,
            }),
        }
    }

    /// Replaces the session: in-memory copy and persisted copy together,
    /// then the change broadcast.
    ///
    /// Atomic from the caller's perspective — no reader ever observes a
    /// partially written session, in memory (single swap under the lock)
    /// or on disk (write-to-temp-then-rename). The file is updated under
    /// the same write lock as the memory swap, so a racing `clear` cannot
    /// interleave between the two and leave them disagreeing. Last writer
    /// wins.
    pub fn write(&self, session: Session) {
        {
            let mut state = self.inner.state.write();
            *state = Some(session.clone());
            self.persist(Some(&session));
        }
        tracing::info!(role = %session.role, "session persisted");
        self.inner.notify.send_replace(Some(session));
    }

    /// Removes the session everywhere. Idempotent: clearing an absent
    /// session is a no-op apart from the change notification.
    ///
    /// The file removal happens under the same write lock as the memory
    /// take, mirroring [`write`](SessionStore::write).
    pub fn clear(&self) {
        let had_session = {
            let mut state = self.inner.state.write();
            let had = state.take().is_some();
            self.persist(None);
            had
        };
        if had_session {
            tracing::info!("session cleared");
        }
        self.inner.notify.send_replace(None);
    }

    /// Current snapshot of the session, or `None` when logged out.
    pub fn read(&self) -> Option<Session> {
        self.inner.state.read().clone()
    }

    /// The bearer token, if authenticated.
    ///
    /// Token present ⇔ the session counts as authenticated; the gateway
    /// keys off exactly this.
    pub fn token(&self) -> Option<String> {
        self.inner.state.read().as_ref().map(|s| s.token.clone())
    }

    /// The current role, read from the same shared source as everything
    /// else — consumers must never cache a private copy.
    pub fn role(&self) -> Option<Role> {
        self.inner.state.read().as_ref().map(|s| s.role)
    }

    /// Whether a session (and therefore a token) is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().is_some()
    }

    /// Subscribes to session changes.
    ///
    /// The receiver yields the latest snapshot after every write or
    /// clear; a fresh subscriber starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.notify.subscribe()
    }

    /// Best-effort persistence. Failures keep the in-memory state
    /// authoritative and log a warning — the contract is degradation,
    /// not propagation.
    fn persist(&self, session: Option<&Session>) {
        let Some(path) = &self.inner.path else {
            return;
        };
        match session {
            Some(session) => {
                if let Err(e) = write_atomically(path, session) {
                    tracing::warn!(error = %e, path = %path.display(),
                        "failed to persist session; continuing in memory");
                }
            }
            None => {
                if let Err(e) = fs::remove_file(path) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(error = %e, path = %path.display(),
                            "failed to remove persisted session");
                    }
                }
            }
        }
    }
}

/// Reads and parses the persisted session, degrading to `None` on any
/// problem.
fn load(path: &PathBuf) -> Option<Session> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(),
                "session file unreadable; starting logged out");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(),
                "session file corrupt; starting logged out");
            None
        }
    }
}

/// Writes the session to a sibling temp file and renames it into place,
/// so a crash mid-write can never leave a truncated session behind.
fn write_atomically(path: &PathBuf, session: &Session) -> std::io::Result<()> {
    let bytes = serde_json::to_vec_pretty(session)
        .map_err(std::io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

// =========================================================================
// Tests
// =========================================================================
