//! Transient UI signals and the seam they are delivered through.

/// Whether a notice reports success or failure. Purely presentational —
/// the UI picks a color, nothing downstream branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, dismissible message for the user ("signed in",
/// "password updated"). Notices are fire-and-forget: emitting one never
/// fails and never blocks the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The UI surface notices are delivered to.
///
/// Same contract as the navigation seam: implementations may do nothing
/// (a view that has been discarded), but they must not panic.
pub trait Frontend: Send + Sync + 'static {
    /// Shows a transient notice.
    fn notify(&self, notice: Notice);
}
