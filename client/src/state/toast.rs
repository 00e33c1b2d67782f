//! Transient user notifications.
//!
//! DESIGN
//! ======
//! Toasts are plain data; the toast host component owns presentation and the
//! auto-dismiss timer.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// How long a toast stays on screen before it is dismissed automatically.
pub const TOAST_DURATION_MS: u32 = 5_000;

/// Visual severity of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

impl ToastVariant {
    pub fn class(self) -> &'static str {
        match self {
            Self::Default => "toast",
            Self::Destructive => "toast toast--destructive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

/// Currently visible toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, title: impl Into<String>, description: Option<String>, variant: ToastVariant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            title: title.into(),
            description,
            variant,
        });
        id
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, Some(description.into()), ToastVariant::Default)
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, Some(description.into()), ToastVariant::Destructive)
    }

    /// Remove a toast. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
