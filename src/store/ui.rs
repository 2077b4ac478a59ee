use std::sync::Mutex;

/// Transient, in-memory UI signals: toasts and the upgrade prompt.
///
/// The premium guard opens the upgrade prompt here as its one side effect;
/// the host shell drains the signals on each render. Nothing in this store
/// survives a reload.
pub struct UiStore {
    toasts: Mutex<Vec<Toast>>,
    upgrade_prompt: Mutex<Option<UpgradePrompt>>,
}

/// A one-shot message for the host to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Request to show the upgrade modal, tagged with what triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePrompt {
    /// Caller-supplied tag naming the gated feature, e.g. `"reports"`.
    pub reason: String,
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            upgrade_prompt: Mutex::new(None),
        }
    }

    pub fn push_toast(&self, message: impl Into<String>, kind: ToastKind) {
        let mut toasts = self.toasts.lock().expect("ui store lock poisoned");
        toasts.push(Toast {
            message: message.into(),
            kind,
        });
    }

    /// Drain pending toasts for display. Last-writer-wins ordering.
    pub fn take_toasts(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().expect("ui store lock poisoned");
        std::mem::take(&mut *toasts)
    }

    pub fn open_upgrade_prompt(&self, reason: impl Into<String>) {
        let mut prompt = self.upgrade_prompt.lock().expect("ui store lock poisoned");
        *prompt = Some(UpgradePrompt {
            reason: reason.into(),
        });
    }

    /// Take the pending upgrade prompt, leaving none.
    pub fn take_upgrade_prompt(&self) -> Option<UpgradePrompt> {
        let mut prompt = self.upgrade_prompt.lock().expect("ui store lock poisoned");
        prompt.take()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}
