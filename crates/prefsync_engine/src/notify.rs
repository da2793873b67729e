//! User-facing notifications.

use parking_lot::Mutex;

/// How prominently a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something failed.
    Error,
    /// Something may need attention.
    Warning,
    /// Informational.
    Info,
    /// Something succeeded.
    Success,
}

/// Messages the engine can show to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// A pull failed.
    FailedRetrievingPreferences,
    /// A push failed.
    FailedSettingPreferences,
}

impl MessageKey {
    /// Returns the stable translation key.
    pub fn id(&self) -> &'static str {
        match self {
            MessageKey::FailedRetrievingPreferences => "failedRetrievingPreferences",
            MessageKey::FailedSettingPreferences => "failedSettingPreferences",
        }
    }
}

/// Turns message keys into user-facing text.
pub trait Translator: Send + Sync {
    /// Returns the localized text for `key`.
    fn translate(&self, key: MessageKey) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn translate(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::FailedRetrievingPreferences => "Failed retrieving preferences",
            MessageKey::FailedSettingPreferences => "Failed setting preferences",
        };
        text.to_string()
    }
}

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    /// Shows `message` with the given severity.
    fn notify(&self, message: &str, severity: Severity);
}

/// A notice captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

/// A [`Notifier`] that keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Returns true if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices.lock().push(Notice {
            message: message.to_string(),
            severity,
        });
    }
}
