//! User-facing notices (config results, game over, handler failures).

use web_sys::window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, text)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Something that can show a notice to the player.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Browser `alert()` dialogs.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: Notice) {
        let message = format!("{}\n\n{}", notice.title, notice.text);
        let shown = window().is_some_and(|w| w.alert_with_message(&message).is_ok());
        if !shown {
            log::warn!("could not show notice: {}", notice.title);
        }
    }
}
