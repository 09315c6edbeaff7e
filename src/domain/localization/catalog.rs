//! Guest-facing message catalog.
//!
//! Every key resolves for every supported language through an exhaustive
//! match, so a missing translation is a compile error rather than a runtime
//! fallback. The fallback rule only applies when the guest's language is not
//! yet known: callers pass `None` and get the default language.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Language;

/// Language used before a guest has chosen one.
pub const DEFAULT_LANGUAGE: Language = Language::Uz;

/// Keys of templated guest-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// Language selection banner, deliberately multilingual.
    ChooseLanguage,

    /// Room selection prompt.
    ChooseRoom,

    /// Prompt for the free-form issue description.
    AskIssue,

    /// Acknowledgment after a ticket was filed.
    AckGuest,

    /// Notice that staff picked the issue up.
    ProcessingNotice,

    /// Notice that the issue was resolved.
    ResolvedNotice,

    /// Confirmation of a cancelled conversation.
    Cancelled,

    /// Prompt sent when input arrives outside an active conversation.
    RestartRequired,
}

/// Resolves a message key for a language.
pub fn text(key: MessageKey, language: Language) -> &'static str {
    match key {
        // One banner for all guests; shown before a language exists.
        MessageKey::ChooseLanguage => "Tilni tanlang / Выберите язык / Select language",
        MessageKey::ChooseRoom => match language {
            Language::Uz => "Iltimos, xona raqamini tanlang",
            Language::Ru => "Пожалуйста, выберите номер комнаты",
            Language::En => "Please choose your room number",
        },
        MessageKey::AskIssue => match language {
            Language::Uz => "Muammoingizni qisqa yozib qoldiring",
            Language::Ru => "Опишите вашу проблему коротко",
            Language::En => "Please describe your issue briefly",
        },
        MessageKey::AckGuest => match language {
            Language::Uz => "Xabaringiz qabul qilindi! Adminlar tez orada javob beradi.",
            Language::Ru => "Ваше сообщение получено! Администраторы скоро ответят.",
            Language::En => "Your message has been received! The admins will reply shortly.",
        },
        MessageKey::ProcessingNotice => match language {
            Language::Uz => "Muammoingiz admin tomonidan ko‘rib chiqilmoqda.",
            Language::Ru => "Ваша проблема рассматривается админом.",
            Language::En => "Your issue is being processed by an admin.",
        },
        MessageKey::ResolvedNotice => match language {
            Language::Uz => "Muammoingiz hal qilindi! Rahmat.",
            Language::Ru => "Ваша проблема решена! Спасибо.",
            Language::En => "Your issue has been resolved! Thank you.",
        },
        MessageKey::Cancelled => match language {
            Language::Uz => "Bekor qilindi.",
            Language::Ru => "Отменено.",
            Language::En => "Cancelled.",
        },
        MessageKey::RestartRequired => match language {
            Language::Uz => "Iltimos, /start buyrug'ini bosib, formani to'liq to'ldiring.",
            Language::Ru => "Пожалуйста, нажмите /start и заполните форму заново.",
            Language::En => "Please press /start and fill in the form again.",
        },
    }
}

/// Resolves a message key, using the default language when the guest's
/// choice is not yet known.
pub fn text_or_default(key: MessageKey, language: Option<Language>) -> &'static str {
    text(key, language.unwrap_or(DEFAULT_LANGUAGE))
}
