//! User-visible strings. Japanese is the default UI language; English is picked when
//! the configured locale (or the browser language) asks for it.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    /// Parses a BCP 47 tag such as `en-US` or `ja`. Unknown tags return `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Unsupported,
    Unavailable,
    Available,
    UsernameRequired,
    Processing,
    RegistrationInProgress,
    RegistrationSucceeded,
    RegistrationFailed,
    RegistrationFailedWith(String),
    LoginInProgress,
    LoginSucceeded(String),
    LoginFailed,
    LoginFailedWith(String),
    UnknownError,
}

impl Message {
    #[must_use]
    pub fn localize(&self, locale: Locale) -> String {
        match locale {
            Locale::Ja => self.ja(),
            Locale::En => self.en(),
        }
    }

    fn ja(&self) -> String {
        match self {
            Self::Unsupported => "このブラウザはWebAuthnをサポートしていません".to_string(),
            Self::Unavailable => {
                "生体認証が利用できません。デバイスの設定を確認してください。".to_string()
            }
            Self::Available => "生体認証が利用可能です".to_string(),
            Self::UsernameRequired => "ユーザー名を入力してください".to_string(),
            Self::Processing => "⏳ 処理中...".to_string(),
            Self::RegistrationInProgress => "登録チャレンジを取得中...".to_string(),
            Self::RegistrationSucceeded => {
                "登録が完了しました！ログインをお試しください。".to_string()
            }
            Self::RegistrationFailed => "登録に失敗しました".to_string(),
            Self::RegistrationFailedWith(detail) => format!("登録に失敗しました: {detail}"),
            Self::LoginInProgress => "認証チャレンジを取得中...".to_string(),
            Self::LoginSucceeded(username) => format!("ログイン成功！ようこそ、{username}さん"),
            Self::LoginFailed => "ログインに失敗しました".to_string(),
            Self::LoginFailedWith(detail) => format!("ログインに失敗しました: {detail}"),
            Self::UnknownError => "不明なエラー".to_string(),
        }
    }

    fn en(&self) -> String {
        match self {
            Self::Unsupported => "This browser does not support WebAuthn.".to_string(),
            Self::Unavailable => {
                "Biometric authentication is unavailable. Check your device settings.".to_string()
            }
            Self::Available => "Biometric authentication is available.".to_string(),
            Self::UsernameRequired => "Please enter a username.".to_string(),
            Self::Processing => "⏳ Processing...".to_string(),
            Self::RegistrationInProgress => "Requesting registration challenge...".to_string(),
            Self::RegistrationSucceeded => "Registration complete! Try signing in.".to_string(),
            Self::RegistrationFailed => "Registration failed.".to_string(),
            Self::RegistrationFailedWith(detail) => format!("Registration failed: {detail}"),
            Self::LoginInProgress => "Requesting authentication challenge...".to_string(),
            Self::LoginSucceeded(username) => format!("Signed in. Welcome, {username}!"),
            Self::LoginFailed => "Sign-in failed.".to_string(),
            Self::LoginFailedWith(detail) => format!("Sign-in failed: {detail}"),
            Self::UnknownError => "Unknown error".to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ja => write!(formatter, "ja"),
            Self::En => write!(formatter, "en"),
        }
    }
}
