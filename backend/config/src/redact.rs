//! Settings redaction: produce a safe-to-log snapshot with secrets masked.

use crate::schema::Settings;

/// Mask a secret, keeping a short prefix as a hint.
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.len() > 4 {
        format!("{}***", &value[..4])
    } else {
        "***".to_string()
    }
}

/// Clone of the settings with the auth token and API key masked.
pub fn redacted(settings: &Settings) -> Settings {
    Settings {
        auth_token: mask_secret(&settings.auth_token),
        gemini_api_key: mask_secret(&settings.gemini_api_key),
        ..settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_keep_only_a_prefix() {
        assert_eq!(mask_secret("sk-abcdef123456"), "sk-a***");
        assert_eq!(mask_secret("abcd"), "***");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn redacted_settings_hide_secrets() {
        let settings = Settings {
            auth_token: "super-secret-token".into(),
            gemini_api_key: "gm-key-123456".into(),
            ..Settings::default()
        };
        let safe = redacted(&settings);
        assert_eq!(safe.auth_token, "supe***");
        assert_eq!(safe.gemini_api_key, "gm-k***");
        assert_eq!(safe.port, settings.port);
    }
}
