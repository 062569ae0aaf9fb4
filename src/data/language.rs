/// supported language codes and their native display names
pub const LANGUAGES: [(&str, &str); 15] = [
    ("ar_AE", "العربية (الإمارات)"),
    ("de_DE", "Deutsch"),
    ("en_US", "English"),
    ("es_AR", "Español (Argentina)"),
    ("es_ES", "Español (España)"),
    ("fr_FR", "Français"),
    ("it_IT", "Italiano"),
    ("ja_JP", "日本語"),
    ("ko_KR", "한국어"),
    ("pl_PL", "Polski"),
    ("pt_BR", "Português (Brasil)"),
    ("ru_RU", "Русский"),
    ("th_TH", "ไทย"),
    ("zh_CN", "简体中文"),
    ("zh_TW", "繁體中文 (台灣)"),
];

pub const DEFAULT_LANGUAGE: &str = "en_US";

pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// resolve a requested language to a loadable one
pub fn resolve(code: &str) -> &str {
    if is_supported(code) {
        LANGUAGES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(c, _)| *c)
            .unwrap_or(DEFAULT_LANGUAGE)
    } else {
        DEFAULT_LANGUAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(resolve("xx_XX"), "en_US");
        assert_eq!(resolve("ja_JP"), "ja_JP");
    }
}
