use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords that mark a requirement as UI-oriented.
///
/// Matching is case-insensitive and substring-based on purpose: a keyword
/// inside a longer word still counts. Prior generated output depends on
/// this policy, so it must not be tightened to word-boundary matching.
const UI_KEYWORDS: &[&str] = &[
    "интерфейс",
    "interface",
    "ui",
    "калькулятор",
    "calculator",
    "кнопк",
    "button",
    "экран",
    "screen",
];

/// Generation mode tag selecting which prompt template family the backend
/// applies to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Manual UI test generation.
    #[serde(rename = "manual_ui")]
    ManualUi,
    /// Automated API test generation.
    #[serde(rename = "auto_api")]
    AutoApi,
}

impl GenerationMode {
    /// The wire tag for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::ManualUi => "manual_ui",
            GenerationMode::AutoApi => "auto_api",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selects the generation mode for a requirement.
///
/// Pure and deterministic: the same text always yields the same mode.
/// Any UI keyword occurring anywhere in the text (case-insensitive)
/// selects `ManualUi`; everything else defaults to `AutoApi`.
pub fn classify(requirement: &str) -> GenerationMode {
    let lowered = requirement.to_lowercase();

    if UI_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        GenerationMode::ManualUi
    } else {
        GenerationMode::AutoApi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_requirement_is_manual_ui() {
        assert_eq!(
            classify("Тест интерфейса калькулятора"),
            GenerationMode::ManualUi
        );
    }

    #[test]
    fn test_api_requirement_is_auto_api() {
        assert_eq!(classify("Создай тест для API VM"), GenerationMode::AutoApi);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            classify("Проверка ИНТЕРФЕЙСА страницы входа"),
            GenerationMode::ManualUi
        );
        assert_eq!(classify("UI смоук-тест"), GenerationMode::ManualUi);
    }

    #[test]
    fn test_keyword_inside_longer_word_still_matches() {
        // "build" contains "ui" - substring matching is the documented
        // policy, not an accident.
        assert_eq!(
            classify("Rebuild the login test suite"),
            GenerationMode::ManualUi
        );
    }

    #[test]
    fn test_default_mode_is_auto_api() {
        assert_eq!(
            classify("Проверка создания дисков"),
            GenerationMode::AutoApi
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let requirement = "Тест кнопки расчета стоимости";
        assert_eq!(classify(requirement), classify(requirement));
        assert_eq!(classify(requirement), GenerationMode::ManualUi);
    }

    #[test]
    fn test_mode_wire_tags() {
        assert_eq!(
            serde_json::to_string(&GenerationMode::ManualUi).unwrap(),
            "\"manual_ui\""
        );
        assert_eq!(
            serde_json::to_string(&GenerationMode::AutoApi).unwrap(),
            "\"auto_api\""
        );
    }
}
