use serde::{Deserialize, Serialize};
use serde_json::json;

/// Maximum number of characters carried over into the spec title.
const TITLE_LIMIT: usize = 30;
/// Marker appended when the title had to be cut off.
const ELLIPSIS: &str = "...";

/// Metadata block of a synthesized specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// A minimal machine-readable specification built from free-text input.
///
/// The structure mirrors the payload shape the generation backend expects:
/// an OpenAPI-like document whose `description` carries the requirement
/// verbatim. The single `/vms` path entry is a fixed placeholder target,
/// not a parsed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedSpec {
    pub openapi: String,
    pub info: SpecInfo,
    pub paths: serde_json::Value,
}

/// Builds a `SynthesizedSpec` from raw requirement text.
///
/// The caller is responsible for rejecting empty input; over non-empty
/// strings this is a total, pure function with no failure modes.
pub fn synthesize(requirement: &str) -> SynthesizedSpec {
    SynthesizedSpec {
        openapi: "3.0.0".to_string(),
        info: SpecInfo {
            title: truncate_title(requirement),
            version: "v1".to_string(),
            description: requirement.to_string(),
        },
        paths: json!({
            "/vms": {
                "get": {
                    "summary": "Получить /vms",
                    "responses": { "200": { "description": "Успешно" } }
                }
            }
        }),
    }
}

/// Truncates the requirement to the first `TITLE_LIMIT` characters,
/// appending the ellipsis marker only when something was cut off.
///
/// Counts characters, not bytes: requirements are routinely Cyrillic and
/// byte slicing would split a code point.
fn truncate_title(requirement: &str) -> String {
    if requirement.chars().count() <= TITLE_LIMIT {
        requirement.to_string()
    } else {
        let prefix: String = requirement.chars().take(TITLE_LIMIT).collect();
        format!("{}{}", prefix, ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_verbatim() {
        let requirement = "Создай тест для API виртуальных машин с проверкой статусов";
        let spec = synthesize(requirement);
        assert_eq!(spec.info.description, requirement);
    }

    #[test]
    fn test_short_title_is_not_truncated() {
        let spec = synthesize("Тест логина");
        assert_eq!(spec.info.title, "Тест логина");
    }

    #[test]
    fn test_title_of_exactly_thirty_chars_is_kept_whole() {
        let requirement = "a".repeat(30);
        let spec = synthesize(&requirement);
        assert_eq!(spec.info.title, requirement);
    }

    #[test]
    fn test_long_title_is_truncated_with_marker() {
        let requirement = "Создай тест для API виртуальных машин с проверкой статусов";
        let spec = synthesize(requirement);

        let expected_prefix: String = requirement.chars().take(30).collect();
        assert!(spec.info.title.ends_with("..."));
        assert!(spec.info.title.starts_with(&expected_prefix));
        assert_eq!(spec.info.title.chars().count(), 33);
    }

    #[test]
    fn test_constant_fields() {
        let spec = synthesize("любой текст");
        assert_eq!(spec.openapi, "3.0.0");
        assert_eq!(spec.info.version, "v1");
    }

    #[test]
    fn test_fixed_placeholder_path() {
        let spec = synthesize("Создай тест");
        let paths = spec.paths.as_object().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths.contains_key("/vms"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let requirement = "Проверка создания дисков через API";
        assert_eq!(synthesize(requirement), synthesize(requirement));
    }
}
