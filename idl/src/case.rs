//! Name case conversion between wire and interchange spellings.
//!
//! Wire names are `snake_case`, interchange field names are `lowerCamelCase`
//! and interchange type names are `UpperCamelCase`. For names whose words all
//! start with a letter, `to_snake_case(&to_camel_case(name)) == name`.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// `transition_time` -> `transitionTime`.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// `transitionTime` -> `transition_time`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// `GENERIC_LEVEL_SET` or `generic_level` -> `GenericLevelSet` / `GenericLevel`.
#[must_use]
pub fn to_type_name(name: &str) -> String {
    name.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_fields() {
        assert_eq!(to_camel_case("transition_time"), "transitionTime");
        assert_eq!(to_camel_case("tid"), "tid");
        assert_eq!(to_camel_case("GENERIC_LEVEL_SET"), "genericLevelSet");
    }

    #[test]
    fn snake_case_fields() {
        assert_eq!(to_snake_case("transitionTime"), "transition_time");
        assert_eq!(to_snake_case("presentLevel"), "present_level");
    }

    #[test]
    fn snake_camel_roundtrip() {
        for name in ["level", "delta_level", "step_resolution", "ctl_temperature", "tid"] {
            assert_eq!(to_snake_case(&to_camel_case(name)), name);
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(to_type_name("GenericLevel"), "GenericLevel");
        assert_eq!(to_type_name("LevelSetMinimal"), "LevelSetMinimal");
        assert_eq!(to_type_name("generic_level"), "GenericLevel");
    }
}
