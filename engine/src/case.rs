//! Identifier case conversion.
//!
//! A pure function over identifiers: the configured style is applied to the
//! identifier itself while any dotted package-qualifier prefix (`pkg.Type`)
//! is left untouched.

use std::str::FromStr;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::error::BridgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseStyle {
    #[default]
    Camel,
    Snake,
    Kebab,
    Pascal,
    ScreamingSnake,
}

impl FromStr for CaseStyle {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camelCase" => Ok(CaseStyle::Camel),
            "snakeCase" => Ok(CaseStyle::Snake),
            "kebabCase" => Ok(CaseStyle::Kebab),
            "pascalCase" => Ok(CaseStyle::Pascal),
            "screamingSnakeCase" => Ok(CaseStyle::ScreamingSnake),
            other => Err(BridgeError::Config(format!("unknown case style {:?}", other))),
        }
    }
}

/// Apply `style` to `ident`, converting only the segment after the last dot.
pub fn case_convert(style: CaseStyle, ident: &str) -> String {
    match ident.rfind('.') {
        Some(pos) => {
            let (prefix, name) = ident.split_at(pos + 1);
            format!("{}{}", prefix, convert_segment(style, name))
        }
        None => convert_segment(style, ident),
    }
}

fn convert_segment(style: CaseStyle, name: &str) -> String {
    match style {
        CaseStyle::Camel => name.to_lower_camel_case(),
        CaseStyle::Snake => name.to_snake_case(),
        CaseStyle::Kebab => name.to_kebab_case(),
        CaseStyle::Pascal => name.to_upper_camel_case(),
        CaseStyle::ScreamingSnake => name.to_shouty_snake_case(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_styles() {
        assert_eq!(case_convert(CaseStyle::Camel, "UserProfile"), "userProfile");
        assert_eq!(case_convert(CaseStyle::Snake, "UserProfile"), "user_profile");
        assert_eq!(case_convert(CaseStyle::Kebab, "UserProfile"), "user-profile");
        assert_eq!(case_convert(CaseStyle::Pascal, "user_profile"), "UserProfile");
        assert_eq!(
            case_convert(CaseStyle::ScreamingSnake, "userProfile"),
            "USER_PROFILE"
        );
    }

    #[test]
    fn test_dotted_prefix_is_preserved() {
        assert_eq!(
            case_convert(CaseStyle::Snake, "common.base.UserProfile"),
            "common.base.user_profile"
        );
    }

    #[test]
    fn test_unknown_style_string() {
        assert!("dromedaryCase".parse::<CaseStyle>().is_err());
        assert_eq!("camelCase".parse::<CaseStyle>().unwrap(), CaseStyle::Camel);
    }
}
