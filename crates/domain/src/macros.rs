//! Macro for implementing Display and FromStr for configuration enums
//!
//! Configuration values such as the platform identity arrive as free-form
//! strings (environment variables, config files). This macro gives an enum a
//! single lowercase string form and case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use shopfront_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Stable,
//!     Beta,
//! }
//!
//! impl_domain_enum_conversions!(Channel {
//!     Stable => "stable",
//!     Beta => "beta",
//! });
//!
//! assert_eq!("BETA".parse::<Channel>(), Ok(Channel::Beta));
//! ```

/// Implements Display and FromStr traits for configuration enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase strings
/// - FromStr trait: parses case-insensitive, whitespace-trimmed strings
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestMode {
        Light,
        Dark,
        System,
    }

    impl_domain_enum_conversions!(TestMode {
        Light => "light",
        Dark => "dark",
        System => "system",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestMode::Light.to_string(), "light");
        assert_eq!(TestMode::Dark.to_string(), "dark");
        assert_eq!(TestMode::System.to_string(), "system");
    }

    #[test]
    fn test_fromstr_mixed_case_and_whitespace() {
        assert_eq!(TestMode::from_str("DARK").unwrap(), TestMode::Dark);
        assert_eq!(TestMode::from_str("SyStEm").unwrap(), TestMode::System);
        assert_eq!(TestMode::from_str("  light \n").unwrap(), TestMode::Light);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestMode::from_str("sepia");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestMode: sepia"));
        assert!(TestMode::from_str("").is_err());
    }
}
