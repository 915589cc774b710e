use garde::Validate as _;
use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! impl_string_primitive {
    ($name:ident) => {
        impl $name {
            pub fn new(value: std::string::String) -> $crate::DomainResult<Self> {
                let value = if $crate::starts_or_ends_with_whitespace(&value) {
                    value.trim().to_string()
                } else {
                    value
                };
                let value = Self(value);
                match value.validate() {
                    Ok(_) => Ok(value),
                    Err(e) => Err($crate::DomainError {
                        kind: $crate::DomainErrorKind::Validation,
                        code: $crate::VALIDATION_EXCEPTION.code,
                        messages: vec![format!("{}: {}", stringify!($name), e).into()],
                        source: e.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::convert::TryFrom<String> for $name {
            type Error = $crate::DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

/// コード
///
/// ドキュメントカテゴリやドキュメントタイプを言語ごとに識別するコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, garde::Validate)]
pub struct Code(#[garde(length(chars, min = 1, max = 36))] pub String);
impl_string_primitive!(Code);

/// 言語コード（ISO 639-2）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, garde::Validate)]
pub struct LangCode(#[garde(ascii, length(chars, min = 3, max = 3))] pub String);
impl_string_primitive!(LangCode);

/// 名前
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, garde::Validate)]
pub struct Name(#[garde(length(chars, min = 1, max = 64))] pub String);
impl_string_primitive!(Name);

/// 説明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, garde::Validate)]
pub struct Description(#[garde(length(chars, min = 1, max = 128))] pub String);
impl_string_primitive!(Description);
