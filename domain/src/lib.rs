use std::borrow::Cow;

use enum_display::EnumDisplay;

pub mod models;
pub mod projection;
pub mod repositories;

/// エラーコード
///
/// 呼び出し元が機械的に判別できる安定したコードと、人が読むためのメッセージの組を表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// コード
    pub code: &'static str,
    /// メッセージ
    pub message: &'static str,
}

/// 参照データストアへのアクセスに失敗
pub const DATA_ACCESS_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-001",
    message: "Error occurred while accessing the reference data store",
};

/// ドキュメントカテゴリの取得に失敗
pub const DOCUMENT_CATEGORY_FETCH_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-012",
    message: "Error occurred while fetching Document Category",
};

/// ドキュメントカテゴリの変換に失敗
pub const DOCUMENT_CATEGORY_MAPPING_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-013",
    message: "Error occurred while mapping Document Category",
};

/// ドキュメントカテゴリが存在しない
pub const DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-014",
    message: "Document Category not found",
};

/// ドキュメントタイプの取得に失敗
pub const DOCUMENT_TYPE_FETCH_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-015",
    message: "Error occurred while fetching Document Type",
};

/// ドキュメントタイプの変換に失敗
pub const DOCUMENT_TYPE_MAPPING_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-016",
    message: "Error occurred while mapping Document Type",
};

/// 検証エラー
pub const VALIDATION_EXCEPTION: ErrorCode = ErrorCode {
    code: "KER-MSD-999",
    message: "Invalid value",
};

/// ドメインエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay)]
#[enum_display(case = "Lower")]
pub enum DomainErrorKind {
    /// 検証エラー
    Validation,
    /// エンティティが存在しない
    NotFound,
    /// リポジトリ（データストア）へのアクセスに失敗
    Repository,
    /// エンティティから出力レコードへの変換に失敗
    Projection,
}

/// ドメインエラー
#[derive(Debug, thiserror::Error)]
#[error("{code}: {}", .messages.join(", "))]
pub struct DomainError {
    /// エラーの種類
    pub kind: DomainErrorKind,
    /// エラーコード
    pub code: &'static str,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
    /// エラーの原因
    pub source: anyhow::Error,
}

impl DomainError {
    /// エラーの種類とエラーコードを付け替える。
    ///
    /// 元のエラーは`source`として保持する。
    pub fn reclassify(self, kind: DomainErrorKind, code: ErrorCode) -> Self {
        Self {
            kind,
            code: code.code,
            messages: vec![code.message.into()],
            source: self.source,
        }
    }
}

/// ドメイン結果
pub type DomainResult<T> = Result<T, DomainError>;

/// エラーコードからドメインエラーを作成する。
pub fn domain_error(kind: DomainErrorKind, code: ErrorCode) -> DomainError {
    DomainError {
        kind,
        code: code.code,
        messages: vec![code.message.into()],
        source: anyhow::anyhow!(code.message),
    }
}

fn starts_or_ends_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(|ch| ch.is_whitespace())
        || s.chars().last().is_some_and(|ch| ch.is_whitespace())
}
