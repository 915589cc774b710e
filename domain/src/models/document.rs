use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::primitives::{Code, Description, LangCode, Name};

/// 監査情報
///
/// 参照データを登録、更新した管理者と日時を記録する。
/// ルックアップでは参照するだけで、出力レコードには含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditInfo {
    /// 登録者
    pub created_by: String,
    /// 登録日時
    pub created_at: OffsetDateTime,
    /// 更新者
    pub updated_by: Option<String>,
    /// 更新日時
    pub updated_at: Option<OffsetDateTime>,
}

/// ドキュメントカテゴリ
///
/// `(code, lang_code)`で一意に識別される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCategory {
    /// コード
    pub code: String,
    /// 言語コード
    pub lang_code: String,
    /// 名前
    pub name: String,
    /// 説明
    pub description: Option<String>,
    /// 有効フラグ
    pub is_active: bool,
    /// 監査情報
    pub audit: AuditInfo,
}

/// ドキュメントタイプ
///
/// `(code, lang_code)`で一意に識別され、同じ言語コードのドキュメントカテゴリに属する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
    /// コード
    pub code: String,
    /// ドキュメントカテゴリコード
    pub category_code: String,
    /// 言語コード
    pub lang_code: String,
    /// 名前
    pub name: String,
    /// 説明
    pub description: Option<String>,
    /// 有効フラグ
    pub is_active: bool,
    /// 監査情報
    pub audit: AuditInfo,
}

impl DocumentType {
    /// ドキュメントタイプが、指定されたカテゴリと言語で有効か確認する。
    ///
    /// # ドメインルール
    ///
    /// - ドキュメントタイプが有効でなければならない。
    /// - ドキュメントタイプのカテゴリコードが`category_code`と一致しなければならない。
    /// - ドキュメントタイプの言語コードが`lang_code`と一致しなければならない。
    /// - 親カテゴリが`(category_code, lang_code)`で存在し、有効でなければならない。
    pub fn is_valid_for(
        &self,
        category: Option<&DocumentCategory>,
        category_code: &str,
        lang_code: &str,
    ) -> bool {
        let Some(category) = category else {
            return false;
        };
        self.is_active
            && self.category_code == category_code
            && self.lang_code == lang_code
            && category.code == category_code
            && category.lang_code == lang_code
            && category.is_active
    }
}

/// ドキュメントカテゴリの出力レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCategoryRecord {
    /// コード
    pub code: Code,
    /// 名前
    pub name: Name,
    /// 説明
    pub description: Option<Description>,
    /// 言語コード
    pub lang_code: LangCode,
    /// 有効フラグ
    pub is_active: bool,
}

/// ドキュメントタイプの出力レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeRecord {
    /// コード
    pub code: Code,
    /// ドキュメントカテゴリコード
    pub category_code: Code,
    /// 言語コード
    pub lang_code: LangCode,
    /// 名前
    pub name: Name,
    /// 説明
    pub description: Option<Description>,
    /// 有効フラグ
    pub is_active: bool,
}
