use crate::{
    DomainResult,
    models::{DocumentCategory, DocumentType},
};

/// ドキュメントカテゴリリポジトリ
///
/// 全てのメソッドは、全ての結果を返すか、エラーを返す。部分的な結果は返さない。
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentCategoryRepository: Sync + Send {
    /// 全ての言語のドキュメントカテゴリをリストする。
    async fn find_all(&self) -> DomainResult<Vec<DocumentCategory>>;

    /// 言語コードを指定して、ドキュメントカテゴリをリストする。
    ///
    /// 該当するドキュメントカテゴリが存在しない場合は、空のリストを返す。
    async fn find_all_by_lang_code(&self, lang_code: &str) -> DomainResult<Vec<DocumentCategory>>;

    /// コードと言語コードを指定して、ドキュメントカテゴリを取得する。
    ///
    /// 該当するドキュメントカテゴリが存在しない場合は、`None`を返す。
    async fn find_by_code_and_lang_code(
        &self,
        code: &str,
        lang_code: &str,
    ) -> DomainResult<Option<DocumentCategory>>;
}

/// ドキュメントタイプリポジトリ
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentTypeRepository: Sync + Send {
    /// 指定されたカテゴリと言語で有効なドキュメントタイプをリストする。
    ///
    /// 返却するドキュメントタイプは、[`DocumentType::is_valid_for`]を満たさなければならない。
    /// 該当するドキュメントタイプが存在しない場合は、空のリストを返す。
    async fn find_valid_by_category_and_lang_code(
        &self,
        category_code: &str,
        lang_code: &str,
    ) -> DomainResult<Vec<DocumentType>>;
}
