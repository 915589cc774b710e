use time::OffsetDateTime;

use domain::{
    DomainResult,
    models::{AuditInfo, DocumentCategory, DocumentType},
    repositories::{DocumentCategoryRepository, DocumentTypeRepository},
};

use super::{PgRepository, repository_error};

pub type PgDocumentCategoryRepository = PgRepository<DocumentCategory>;

#[async_trait::async_trait]
impl DocumentCategoryRepository for PgDocumentCategoryRepository {
    async fn find_all(&self) -> DomainResult<Vec<DocumentCategory>> {
        let rows = sqlx::query_as::<_, DocumentCategoryRow>(
            r#"
            SELECT
                code, lang_code, name, description, is_active,
                created_by, created_at, updated_by, updated_at
            FROM document_categories
            ORDER BY code, lang_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;
        Ok(rows.into_iter().map(DocumentCategory::from).collect())
    }

    async fn find_all_by_lang_code(&self, lang_code: &str) -> DomainResult<Vec<DocumentCategory>> {
        let rows = sqlx::query_as::<_, DocumentCategoryRow>(
            r#"
            SELECT
                code, lang_code, name, description, is_active,
                created_by, created_at, updated_by, updated_at
            FROM document_categories
            WHERE lang_code = $1
            ORDER BY code
            "#,
        )
        .bind(lang_code)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;
        Ok(rows.into_iter().map(DocumentCategory::from).collect())
    }

    async fn find_by_code_and_lang_code(
        &self,
        code: &str,
        lang_code: &str,
    ) -> DomainResult<Option<DocumentCategory>> {
        let row = sqlx::query_as::<_, DocumentCategoryRow>(
            r#"
            SELECT
                code, lang_code, name, description, is_active,
                created_by, created_at, updated_by, updated_at
            FROM document_categories
            WHERE code = $1 AND lang_code = $2
            "#,
        )
        .bind(code)
        .bind(lang_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;
        Ok(row.map(DocumentCategory::from))
    }
}

pub type PgDocumentTypeRepository = PgRepository<DocumentType>;

#[async_trait::async_trait]
impl DocumentTypeRepository for PgDocumentTypeRepository {
    /// 有効なドキュメントタイプをリストする。
    ///
    /// ドキュメントタイプと、同じ言語の親カテゴリの両方が有効なものだけを返す。
    /// SQLで絞り込んだ結果も、[`DocumentType::is_valid_for`]で確認してから返す。
    async fn find_valid_by_category_and_lang_code(
        &self,
        category_code: &str,
        lang_code: &str,
    ) -> DomainResult<Vec<DocumentType>> {
        let rows = sqlx::query_as::<_, DocumentTypeWithCategoryRow>(
            r#"
            SELECT
                t.code, t.category_code, t.lang_code, t.name, t.description, t.is_active,
                t.created_by, t.created_at, t.updated_by, t.updated_at,
                c.code AS c_code, c.lang_code AS c_lang_code, c.name AS c_name,
                c.description AS c_description, c.is_active AS c_is_active,
                c.created_by AS c_created_by, c.created_at AS c_created_at,
                c.updated_by AS c_updated_by, c.updated_at AS c_updated_at
            FROM document_types t
            INNER JOIN document_categories c
                ON t.category_code = c.code AND t.lang_code = c.lang_code
            WHERE
                t.category_code = $1
                AND t.lang_code = $2
                AND t.is_active
                AND c.is_active
            ORDER BY t.code
            "#,
        )
        .bind(category_code)
        .bind(lang_code)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;
        Ok(retain_valid(rows, category_code, lang_code))
    }
}

/// 指定されたカテゴリと言語で有効なドキュメントタイプだけを、順番を保って残す。
fn retain_valid(
    rows: Vec<DocumentTypeWithCategoryRow>,
    category_code: &str,
    lang_code: &str,
) -> Vec<DocumentType> {
    rows.into_iter()
        .map(<(DocumentType, DocumentCategory)>::from)
        .filter(|(document_type, category)| {
            document_type.is_valid_for(Some(category), category_code, lang_code)
        })
        .map(|(document_type, _)| document_type)
        .collect()
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentCategoryRow {
    code: String,
    lang_code: String,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_by: String,
    created_at: OffsetDateTime,
    updated_by: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

impl From<DocumentCategoryRow> for DocumentCategory {
    fn from(row: DocumentCategoryRow) -> Self {
        Self {
            code: row.code,
            lang_code: row.lang_code,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            audit: AuditInfo {
                created_by: row.created_by,
                created_at: row.created_at,
                updated_by: row.updated_by,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentTypeRow {
    code: String,
    category_code: String,
    lang_code: String,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_by: String,
    created_at: OffsetDateTime,
    updated_by: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

impl From<DocumentTypeRow> for DocumentType {
    fn from(row: DocumentTypeRow) -> Self {
        Self {
            code: row.code,
            category_code: row.category_code,
            lang_code: row.lang_code,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            audit: AuditInfo {
                created_by: row.created_by,
                created_at: row.created_at,
                updated_by: row.updated_by,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentTypeWithCategoryRow {
    #[sqlx(flatten)]
    document_type: DocumentTypeRow,
    c_code: String,
    c_lang_code: String,
    c_name: String,
    c_description: Option<String>,
    c_is_active: bool,
    c_created_by: String,
    c_created_at: OffsetDateTime,
    c_updated_by: Option<String>,
    c_updated_at: Option<OffsetDateTime>,
}

impl From<DocumentTypeWithCategoryRow> for (DocumentType, DocumentCategory) {
    fn from(row: DocumentTypeWithCategoryRow) -> Self {
        let category = DocumentCategory::from(DocumentCategoryRow {
            code: row.c_code,
            lang_code: row.c_lang_code,
            name: row.c_name,
            description: row.c_description,
            is_active: row.c_is_active,
            created_by: row.c_created_by,
            created_at: row.c_created_at,
            updated_by: row.c_updated_by,
            updated_at: row.c_updated_at,
        });
        (DocumentType::from(row.document_type), category)
    }
}
