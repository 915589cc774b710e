use axum::{
    Json,
    extract::{Path, State},
};

use domain::projection::FieldProjection;

use crate::{
    AppState,
    http::{ApiError, ApiResult, DataResponseBody},
};

pub mod category {
    use super::*;

    use domain::models::DocumentCategoryRecord;
    use use_case::document::DocumentCategoryUseCase;

    use crate::postgres::repositories::PgDocumentCategoryRepository;

    type UseCase = DocumentCategoryUseCase<PgDocumentCategoryRepository, FieldProjection>;

    fn use_case(app_state: &AppState) -> UseCase {
        let repo = PgDocumentCategoryRepository::new(app_state.pg_pool.clone());
        DocumentCategoryUseCase::new(repo, FieldProjection)
    }

    /// 全ての言語のドキュメントカテゴリをリストするハンドラ
    #[tracing::instrument(skip(app_state))]
    pub async fn list(
        State(app_state): State<AppState>,
    ) -> ApiResult<Json<DataResponseBody<Vec<DocumentCategoryRecord>>>> {
        let records = use_case(&app_state)
            .list()
            .await
            .map_err(ApiError::from)?;
        Ok(Json(records.into()))
    }

    /// 言語コードを指定してドキュメントカテゴリをリストするハンドラ
    #[tracing::instrument(skip(app_state))]
    pub async fn by_lang_code(
        State(app_state): State<AppState>,
        Path(lang_code): Path<String>,
    ) -> ApiResult<Json<DataResponseBody<Vec<DocumentCategoryRecord>>>> {
        let records = use_case(&app_state)
            .list_by_lang_code(&lang_code)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(records.into()))
    }

    /// コードと言語コードを指定してドキュメントカテゴリを取得するハンドラ
    #[tracing::instrument(skip(app_state))]
    pub async fn by_code_and_lang_code(
        State(app_state): State<AppState>,
        Path((code, lang_code)): Path<(String, String)>,
    ) -> ApiResult<Json<DataResponseBody<DocumentCategoryRecord>>> {
        let record = use_case(&app_state)
            .by_code_and_lang_code(&code, &lang_code)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(record.into()))
    }
}

pub mod document_type {
    use super::*;

    use domain::models::DocumentTypeRecord;
    use use_case::document::DocumentTypeUseCase;

    use crate::postgres::repositories::PgDocumentTypeRepository;

    /// 指定されたカテゴリと言語で有効なドキュメントタイプをリストするハンドラ
    ///
    /// 有効なドキュメントタイプが存在しない場合も、空の`data`で200を返す。
    #[tracing::instrument(skip(app_state))]
    pub async fn valid_types(
        State(app_state): State<AppState>,
        Path((category_code, lang_code)): Path<(String, String)>,
    ) -> ApiResult<Json<DataResponseBody<Vec<DocumentTypeRecord>>>> {
        let repo = PgDocumentTypeRepository::new(app_state.pg_pool.clone());
        let use_case = DocumentTypeUseCase::new(repo, FieldProjection);
        let records = use_case
            .valid_types(&category_code, &lang_code)
            .await
            .map_err(ApiError::from)?;
        Ok(Json(records.into()))
    }
}
