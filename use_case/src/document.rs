use domain::{
    DOCUMENT_CATEGORY_FETCH_EXCEPTION, DOCUMENT_CATEGORY_MAPPING_EXCEPTION,
    DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION, DOCUMENT_TYPE_FETCH_EXCEPTION,
    DOCUMENT_TYPE_MAPPING_EXCEPTION, DomainError, DomainErrorKind, DomainResult, domain_error,
    models::{DocumentCategory, DocumentCategoryRecord, DocumentType, DocumentTypeRecord},
    projection::Projection,
    repositories::{DocumentCategoryRepository, DocumentTypeRepository},
};

/// ドキュメントカテゴリユースケース
///
/// 全ての操作は、取得、存在確認、変換の順に処理する。
/// 取得した結果が空または存在しない場合は、変換を実行しない。
pub struct DocumentCategoryUseCase<R, P>
where
    R: DocumentCategoryRepository,
    P: Projection<DocumentCategory, DocumentCategoryRecord>,
{
    pub repo: R,
    pub projection: P,
}

impl<R, P> DocumentCategoryUseCase<R, P>
where
    R: DocumentCategoryRepository,
    P: Projection<DocumentCategory, DocumentCategoryRecord>,
{
    pub fn new(repo: R, projection: P) -> Self {
        Self { repo, projection }
    }

    /// 全ての言語のドキュメントカテゴリをリストする。
    ///
    /// ドキュメントカテゴリが1つも存在しない場合は、`NotFound`エラーを返す。
    pub async fn list(&self) -> DomainResult<Vec<DocumentCategoryRecord>> {
        let categories = self
            .repo
            .find_all()
            .await
            .map_err(category_fetch_error)?;
        self.project_non_empty(categories)
    }

    /// 言語コードを指定して、ドキュメントカテゴリをリストする。
    ///
    /// 該当するドキュメントカテゴリが存在しない場合は、`NotFound`エラーを返す。
    pub async fn list_by_lang_code(
        &self,
        lang_code: &str,
    ) -> DomainResult<Vec<DocumentCategoryRecord>> {
        let categories = self
            .repo
            .find_all_by_lang_code(lang_code)
            .await
            .map_err(category_fetch_error)?;
        self.project_non_empty(categories)
    }

    /// コードと言語コードを指定して、ドキュメントカテゴリを取得する。
    ///
    /// 該当するドキュメントカテゴリが存在しない場合は、`NotFound`エラーを返す。
    pub async fn by_code_and_lang_code(
        &self,
        code: &str,
        lang_code: &str,
    ) -> DomainResult<DocumentCategoryRecord> {
        let category = self
            .repo
            .find_by_code_and_lang_code(code, lang_code)
            .await
            .map_err(category_fetch_error)?
            .ok_or_else(category_not_found)?;
        self.projection
            .project(category)
            .map_err(category_mapping_error)
    }

    fn project_non_empty(
        &self,
        categories: Vec<DocumentCategory>,
    ) -> DomainResult<Vec<DocumentCategoryRecord>> {
        if categories.is_empty() {
            return Err(category_not_found());
        }
        self.projection
            .project_all(categories)
            .map_err(category_mapping_error)
    }
}

/// ドキュメントタイプユースケース
pub struct DocumentTypeUseCase<R, P>
where
    R: DocumentTypeRepository,
    P: Projection<DocumentType, DocumentTypeRecord>,
{
    pub repo: R,
    pub projection: P,
}

impl<R, P> DocumentTypeUseCase<R, P>
where
    R: DocumentTypeRepository,
    P: Projection<DocumentType, DocumentTypeRecord>,
{
    pub fn new(repo: R, projection: P) -> Self {
        Self { repo, projection }
    }

    /// 指定されたカテゴリと言語で有効なドキュメントタイプをリストする。
    ///
    /// 有効なドキュメントタイプが存在しないことは正当な結果であるため、エラーではなく空のリストを返す。
    pub async fn valid_types(
        &self,
        category_code: &str,
        lang_code: &str,
    ) -> DomainResult<Vec<DocumentTypeRecord>> {
        let document_types = self
            .repo
            .find_valid_by_category_and_lang_code(category_code, lang_code)
            .await
            .map_err(type_fetch_error)?;
        if document_types.is_empty() {
            return Ok(vec![]);
        }
        self.projection
            .project_all(document_types)
            .map_err(type_mapping_error)
    }
}

fn category_fetch_error(e: DomainError) -> DomainError {
    e.reclassify(DomainErrorKind::Repository, DOCUMENT_CATEGORY_FETCH_EXCEPTION)
}

fn category_mapping_error(e: DomainError) -> DomainError {
    e.reclassify(DomainErrorKind::Projection, DOCUMENT_CATEGORY_MAPPING_EXCEPTION)
}

fn category_not_found() -> DomainError {
    domain_error(DomainErrorKind::NotFound, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION)
}

fn type_fetch_error(e: DomainError) -> DomainError {
    e.reclassify(DomainErrorKind::Repository, DOCUMENT_TYPE_FETCH_EXCEPTION)
}

fn type_mapping_error(e: DomainError) -> DomainError {
    e.reclassify(DomainErrorKind::Projection, DOCUMENT_TYPE_MAPPING_EXCEPTION)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use mockall::predicate::eq;
    use time::OffsetDateTime;

    use domain::{
        VALIDATION_EXCEPTION,
        models::AuditInfo,
        projection::FieldProjection,
        repositories::{MockDocumentCategoryRepository, MockDocumentTypeRepository},
    };

    use super::*;

    fn audit() -> AuditInfo {
        AuditInfo {
            created_by: String::from("superadmin"),
            created_at: OffsetDateTime::now_utc(),
            updated_by: None,
            updated_at: None,
        }
    }

    fn category(code: &str, lang_code: &str, is_active: bool) -> DocumentCategory {
        DocumentCategory {
            code: code.to_string(),
            lang_code: lang_code.to_string(),
            name: format!("{} ({})", code, lang_code),
            description: None,
            is_active,
            audit: audit(),
        }
    }

    fn document_type(
        code: &str,
        category_code: &str,
        lang_code: &str,
        is_active: bool,
    ) -> DocumentType {
        DocumentType {
            code: code.to_string(),
            category_code: category_code.to_string(),
            lang_code: lang_code.to_string(),
            name: format!("{} ({})", code, lang_code),
            description: None,
            is_active,
            audit: audit(),
        }
    }

    fn access_error() -> DomainError {
        DomainError {
            kind: DomainErrorKind::Repository,
            code: "DB",
            messages: vec!["connection refused".into()],
            source: anyhow::anyhow!("connection refused"),
        }
    }

    /// 呼び出し回数を数える射影
    #[derive(Default)]
    struct CountingProjection {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProjection {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<E, R> Projection<E, R> for CountingProjection
    where
        R: TryFrom<E, Error = DomainError>,
    {
        fn project(&self, entity: E) -> DomainResult<R> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(domain_error(
                    DomainErrorKind::Validation,
                    VALIDATION_EXCEPTION,
                ));
            }
            R::try_from(entity)
        }
    }

    /// メモリ上の参照データストア
    #[derive(Default)]
    struct InMemoryStore {
        categories: Vec<DocumentCategory>,
        document_types: Vec<DocumentType>,
    }

    #[async_trait::async_trait]
    impl DocumentCategoryRepository for InMemoryStore {
        async fn find_all(&self) -> DomainResult<Vec<DocumentCategory>> {
            Ok(self.categories.clone())
        }

        async fn find_all_by_lang_code(
            &self,
            lang_code: &str,
        ) -> DomainResult<Vec<DocumentCategory>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.lang_code == lang_code)
                .cloned()
                .collect())
        }

        async fn find_by_code_and_lang_code(
            &self,
            code: &str,
            lang_code: &str,
        ) -> DomainResult<Option<DocumentCategory>> {
            Ok(self
                .categories
                .iter()
                .find(|c| c.code == code && c.lang_code == lang_code)
                .cloned())
        }
    }

    #[async_trait::async_trait]
    impl DocumentTypeRepository for InMemoryStore {
        async fn find_valid_by_category_and_lang_code(
            &self,
            category_code: &str,
            lang_code: &str,
        ) -> DomainResult<Vec<DocumentType>> {
            let parent = self
                .categories
                .iter()
                .find(|c| c.code == category_code && c.lang_code == lang_code);
            Ok(self
                .document_types
                .iter()
                .filter(|t| t.is_valid_for(parent, category_code, lang_code))
                .cloned()
                .collect())
        }
    }

    fn seeded_store() -> InMemoryStore {
        InMemoryStore {
            categories: vec![
                category("IDT", "eng", true),
                category("IDT", "fra", true),
                category("POA", "eng", false),
            ],
            document_types: vec![
                document_type("PAN", "IDT", "eng", true),
                document_type("VID", "IDT", "eng", false),
                document_type("PSP", "IDT", "eng", true),
                document_type("PAN", "IDT", "fra", true),
                document_type("RNT", "POA", "eng", true),
            ],
        }
    }

    #[tokio::test]
    async fn list_returns_all_categories_in_store_order() {
        let use_case = DocumentCategoryUseCase::new(seeded_store(), FieldProjection);
        let records = use_case.list().await.unwrap();
        let keys = records
            .iter()
            .map(|r| (r.code.to_string(), r.lang_code.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (String::from("IDT"), String::from("eng")),
                (String::from("IDT"), String::from("fra")),
                (String::from("POA"), String::from("eng")),
            ]
        );
    }

    #[tokio::test]
    async fn list_against_empty_store_is_not_found() {
        let use_case =
            DocumentCategoryUseCase::new(InMemoryStore::default(), CountingProjection::default());
        let error = use_case.list().await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(error.code, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.code);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[rstest::rstest]
    #[case("eng", 2)]
    #[case("fra", 1)]
    #[tokio::test]
    async fn list_by_lang_code_returns_only_that_language(
        #[case] lang_code: &str,
        #[case] expected: usize,
    ) {
        let use_case = DocumentCategoryUseCase::new(seeded_store(), FieldProjection);
        let records = use_case.list_by_lang_code(lang_code).await.unwrap();
        assert_eq!(records.len(), expected);
        assert!(records.iter().all(|r| &*r.lang_code == lang_code));
    }

    #[tokio::test]
    async fn list_by_lang_code_without_match_is_not_found() {
        let use_case =
            DocumentCategoryUseCase::new(seeded_store(), CountingProjection::default());
        let error = use_case.list_by_lang_code("ara").await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn list_by_lang_code_access_failure_is_raised_before_projection() {
        let mut repo = MockDocumentCategoryRepository::new();
        repo.expect_find_all_by_lang_code()
            .with(eq("fra"))
            .times(1)
            .returning(|_| Err(access_error()));
        let use_case = DocumentCategoryUseCase::new(repo, CountingProjection::default());

        let error = use_case.list_by_lang_code("fra").await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(error.code, DOCUMENT_CATEGORY_FETCH_EXCEPTION.code);
        assert_eq!(
            error.messages,
            vec![std::borrow::Cow::from(DOCUMENT_CATEGORY_FETCH_EXCEPTION.message)]
        );
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn list_access_failure_is_not_reported_as_not_found() {
        let mut repo = MockDocumentCategoryRepository::new();
        repo.expect_find_all()
            .times(1)
            .returning(|| Err(access_error()));
        let use_case = DocumentCategoryUseCase::new(repo, CountingProjection::default());

        let error = use_case.list().await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn list_projection_failure_is_reported_as_projection() {
        let use_case = DocumentCategoryUseCase::new(seeded_store(), CountingProjection::failing());
        let error = use_case.list().await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Projection);
        assert_eq!(error.code, DOCUMENT_CATEGORY_MAPPING_EXCEPTION.code);
        assert_eq!(use_case.projection.calls(), 1);
    }

    #[tokio::test]
    async fn list_with_unmappable_entity_fails_as_a_whole() {
        let mut store = seeded_store();
        store.categories[1].name = String::new();
        let use_case = DocumentCategoryUseCase::new(store, FieldProjection);
        let error = use_case.list().await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Projection);
    }

    #[rstest::rstest]
    #[case("IDT", "eng")]
    #[case("IDT", "fra")]
    #[case("POA", "eng")]
    #[tokio::test]
    async fn by_code_and_lang_code_returns_the_exact_record(
        #[case] code: &str,
        #[case] lang_code: &str,
    ) {
        let use_case = DocumentCategoryUseCase::new(seeded_store(), FieldProjection);
        let record = use_case
            .by_code_and_lang_code(code, lang_code)
            .await
            .unwrap();
        assert_eq!(&*record.code, code);
        assert_eq!(&*record.lang_code, lang_code);
        assert_eq!(&*record.name, format!("{} ({})", code, lang_code));
    }

    #[rstest::rstest]
    // 存在しないコード
    #[case("XXX", "eng")]
    // 別の言語にのみ存在する
    #[case("POA", "fra")]
    #[tokio::test]
    async fn by_code_and_lang_code_without_match_is_not_found(
        #[case] code: &str,
        #[case] lang_code: &str,
    ) {
        let use_case =
            DocumentCategoryUseCase::new(seeded_store(), CountingProjection::default());
        let error = use_case
            .by_code_and_lang_code(code, lang_code)
            .await
            .unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(error.code, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.code);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn by_code_and_lang_code_access_failure() {
        let mut repo = MockDocumentCategoryRepository::new();
        repo.expect_find_by_code_and_lang_code()
            .with(eq("IDT"), eq("eng"))
            .times(1)
            .returning(|_, _| Err(access_error()));
        let use_case = DocumentCategoryUseCase::new(repo, CountingProjection::default());

        let error = use_case
            .by_code_and_lang_code("IDT", "eng")
            .await
            .unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn by_code_and_lang_code_projection_failure() {
        let mut repo = MockDocumentCategoryRepository::new();
        repo.expect_find_by_code_and_lang_code()
            .times(1)
            .returning(|code, lang_code| Ok(Some(category(code, lang_code, true))));
        let use_case = DocumentCategoryUseCase::new(repo, CountingProjection::failing());

        let error = use_case
            .by_code_and_lang_code("IDT", "eng")
            .await
            .unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Projection);
        assert_eq!(error.code, DOCUMENT_CATEGORY_MAPPING_EXCEPTION.code);
    }

    #[tokio::test]
    async fn valid_types_returns_active_types_of_active_category() {
        let use_case = DocumentTypeUseCase::new(seeded_store(), FieldProjection);
        let records = use_case.valid_types("IDT", "eng").await.unwrap();
        let codes = records.iter().map(|r| r.code.to_string()).collect::<Vec<_>>();
        assert_eq!(codes, vec![String::from("PAN"), String::from("PSP")]);
        assert!(records.iter().all(|r| &*r.lang_code == "eng"));
    }

    #[tokio::test]
    async fn valid_types_excludes_inactive_type() {
        let store = InMemoryStore {
            categories: vec![category("IDT", "eng", true)],
            document_types: vec![
                document_type("PAN", "IDT", "eng", true),
                document_type("VID", "IDT", "eng", false),
            ],
        };
        let use_case = DocumentTypeUseCase::new(store, FieldProjection);
        let records = use_case.valid_types("IDT", "eng").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(&*records[0].code, "PAN");
        assert_eq!(&*records[0].category_code, "IDT");
    }

    #[rstest::rstest]
    // カテゴリが無効
    #[case("POA", "eng")]
    // カテゴリが存在しない
    #[case("XXX", "eng")]
    // 言語にタイプが存在しない
    #[case("IDT", "ara")]
    #[tokio::test]
    async fn valid_types_without_match_is_empty_success(
        #[case] category_code: &str,
        #[case] lang_code: &str,
    ) {
        let use_case = DocumentTypeUseCase::new(seeded_store(), CountingProjection::default());
        let records = use_case
            .valid_types(category_code, lang_code)
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn valid_types_access_failure() {
        let mut repo = MockDocumentTypeRepository::new();
        repo.expect_find_valid_by_category_and_lang_code()
            .with(eq("IDT"), eq("eng"))
            .times(1)
            .returning(|_, _| Err(access_error()));
        let use_case = DocumentTypeUseCase::new(repo, CountingProjection::default());

        let error = use_case.valid_types("IDT", "eng").await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(error.code, DOCUMENT_TYPE_FETCH_EXCEPTION.code);
        assert_eq!(use_case.projection.calls(), 0);
    }

    #[tokio::test]
    async fn valid_types_projection_failure() {
        let use_case = DocumentTypeUseCase::new(seeded_store(), CountingProjection::failing());
        let error = use_case.valid_types("IDT", "eng").await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Projection);
        assert_eq!(error.code, DOCUMENT_TYPE_MAPPING_EXCEPTION.code);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_lookups_do_not_share_results() {
        let use_case = Arc::new(DocumentCategoryUseCase::new(seeded_store(), FieldProjection));
        let mut handles = vec![];
        for i in 0..64 {
            let use_case = Arc::clone(&use_case);
            let lang_code = if i % 2 == 0 { "eng" } else { "fra" };
            handles.push(tokio::spawn(async move {
                let records = use_case.list_by_lang_code(lang_code).await.unwrap();
                (lang_code, records)
            }));
        }
        for handle in handles {
            let (lang_code, records) = handle.await.unwrap();
            let expected = if lang_code == "eng" { 2 } else { 1 };
            assert_eq!(records.len(), expected);
            assert!(records.iter().all(|r| &*r.lang_code == lang_code));
        }
    }
}
