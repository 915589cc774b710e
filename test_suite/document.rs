use reqwest::StatusCode;

use domain::{
    DOCUMENT_CATEGORY_MAPPING_EXCEPTION, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION,
    models::{DocumentCategoryRecord, DocumentTypeRecord},
};
use infra::http::{DataResponseBody, ErrorResponseBody};

use crate::helpers::{ResponseParts, load_app_settings_for_testing, split_response};
use crate::test_case::{EnableTracing, InsertTestData, TestCase};

fn type_codes(records: &[DocumentTypeRecord]) -> Vec<&str> {
    records.iter().map(|r| &*r.code).collect()
}

fn category_keys(records: &[DocumentCategoryRecord]) -> Vec<(&str, &str)> {
    records.iter().map(|r| (&*r.code, &*r.lang_code)).collect()
}

#[tokio::test]
#[ignore]
async fn valid_document_types_are_active_types_under_an_active_category() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.valid_document_types("IDT", "eng").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let records = serde_json::from_str::<DataResponseBody<Vec<DocumentTypeRecord>>>(&body)
        .unwrap()
        .data;
    assert_eq!(type_codes(&records), vec!["PAN", "PSP"]);
    assert!(records.iter().all(|r| &*r.category_code == "IDT"));
    assert!(records.iter().all(|r| &*r.lang_code == "eng"));
    assert!(records.iter().all(|r| r.is_active));
    let passport = records.iter().find(|r| &*r.code == "PSP").unwrap();
    assert_eq!(
        passport.description.as_deref(),
        Some("Passport issued by the government")
    );

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn valid_document_types_are_filtered_by_language() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.valid_document_types("IDT", "fra").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let records = serde_json::from_str::<DataResponseBody<Vec<DocumentTypeRecord>>>(&body)
        .unwrap()
        .data;
    assert_eq!(type_codes(&records), vec!["PAN"]);
    assert_eq!(&*records[0].name, "Carte PAN");

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn no_valid_document_types_is_an_empty_success() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    // 無効なカテゴリ、存在しないカテゴリ、存在しない言語
    for (category_code, lang_code) in [("POB", "eng"), ("XXX", "eng"), ("POA", "fra")] {
        let response = test_case
            .valid_document_types(category_code, lang_code)
            .await;
        let ResponseParts { status_code, body } = split_response(response).await;
        assert_eq!(
            status_code,
            StatusCode::OK,
            "{}/{}: {}",
            category_code,
            lang_code,
            body
        );
        let value = serde_json::from_str::<serde_json::Value>(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [] }));
    }

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn deactivating_a_category_hides_its_document_types() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    test_case
        .set_document_category_active("POA", "eng", false)
        .await;
    let response = test_case.valid_document_types("POA", "eng").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let records = serde_json::from_str::<DataResponseBody<Vec<DocumentTypeRecord>>>(&body)
        .unwrap()
        .data;
    assert!(records.is_empty(), "{:?}", records);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn list_all_document_categories() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.document_category_list().await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let records = serde_json::from_str::<DataResponseBody<Vec<DocumentCategoryRecord>>>(&body)
        .unwrap()
        .data;
    assert_eq!(
        category_keys(&records),
        vec![
            ("IDT", "eng"),
            ("IDT", "fra"),
            ("POA", "eng"),
            ("POB", "eng")
        ]
    );
    let inactive = records.iter().find(|r| &*r.code == "POB").unwrap();
    assert!(!inactive.is_active);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn empty_document_category_list_is_not_found() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::No).await;

    let response = test_case.document_category_list().await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::NOT_FOUND, "{}", body);
    let error = serde_json::from_str::<ErrorResponseBody>(&body).unwrap();
    assert_eq!(error.error_code, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.code);
    assert_eq!(
        error.messages,
        vec![DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.message.to_string()]
    );

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn list_document_categories_by_lang_code() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.document_categories_by_lang_code("fra").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let records = serde_json::from_str::<DataResponseBody<Vec<DocumentCategoryRecord>>>(&body)
        .unwrap()
        .data;
    assert_eq!(category_keys(&records), vec![("IDT", "fra")]);
    assert_eq!(&*records[0].name, "Preuve d'identité");
    assert!(records[0].description.is_none());

    let response = test_case.document_categories_by_lang_code("deu").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::NOT_FOUND, "{}", body);
    let error = serde_json::from_str::<ErrorResponseBody>(&body).unwrap();
    assert_eq!(error.error_code, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.code);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn get_a_document_category_by_code_and_lang_code() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case
        .document_category_by_code_and_lang_code("IDT", "eng")
        .await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK, "{}", body);
    let record = serde_json::from_str::<DataResponseBody<DocumentCategoryRecord>>(&body)
        .unwrap()
        .data;
    assert_eq!(&*record.code, "IDT");
    assert_eq!(&*record.lang_code, "eng");
    assert_eq!(&*record.name, "Identity Proof");
    assert!(record.is_active);

    // 登録されていない言語では見つからない
    for (code, lang_code) in [("XXX", "eng"), ("POA", "fra")] {
        let response = test_case
            .document_category_by_code_and_lang_code(code, lang_code)
            .await;
        let ResponseParts { status_code, body } = split_response(response).await;
        assert_eq!(status_code, StatusCode::NOT_FOUND, "{}", body);
        let error = serde_json::from_str::<ErrorResponseBody>(&body).unwrap();
        assert_eq!(error.error_code, DOCUMENT_CATEGORY_NOT_FOUND_EXCEPTION.code);
    }

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn a_malformed_document_category_fails_the_whole_list() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    test_case.insert_document_category("BLK", "eng", " ").await;
    let response = test_case.document_categories_by_lang_code("eng").await;
    let ResponseParts { status_code, body } = split_response(response).await;
    assert_eq!(status_code, StatusCode::INTERNAL_SERVER_ERROR, "{}", body);
    let error = serde_json::from_str::<ErrorResponseBody>(&body).unwrap();
    assert_eq!(error.error_code, DOCUMENT_CATEGORY_MAPPING_EXCEPTION.code);
    assert_eq!(
        error.messages,
        vec![DOCUMENT_CATEGORY_MAPPING_EXCEPTION.message.to_string()]
    );

    // 他の言語は影響を受けない
    let response = test_case.document_categories_by_lang_code("fra").await;
    assert_eq!(response.status(), StatusCode::OK);

    test_case.end().await;
}
