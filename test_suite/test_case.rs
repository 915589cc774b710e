use std::{thread::JoinHandle, time::Duration};

use once_cell::sync::Lazy;
use tokio::sync::oneshot;

use app::{get_subscriber, init_subscriber};
use infra::AppState;
use settings::AppSettings;

use crate::helpers::{TestApp, configure_test_app, spawn_app};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber = get_subscriber("test".into(), log::Level::Debug, std::io::stdout);
    init_subscriber(subscriber).unwrap();
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableTracing {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTestData {
    Yes,
    No,
}

/// Reference data inserted when a test case begins with `InsertTestData::Yes`
///
/// - `IDT` exists in English and French, `POA` only in English.
/// - `POB` is an inactive category, so its active `BRC` type is never valid.
/// - `VID` is an inactive type in an active category.
const TEST_DATA: &str = r#"
INSERT INTO document_categories (code, lang_code, name, description, is_active, created_by)
VALUES
    ('IDT', 'eng', 'Identity Proof', 'Documents proving the identity', TRUE, 'superadmin'),
    ('IDT', 'fra', 'Preuve d''identité', NULL, TRUE, 'superadmin'),
    ('POA', 'eng', 'Address Proof', NULL, TRUE, 'superadmin'),
    ('POB', 'eng', 'Birth Proof', NULL, FALSE, 'superadmin');

INSERT INTO document_types (code, category_code, lang_code, name, description, is_active, created_by)
VALUES
    ('PAN', 'IDT', 'eng', 'PAN Card', NULL, TRUE, 'superadmin'),
    ('VID', 'IDT', 'eng', 'Virtual ID', NULL, FALSE, 'superadmin'),
    ('PSP', 'IDT', 'eng', 'Passport', 'Passport issued by the government', TRUE, 'superadmin'),
    ('PAN', 'IDT', 'fra', 'Carte PAN', NULL, TRUE, 'superadmin'),
    ('RNT', 'POA', 'eng', 'Rental Agreement', NULL, TRUE, 'superadmin'),
    ('BRC', 'POB', 'eng', 'Birth Certificate', NULL, TRUE, 'superadmin');
"#;

/// Test case for integration tests
///
/// ```
/// #[tokio::test]
/// #[ignore]
/// async fn integration_test_case_skeleton() {
///     let app_settings = load_app_settings_for_testing();
///     let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;
///
///     /************************************************************
///
///             Implement integration test logic here
///
///     *************************************************************/
///
///     test_case.end().await;
/// }
/// ```
pub struct TestCase {
    pub app_state: AppState,
    app_handle: JoinHandle<()>,
    shutdown_signal: oneshot::Sender<()>,
    pub http_client: reqwest::Client,
}

impl TestCase {
    pub async fn begin(
        app_settings: AppSettings,
        enable_tracing: EnableTracing,
        insert_test_data: InsertTestData,
    ) -> Self {
        if enable_tracing == EnableTracing::Yes {
            Lazy::force(&TRACING);
        }
        let app = configure_test_app(app_settings).await;
        let TestApp {
            app_settings,
            listener,
            pg_pool,
        } = app;
        if insert_test_data == InsertTestData::Yes {
            sqlx::raw_sql(TEST_DATA).execute(&pg_pool).await.unwrap();
        }
        let app_state = AppState {
            app_settings,
            pg_pool,
        };
        let (app_handle, shutdown_signal) = spawn_app(app_state.clone(), listener).await;
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();
        Self {
            app_state,
            app_handle,
            shutdown_signal,
            http_client,
        }
    }

    pub async fn end(self) {
        self.shutdown_signal.send(()).unwrap();
        self.app_handle.join().unwrap();
    }

    pub fn origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.app_state.app_settings.http.protocol,
            self.app_state.app_settings.http.host,
            self.app_state.app_settings.http.port,
        )
    }

    pub async fn insert_document_category(&self, code: &str, lang_code: &str, name: &str) {
        sqlx::query(
            r#"
            INSERT INTO document_categories (code, lang_code, name, is_active, created_by)
            VALUES ($1, $2, $3, TRUE, 'superadmin')
            "#,
        )
        .bind(code)
        .bind(lang_code)
        .bind(name)
        .execute(&self.app_state.pg_pool)
        .await
        .unwrap();
    }

    pub async fn set_document_category_active(&self, code: &str, lang_code: &str, active: bool) {
        sqlx::query(
            r#"
            UPDATE document_categories
            SET is_active = $1, updated_by = 'superadmin', updated_at = CURRENT_TIMESTAMP
            WHERE code = $2 AND lang_code = $3
            "#,
        )
        .bind(active)
        .bind(code)
        .bind(lang_code)
        .execute(&self.app_state.pg_pool)
        .await
        .unwrap();
    }

    pub async fn document_category_list(&self) -> reqwest::Response {
        let uri = format!("{}/documentcategories", self.origin());
        self.http_client.get(&uri).send().await.unwrap()
    }

    pub async fn document_categories_by_lang_code(&self, lang_code: &str) -> reqwest::Response {
        let uri = format!("{}/documentcategories/{}", self.origin(), lang_code);
        self.http_client.get(&uri).send().await.unwrap()
    }

    pub async fn document_category_by_code_and_lang_code(
        &self,
        code: &str,
        lang_code: &str,
    ) -> reqwest::Response {
        let uri = format!(
            "{}/documentcategories/{}/{}",
            self.origin(),
            code,
            lang_code
        );
        self.http_client.get(&uri).send().await.unwrap()
    }

    pub async fn valid_document_types(
        &self,
        category_code: &str,
        lang_code: &str,
    ) -> reqwest::Response {
        let uri = format!(
            "{}/documenttypes/{}/{}",
            self.origin(),
            category_code,
            lang_code
        );
        self.http_client.get(&uri).send().await.unwrap()
    }
}
