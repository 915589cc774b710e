mod document;

pub use document::*;

use std::marker::PhantomData;

use sqlx::PgPool;

use domain::{DATA_ACCESS_EXCEPTION, DomainError, DomainErrorKind};

/// PostgreSQLリポジトリ
pub struct PgRepository<T> {
    pub pool: PgPool,
    _marker: PhantomData<T>,
}

impl<T> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

/// sqlxのエラーをリポジトリエラーに変換する。
pub fn repository_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "failed to access the reference data store");
    DomainError {
        kind: DomainErrorKind::Repository,
        code: DATA_ACCESS_EXCEPTION.code,
        messages: vec![DATA_ACCESS_EXCEPTION.message.into()],
        source: e.into(),
    }
}
