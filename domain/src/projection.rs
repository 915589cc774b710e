use crate::{
    DomainError, DomainResult,
    models::{
        DocumentCategory, DocumentCategoryRecord, DocumentType, DocumentTypeRecord,
        primitives::{Code, Description, LangCode, Name},
    },
};

/// 射影
///
/// 永続化されたエンティティを、外部に公開するレコードに変換する。
/// 変換はフィールドの構造的な対応付けのみで、ビジネスロジックを持たない。
pub trait Projection<E, R>: Send + Sync {
    /// エンティティを1つ変換する。
    fn project(&self, entity: E) -> DomainResult<R>;

    /// エンティティのリストを変換する。
    ///
    /// 入力と同じ順番、同じ数のレコードを返す。
    /// 1つでも変換に失敗した場合は、変換済みのレコードを捨ててエラーを返す。
    fn project_all(&self, entities: Vec<E>) -> DomainResult<Vec<R>> {
        entities
            .into_iter()
            .map(|entity| self.project(entity))
            .collect()
    }
}

/// フィールドを対応付けて変換する射影
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProjection;

impl<E, R> Projection<E, R> for FieldProjection
where
    R: TryFrom<E, Error = DomainError>,
{
    fn project(&self, entity: E) -> DomainResult<R> {
        R::try_from(entity)
    }
}

impl TryFrom<DocumentCategory> for DocumentCategoryRecord {
    type Error = DomainError;

    fn try_from(entity: DocumentCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            code: Code::new(entity.code)?,
            name: Name::new(entity.name)?,
            description: entity.description.map(Description::new).transpose()?,
            lang_code: LangCode::new(entity.lang_code)?,
            is_active: entity.is_active,
        })
    }
}

impl TryFrom<DocumentType> for DocumentTypeRecord {
    type Error = DomainError;

    fn try_from(entity: DocumentType) -> Result<Self, Self::Error> {
        Ok(Self {
            code: Code::new(entity.code)?,
            category_code: Code::new(entity.category_code)?,
            lang_code: LangCode::new(entity.lang_code)?,
            name: Name::new(entity.name)?,
            description: entity.description.map(Description::new).transpose()?,
            is_active: entity.is_active,
        })
    }
}
