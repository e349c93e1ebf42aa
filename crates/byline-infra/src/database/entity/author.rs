//! Author entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Author.
impl From<Model> for byline_core::domain::Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Author to SeaORM ActiveModel.
impl From<byline_core::domain::Author> for ActiveModel {
    fn from(author: byline_core::domain::Author) -> Self {
        Self {
            id: Set(author.id),
            name: Set(author.name),
            phone_number: Set(author.phone_number),
            created_at: Set(author.created_at.into()),
            updated_at: Set(author.updated_at.into()),
        }
    }
}
