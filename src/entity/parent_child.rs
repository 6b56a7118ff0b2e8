//! 家长-子女关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_child")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub child_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ParentId",
        to = "super::users::Column::Id"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ChildId",
        to = "super::users::Column::Id"
    )]
    Child,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_guardianship(self) -> crate::models::enrollments::entities::Guardianship {
        crate::models::enrollments::entities::Guardianship {
            id: self.id,
            parent_id: self.parent_id,
            child_id: self.child_id,
        }
    }
}
