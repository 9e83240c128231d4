//! Movie database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Movie;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub image: String,
    /// Number of scores received
    pub count: i32,
    /// Sum of all score values, in thousandths
    pub score_sum: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::score::Entity")]
    Scores,
}

impl Related<super::score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Movie {
    fn from(model: Model) -> Self {
        Movie {
            id: model.id,
            title: model.title,
            image: model.image,
            count: model.count,
            score_sum: model.score_sum,
        }
    }
}

/// Convert a domain movie back into an active model for updates
impl From<Movie> for ActiveModel {
    fn from(movie: Movie) -> Self {
        use sea_orm::{Set, Unchanged};

        ActiveModel {
            id: Unchanged(movie.id),
            title: Set(movie.title),
            image: Set(movie.image),
            count: Set(movie.count),
            score_sum: Set(movie.score_sum),
        }
    }
}
