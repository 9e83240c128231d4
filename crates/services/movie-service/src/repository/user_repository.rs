//! User repository: read-only access to users and their roles.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use super::entities::role::{self, Entity as RoleEntity};
use super::entities::user::{self, Entity as UserEntity};
use super::entities::user_role;
use common::{AppError, AppResult};
use domain::{Role, User, UserDetailsRow};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user (with roles) by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// One row per granted role; empty when the username is unknown
    async fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> AppResult<Vec<UserDetailsRow>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Flat user/role join row
#[derive(Debug, FromQueryResult)]
struct UserRoleRow {
    username: String,
    password_hash: String,
    role_id: i64,
    authority: String,
}

impl From<UserRoleRow> for UserDetailsRow {
    fn from(row: UserRoleRow) -> Self {
        UserDetailsRow {
            username: row.username,
            password_hash: row.password_hash,
            role_id: row.role_id,
            authority: row.authority,
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let found = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .find_with_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(found.into_iter().next().map(|(model, roles)| User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            roles: roles.into_iter().map(Role::from).collect(),
        }))
    }

    async fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> AppResult<Vec<UserDetailsRow>> {
        let rows = UserEntity::find()
            .select_only()
            .column(user::Column::Username)
            .column(user::Column::PasswordHash)
            .column_as(role::Column::Id, "role_id")
            .column(role::Column::Authority)
            .join(JoinType::InnerJoin, user::Relation::UserRoles.def())
            .join(JoinType::InnerJoin, user_role::Relation::Role.def())
            .filter(user::Column::Username.eq(username))
            .order_by_asc(role::Column::Id)
            .into_model::<UserRoleRow>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(UserDetailsRow::from).collect())
    }
}
