//! User repository. Users are the acting users recorded on every write.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::User;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::UserForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{map_write_error, parse_datetime, read_stamp};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, username, created_at, last_update, last_update_by";

/// List filters for users.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserFilter {
    /// Substring of the username.
    pub search: Option<String>,
}

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        stamp: read_stamp(row, 3)?,
    })
}

impl AcreService {
    pub async fn create_user(
        &self,
        form: &UserForm,
        acting_user: Option<i64>,
    ) -> Result<User, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::User,
                    "INSERT INTO users (username, created_at, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4) RETURNING id",
                    libsql::params![
                        input.username.as_str(),
                        now.to_rfc3339(),
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::User,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_user(id).await
        })
        .await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::User,
            id,
        })?;
        row_to_user(&row)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM users WHERE username = ?1"),
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Resolve the acting user's id from a username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnknownUser` if no user has this username.
    pub async fn resolve_acting_user(&self, username: &str) -> Result<i64, DatabaseError> {
        self.find_user_by_username(username)
            .await?
            .map(|user| user.id)
            .ok_or_else(|| DatabaseError::UnknownUser(username.to_string()))
    }

    pub async fn update_user(
        &self,
        id: i64,
        form: UserForm,
        acting_user: Option<i64>,
    ) -> Result<User, DatabaseError> {
        self.write(async move {
            let existing = self.get_user(id).await?;
            let input = form.overlay(&existing).clean()?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE users SET username = ?1, last_update = ?2, last_update_by = ?3 WHERE id = ?4",
                    libsql::params![input.username.as_str(), now.to_rfc3339(), acting_user, id],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::User))?;

            self.record_write(
                EntityType::User,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_user(id).await
        })
        .await
    }

    /// Delete a user. Records they last touched keep a `NULL` `last_update_by`.
    pub async fn delete_user(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        // The acting user may be the one being deleted.
        let acting_user = match acting_user {
            Some(uid) if uid == id => None,
            other => other,
        };
        self.delete_row(EntityType::User, id, acting_user).await
    }

    pub async fn list_users(&self, filter: &UserFilter, page: u32) -> Result<Page<User>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions.search(&["username"], filter.search.as_deref());
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "users",
                order_by: "username, id",
            },
            &conditions,
            page,
            row_to_user,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_user, test_service};
    use acre_core::forms::UserForm;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_get_user() {
        let svc = test_service().await;
        let user = create_user(&svc, "user1").await;
        let fetched = svc.get_user(user.id).await.unwrap();
        assert_eq!(fetched.username, "user1");
        assert_eq!(fetched.stamp.last_update_by, None);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_form_error() {
        let svc = test_service().await;
        create_user(&svc, "user1").await;
        let err = svc
            .create_user(
                &UserForm {
                    username: Some("user1".into()),
                },
                None,
            )
            .await
            .unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(errors.get("username"), ["User with this Username already exists."]);
    }

    #[tokio::test]
    async fn resolve_unknown_user_fails() {
        let svc = test_service().await;
        let user = create_user(&svc, "user1").await;
        assert_eq!(svc.resolve_acting_user("user1").await.unwrap(), user.id);
        assert!(matches!(
            svc.resolve_acting_user("ghost").await,
            Err(DatabaseError::UnknownUser(name)) if name == "ghost"
        ));
    }

    #[tokio::test]
    async fn deleting_acting_user_nulls_stamps() {
        let svc = test_service().await;
        let admin = create_user(&svc, "admin").await;
        let other = svc
            .create_user(
                &UserForm {
                    username: Some("user2".into()),
                },
                Some(admin.id),
            )
            .await
            .unwrap();
        assert_eq!(other.stamp.last_update_by, Some(admin.id));

        svc.delete_user(admin.id, Some(admin.id)).await.unwrap();
        let other = svc.get_user(other.id).await.unwrap();
        assert_eq!(other.stamp.last_update_by, None);
    }

    #[tokio::test]
    async fn list_users_orders_by_username() {
        let svc = test_service().await;
        create_user(&svc, "zed").await;
        create_user(&svc, "amy").await;
        let page = svc.list_users(&UserFilter::default(), 1).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "zed"]);
    }
}
