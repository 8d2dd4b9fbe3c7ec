use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::auth::password::{hash_password, verify_password};
use crate::error::Result;
use crate::models::users;

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> std::result::Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a user by exact (case-sensitive) username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> std::result::Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Create the admin account if the table is empty.
///
/// Returns whether an account was created. The insert ignores username
/// conflicts, so two processes bootstrapping at once still leave one row.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<bool> {
    if users::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let admin = users::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(hash_password(password, bcrypt_cost).await?),
        ..Default::default()
    };

    let inserted = users::Entity::insert(admin)
        .on_conflict(
            OnConflict::column(users::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted > 0 {
        tracing::info!("Created admin user '{username}'");
    }
    Ok(inserted > 0)
}

/// Check credentials. `None` covers both an unknown username and a wrong
/// password; callers must not tell them apart.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<users::Model>> {
    let Some(user) = get_user_by_username(db, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash).await {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
