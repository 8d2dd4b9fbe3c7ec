use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::models::site_settings::{
    self, DEFAULT_BIO, DEFAULT_HERO_TEXT, DEFAULT_OWNER_NAME, DEFAULT_SITE_TITLE, SETTINGS_ID,
    SettingsForm,
};

use super::non_empty;

/// Return the settings row, creating it with defaults on first access.
///
/// Creation is an insert that ignores a primary-key conflict, so concurrent
/// first requests cannot produce a second row.
pub async fn get_settings(db: &DatabaseConnection) -> Result<site_settings::Model, DbErr> {
    if let Some(existing) = site_settings::Entity::find_by_id(SETTINGS_ID).one(db).await? {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let defaults = site_settings::ActiveModel {
        id: Set(SETTINGS_ID),
        site_title: Set(DEFAULT_SITE_TITLE.to_owned()),
        owner_name: Set(DEFAULT_OWNER_NAME.to_owned()),
        bio: Set(DEFAULT_BIO.to_owned()),
        hero_text: Set(DEFAULT_HERO_TEXT.to_owned()),
        contact_email: Set(None),
        resume_url: Set(None),
        social_links: Set(serde_json::json!({})),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = site_settings::Entity::insert(defaults)
        .on_conflict(
            OnConflict::column(site_settings::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    if inserted > 0 {
        tracing::info!("Created default site settings");
    }

    site_settings::Entity::find_by_id(SETTINGS_ID)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Site settings not found".to_string()))
}

/// Overwrite the editable settings fields from the admin form.
pub async fn update_settings(
    db: &DatabaseConnection,
    input: SettingsForm,
) -> Result<site_settings::Model, DbErr> {
    let settings = get_settings(db).await?;
    let social_links = serde_json::Value::Object(input.social_links());

    let mut active: site_settings::ActiveModel = settings.into();
    active.site_title = Set(input.site_title.trim().to_owned());
    active.owner_name = Set(input.owner_name.trim().to_owned());
    active.hero_text = Set(input.hero_text.trim().to_owned());
    active.bio = Set(input.bio.trim().to_owned());
    active.contact_email = Set(non_empty(input.contact_email));
    active.resume_url = Set(non_empty(input.resume_url));
    active.social_links = Set(social_links);
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}
