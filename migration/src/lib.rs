pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_users_table;
mod m20251001_000002_create_site_settings_table;
mod m20251001_000003_create_projects_table;
mod m20251001_000004_create_project_images_table;
mod m20251001_000005_create_blog_posts_table;
mod m20251001_000006_create_experiences_table;
mod m20251001_000007_create_tools_table;
mod m20251008_000001_add_certificate_image_path_to_experiences;
mod m20251012_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_users_table::Migration),
            Box::new(m20251001_000002_create_site_settings_table::Migration),
            Box::new(m20251001_000003_create_projects_table::Migration),
            Box::new(m20251001_000004_create_project_images_table::Migration),
            Box::new(m20251001_000005_create_blog_posts_table::Migration),
            Box::new(m20251001_000006_create_experiences_table::Migration),
            Box::new(m20251001_000007_create_tools_table::Migration),
            Box::new(m20251008_000001_add_certificate_image_path_to_experiences::Migration),
            Box::new(m20251012_000001_add_indexes::Migration),
        ]
    }
}
