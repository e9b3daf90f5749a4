//! Schema migrations for the `blog_posts` table.
//!
//! Applied by the API server at startup (`RUN_MIGRATIONS`) and by the
//! `migration` CLI.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_blog_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_blog_posts::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_registered_in_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(names, vec!["m20250101_000001_create_blog_posts"]);
    }
}
