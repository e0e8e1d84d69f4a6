use async_trait::async_trait;
use core_config::database::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryOrder};
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::{entity, error::ItemResult, models::Item, repository::ItemRepository};

/// Open a pooled connection to the item database
pub async fn connect(config: &DatabaseConfig) -> ItemResult<DatabaseConnection> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to connect to item database"))?;

    info!("Connected to item database");
    Ok(db)
}

#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to list items"))?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .inspect_err(|e| error!(error = %e, item_id = id, "Failed to load item"))?;

        Ok(model.map(Item::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemError;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn row(id: i64, name: &str, description: Option<&str>) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(1, "Chair", Some("Oak chair")),
                row(2, "Table", None),
            ]])
            .into_connection();

        let items = PgItemRepository::new(db).list_all().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description.as_deref(), Some("Oak chair"));
        assert_eq!(items[1].name, "Table");
        assert!(items[1].description.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let item = PgItemRepository::new(db).get_by_id(9).await.unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_database_errors_are_wrapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let result = PgItemRepository::new(db).list_all().await;
        assert!(
            matches!(result, Err(ItemError::Database(ref msg)) if msg.contains("connection reset")),
            "expected a database error, got {:?}",
            result
        );
    }
}
