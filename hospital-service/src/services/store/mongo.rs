use super::{Filter, OpScope, Repository, StoreError};
use crate::config::MongoConfig;
use crate::models::{Doctor, Entity, Patient, User};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};

/// Long-lived MongoDB connection shared by every repository.
#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    hospital_db: Database,
    users_db: Database,
}

impl MongoStore {
    pub async fn connect(config: &MongoConfig, scope: &OpScope) -> Result<Self, StoreError> {
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");

        let client = scope
            .run("connect", async {
                let client = MongoClient::with_uri_str(&config.uri).await?;
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                Ok(client)
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB at {}: {}", config.uri, e);
                e
            })?;

        let hospital_db = client.database(&config.database);
        let users_db = client.database(&config.users_database);
        tracing::info!(
            database = %config.database,
            users_database = %config.users_database,
            "Successfully connected to MongoDB"
        );

        Ok(Self {
            client,
            hospital_db,
            users_db,
        })
    }

    pub async fn initialize_indexes(&self, scope: &OpScope) -> Result<(), StoreError> {
        tracing::info!("Creating MongoDB indexes for hospital-service");

        create_unique_indexes::<Patient>(&self.hospital_db, scope).await?;
        create_unique_indexes::<Doctor>(&self.hospital_db, scope).await?;
        create_unique_indexes::<User>(&self.users_db, scope).await?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub async fn health_check(&self, scope: &OpScope) -> Result<(), StoreError> {
        scope
            .run("ping", async {
                self.client
                    .database("admin")
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                Ok(())
            })
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                e
            })
    }

    pub fn hospital_repository<T: Entity>(&self) -> MongoRepository<T> {
        MongoRepository::new(self.hospital_db.collection(T::COLLECTION))
    }

    pub fn users_repository<T: Entity>(&self) -> MongoRepository<T> {
        MongoRepository::new(self.users_db.collection(T::COLLECTION))
    }

    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB connection");
        self.client.shutdown().await;
    }
}

async fn create_unique_indexes<T: Entity>(db: &Database, scope: &OpScope) -> Result<(), StoreError> {
    let collection = db.collection::<Document>(T::COLLECTION);

    for &field in T::UNIQUE_FIELDS {
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(
                IndexOptions::builder()
                    .name(format!("{}_unique", field))
                    .unique(true)
                    .build(),
            )
            .build();

        scope
            .run("create_index", async {
                collection.create_index(index, None).await?;
                Ok(())
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create unique {} index on {} collection: {}",
                    field,
                    T::COLLECTION,
                    e
                );
                e
            })?;
        tracing::info!("Created unique index on {}.{}", T::COLLECTION, field);
    }

    Ok(())
}

pub struct MongoRepository<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T: Entity> MongoRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    async fn insert(&self, scope: &OpScope, record: &T) -> Result<ObjectId, StoreError> {
        scope
            .run("insert", async {
                let result = self.collection.insert_one(record, None).await?;
                result.inserted_id.as_object_id().ok_or_else(|| {
                    StoreError::Database(format!(
                        "Inserted {} record has a non-ObjectId identifier: {}",
                        T::COLLECTION,
                        result.inserted_id
                    ))
                })
            })
            .await
    }

    async fn find(&self, scope: &OpScope, filter: Filter) -> Result<Vec<T>, StoreError> {
        scope
            .run("find", async {
                let cursor = self.collection.find(filter.to_document(), None).await?;
                let records: Vec<T> = cursor.try_collect().await?;
                Ok(records)
            })
            .await
    }

    async fn find_one(&self, scope: &OpScope, filter: Filter) -> Result<T, StoreError> {
        scope
            .run("find_one", async {
                self.collection
                    .find_one(filter.to_document(), None)
                    .await?
                    .ok_or(StoreError::NotFound)
            })
            .await
    }
}
