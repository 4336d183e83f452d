//! Document persistence for the hospital collections and the user registry.
//!
//! Every collection is reached through the [`Repository`] trait so handlers
//! work unchanged against MongoDB or the in-process backend.

pub mod error;
pub mod memory;
pub mod mongo;
pub mod scope;

pub use error::StoreError;
pub use memory::InMemoryRepository;
pub use mongo::{MongoRepository, MongoStore};
pub use scope::OpScope;

use crate::models::{Appointment, Department, Doctor, Entity, Patient, User};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Id(ObjectId),
}

impl Filter {
    pub fn to_document(self) -> Document {
        match self {
            Filter::All => doc! {},
            Filter::Id(id) => doc! { "_id": id },
        }
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => record.id() == Some(*id),
        }
    }
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist `record` as-is and return the identifier the store assigned.
    async fn insert(&self, scope: &OpScope, record: &T) -> Result<ObjectId, StoreError>;

    /// All records matching `filter`; empty when nothing matches.
    async fn find(&self, scope: &OpScope, filter: Filter) -> Result<Vec<T>, StoreError>;

    /// First record matching `filter`, or [`StoreError::NotFound`].
    async fn find_one(&self, scope: &OpScope, filter: Filter) -> Result<T, StoreError>;
}

/// Underlying connection, kept for health checks and shutdown.
#[derive(Clone)]
pub enum StoreConnection {
    Mongo(MongoStore),
    Memory,
}

/// Process-wide store handle shared by all request handlers.
#[derive(Clone)]
pub struct EntityStore {
    pub patients: Arc<dyn Repository<Patient>>,
    pub doctors: Arc<dyn Repository<Doctor>>,
    pub appointments: Arc<dyn Repository<Appointment>>,
    pub departments: Arc<dyn Repository<Department>>,
    pub users: Arc<dyn Repository<User>>,
    pub connection: StoreConnection,
}

impl EntityStore {
    pub fn mongo(store: MongoStore) -> Self {
        Self {
            patients: Arc::new(store.hospital_repository::<Patient>()),
            doctors: Arc::new(store.hospital_repository::<Doctor>()),
            appointments: Arc::new(store.hospital_repository::<Appointment>()),
            departments: Arc::new(store.hospital_repository::<Department>()),
            users: Arc::new(store.users_repository::<User>()),
            connection: StoreConnection::Mongo(store),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            patients: Arc::new(InMemoryRepository::<Patient>::new()),
            doctors: Arc::new(InMemoryRepository::<Doctor>::new()),
            appointments: Arc::new(InMemoryRepository::<Appointment>::new()),
            departments: Arc::new(InMemoryRepository::<Department>::new()),
            users: Arc::new(InMemoryRepository::<User>::new()),
            connection: StoreConnection::Memory,
        }
    }

    pub async fn health_check(&self, scope: &OpScope) -> Result<(), StoreError> {
        match &self.connection {
            StoreConnection::Mongo(store) => store.health_check(scope).await,
            StoreConnection::Memory => Ok(()),
        }
    }

    /// Release the underlying connection. Called once, after the HTTP server
    /// has stopped accepting requests.
    pub async fn shutdown(self) {
        match self.connection {
            StoreConnection::Mongo(store) => store.shutdown().await,
            StoreConnection::Memory => {
                tracing::info!("In-memory store released");
            }
        }
    }
}
