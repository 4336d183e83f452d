use super::{Filter, OpScope, Repository, StoreError};
use crate::models::Entity;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

struct StoredRecord<T> {
    record: T,
    /// Values of `T::UNIQUE_FIELDS`, in declaration order.
    unique_values: Vec<Value>,
}

/// Process-local collection with the same contract as a MongoDB collection:
/// ObjectId assignment on insert and unique-field enforcement.
///
/// The uniqueness check and the insert happen under one write lock, so two
/// racing inserts of the same key cannot both succeed.
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<StoredRecord<T>>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn unique_values(record: &T) -> Result<Vec<Value>, StoreError> {
        let value = serde_json::to_value(record).map_err(|e| {
            StoreError::Database(format!(
                "Failed to encode {} record: {}",
                T::COLLECTION,
                e
            ))
        })?;

        Ok(T::UNIQUE_FIELDS
            .iter()
            .map(|field| value.get(*field).cloned().unwrap_or(Value::Null))
            .collect())
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn insert(&self, scope: &OpScope, record: &T) -> Result<ObjectId, StoreError> {
        scope
            .run("insert", async {
                let unique_values = Self::unique_values(record)?;
                let mut records = self.records.write().await;

                for (index, field) in T::UNIQUE_FIELDS.iter().enumerate() {
                    let candidate = &unique_values[index];
                    if records
                        .iter()
                        .any(|stored| &stored.unique_values[index] == candidate)
                    {
                        return Err(StoreError::ConstraintViolation(format!(
                            "duplicate value {} for unique field `{}` in collection `{}`",
                            candidate,
                            field,
                            T::COLLECTION
                        )));
                    }
                }

                let id = ObjectId::new();
                let mut stored = record.clone();
                stored.set_id(id);
                records.push(StoredRecord {
                    record: stored,
                    unique_values,
                });

                Ok(id)
            })
            .await
    }

    async fn find(&self, scope: &OpScope, filter: Filter) -> Result<Vec<T>, StoreError> {
        scope
            .run("find", async {
                let records = self.records.read().await;
                Ok(records
                    .iter()
                    .filter(|stored| filter.matches(&stored.record))
                    .map(|stored| stored.record.clone())
                    .collect())
            })
            .await
    }

    async fn find_one(&self, scope: &OpScope, filter: Filter) -> Result<T, StoreError> {
        scope
            .run("find_one", async {
                let records = self.records.read().await;
                records
                    .iter()
                    .find(|stored| filter.matches(&stored.record))
                    .map(|stored| stored.record.clone())
                    .ok_or(StoreError::NotFound)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp_now, Department, Patient};
    use std::time::Duration;

    fn scope() -> OpScope {
        OpScope::new(Duration::from_secs(5))
    }

    fn patient(email: &str) -> Patient {
        Patient {
            id: None,
            name: "A".to_string(),
            email: email.to_string(),
            age: 30,
            gender: "F".to_string(),
            blood_group: "O+".to_string(),
            contact_no: "123".to_string(),
            created_at: timestamp_now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let repo = InMemoryRepository::<Patient>::new();
        let first = repo.insert(&scope(), &patient("a@x.com")).await.unwrap();
        let second = repo.insert(&scope(), &patient("b@x.com")).await.unwrap();
        assert_ne!(first, second);

        let found = repo.find_one(&scope(), Filter::Id(second)).await.unwrap();
        assert_eq!(found.id, Some(second));
        assert_eq!(found.email, "b@x.com");
    }

    #[tokio::test]
    async fn duplicate_unique_field_is_rejected() {
        let repo = InMemoryRepository::<Patient>::new();
        repo.insert(&scope(), &patient("a@x.com")).await.unwrap();

        let err = repo
            .insert(&scope(), &patient("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(ref msg) if msg.contains("email")));

        let all = repo.find(&scope(), Filter::All).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn collections_without_unique_fields_accept_duplicates() {
        let repo = InMemoryRepository::<Department>::new();
        let department = Department {
            id: None,
            name: "Cardiology".to_string(),
            description: "Heart".to_string(),
            created_at: timestamp_now(),
        };
        repo.insert(&scope(), &department).await.unwrap();
        repo.insert(&scope(), &department).await.unwrap();

        assert_eq!(repo.find(&scope(), Filter::All).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_one_without_match_is_not_found() {
        let repo = InMemoryRepository::<Patient>::new();
        let err = repo
            .find_one(&scope(), Filter::Id(ObjectId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn find_on_empty_collection_is_empty() {
        let repo = InMemoryRepository::<Patient>::new();
        assert!(repo.find(&scope(), Filter::All).await.unwrap().is_empty());
    }
}
