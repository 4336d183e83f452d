use super::{format_id, format_timestamp};
use crate::models::Department;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub description: String,
}

impl CreateDepartmentRequest {
    pub fn into_department(self, created_at: DateTime<Utc>) -> Department {
        Department {
            id: None,
            name: self.name,
            description: self.description,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: format_id(department.id),
            name: department.name,
            description: department.description,
            created_at: format_timestamp(department.created_at),
        }
    }
}
