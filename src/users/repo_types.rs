use sqlx::FromRow;
use time::Date;

use crate::consumption::repo_types::ConsumptionRecord;

/// Row of the `Usuario` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    #[sqlx(rename = "Id")]
    pub id: i32,
    #[sqlx(rename = "FirebaseId")]
    pub firebase_id: String,                // external identity provider reference
    #[sqlx(rename = "Nome")]
    pub name: String,
    #[sqlx(rename = "Email")]
    pub email: String,                      // unique across users
    #[sqlx(rename = "DataCadastro")]
    pub registered_on: Date,
    /// Filled only by the eager-loading queries.
    #[sqlx(skip)]
    pub consumption_records: Vec<ConsumptionRecord>,
}

impl User {
    pub fn new(firebase_id: String, name: String, email: String) -> Self {
        Self {
            id: 0,
            firebase_id,
            name,
            email,
            registered_on: crate::dates::today(),
            consumption_records: Vec::new(),
        }
    }
}

/// One row of `Usuario LEFT JOIN ConsumoEnergetico`.
#[derive(Debug, Clone, FromRow)]
pub struct UserConsumptionRow {
    pub user_id: i32,
    pub firebase_id: String,
    pub name: String,
    pub email: String,
    pub registered_on: Date,
    pub record_id: Option<i32>,
    pub month: Option<String>,
    pub year: Option<i32>,
    pub consumption_kwh: Option<f64>,
}
