use serde::Serialize;
use sqlx::FromRow;
use time::Date;

/// Row of the `DicaEconomia` table. Also the wire shape of every tip response.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SavingsTip {
    #[sqlx(rename = "Id")]
    pub id: i32,
    #[sqlx(rename = "Titulo")]
    #[serde(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "Descricao")]
    #[serde(rename = "descricao")]
    pub description: String,
    #[sqlx(rename = "DataCriacao")]
    #[serde(rename = "dataCriacao", with = "crate::dates")]
    pub created_on: Date,
}

impl SavingsTip {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: 0,
            title,
            description,
            created_on: crate::dates::today(),
        }
    }
}
