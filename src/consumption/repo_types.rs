use sqlx::FromRow;

/// Row of the `ConsumoEnergetico` table. Always owned by one user.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ConsumptionRecord {
    #[sqlx(rename = "Id")]
    pub id: i32,
    #[sqlx(rename = "Mes")]
    pub month: String,          // free-text label, e.g. "Janeiro"
    #[sqlx(rename = "Ano")]
    pub year: i32,
    #[sqlx(rename = "ConsumoKWh")]
    pub consumption_kwh: f64,
    #[sqlx(rename = "UsuarioId")]
    pub user_id: i32,
}

impl ConsumptionRecord {
    pub fn new(month: String, year: i32, consumption_kwh: f64, user_id: i32) -> Self {
        Self {
            id: 0,
            month,
            year,
            consumption_kwh,
            user_id,
        }
    }
}
