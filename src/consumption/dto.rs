use serde::{Deserialize, Serialize};
use validator::Validate;

use super::repo_types::ConsumptionRecord;
use crate::validation::RequestShape;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRequest {
    #[validate(
        required(message = "O campo mes é obrigatório."),
        length(
            min = 1,
            max = 2000,
            message = "O campo mes deve ter entre 1 e 2000 caracteres."
        )
    )]
    pub mes: Option<String>,
    #[validate(required(message = "O campo ano é obrigatório."))]
    pub ano: Option<i32>,
    #[serde(rename = "consumoKWh")]
    #[validate(
        required(message = "O campo consumoKWh é obrigatório."),
        range(min = 0.0, message = "O consumo não pode ser negativo.")
    )]
    pub consumo_kwh: Option<f64>,
    #[validate(required(message = "O campo usuarioId é obrigatório."))]
    pub usuario_id: Option<i32>,
}

impl RequestShape for ConsumptionRequest {
    fn wire_name(field: &str) -> String {
        match field {
            "consumo_kwh" => "consumoKWh".into(),
            "usuario_id" => "usuarioId".into(),
            other => other.into(),
        }
    }
}

/// Validated field values of a [`ConsumptionRequest`].
pub struct ConsumptionFields {
    pub month: String,
    pub year: i32,
    pub consumption_kwh: f64,
    pub user_id: i32,
}

impl ConsumptionRequest {
    /// Only call after validation; missing values fall back to defaults.
    pub fn into_fields(self) -> ConsumptionFields {
        ConsumptionFields {
            month: self.mes.unwrap_or_default(),
            year: self.ano.unwrap_or_default(),
            consumption_kwh: self.consumo_kwh.unwrap_or_default(),
            user_id: self.usuario_id.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionResponse {
    pub id: i32,
    pub mes: String,
    pub ano: i32,
    #[serde(rename = "consumoKWh")]
    pub consumo_kwh: f64,
    #[serde(rename = "usuarioId")]
    pub usuario_id: i32,
}

impl From<ConsumptionRecord> for ConsumptionResponse {
    fn from(c: ConsumptionRecord) -> Self {
        Self {
            id: c.id,
            mes: c.month,
            ano: c.year,
            consumo_kwh: c.consumption_kwh,
            usuario_id: c.user_id,
        }
    }
}
