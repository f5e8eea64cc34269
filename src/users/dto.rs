use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

use super::repo_types::User;
use crate::{consumption::dto::ConsumptionResponse, validation::RequestShape};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(
        required(message = "O campo firebaseId é obrigatório."),
        length(
            min = 1,
            max = 2000,
            message = "O campo firebaseId deve ter entre 1 e 2000 caracteres."
        )
    )]
    pub firebase_id: Option<String>,
    #[validate(
        required(message = "O campo nome é obrigatório."),
        length(
            min = 1,
            max = 2000,
            message = "O campo nome deve ter entre 1 e 2000 caracteres."
        )
    )]
    pub nome: Option<String>,
    #[validate(
        required(message = "O campo email é obrigatório."),
        email(message = "O campo email não é um endereço de e-mail válido."),
        length(max = 450, message = "O campo email deve ter no máximo 450 caracteres.")
    )]
    pub email: Option<String>,
}

impl RequestShape for UserRequest {}

impl UserRequest {
    /// `(firebase_id, name, email)`; only call after validation.
    pub fn into_fields(self) -> (String, String, String) {
        (
            self.firebase_id.unwrap_or_default(),
            self.nome.unwrap_or_default(),
            self.email.unwrap_or_default().trim().to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub firebase_id: String,
    pub nome: String,
    pub email: String,
    #[serde(with = "crate::dates")]
    pub data_cadastro: Date,
    pub consumos_energeticos: Vec<ConsumptionResponse>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            firebase_id: u.firebase_id,
            nome: u.name,
            email: u.email,
            data_cadastro: u.registered_on,
            consumos_energeticos: u
                .consumption_records
                .into_iter()
                .map(ConsumptionResponse::from)
                .collect(),
        }
    }
}
