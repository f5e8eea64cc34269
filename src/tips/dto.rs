use serde::Deserialize;
use validator::Validate;

use crate::validation::RequestShape;

#[derive(Debug, Deserialize, Validate)]
pub struct TipRequest {
    #[validate(
        required(message = "O campo titulo é obrigatório."),
        length(
            min = 1,
            max = 2000,
            message = "O campo titulo deve ter entre 1 e 2000 caracteres."
        )
    )]
    pub titulo: Option<String>,
    #[validate(
        required(message = "O campo descricao é obrigatório."),
        length(
            min = 1,
            max = 2000,
            message = "O campo descricao deve ter entre 1 e 2000 caracteres."
        )
    )]
    pub descricao: Option<String>,
}

impl RequestShape for TipRequest {}

impl TipRequest {
    /// `(title, description)`; only call after validation.
    pub fn into_fields(self) -> (String, String) {
        (
            self.titulo.unwrap_or_default(),
            self.descricao.unwrap_or_default(),
        )
    }
}
