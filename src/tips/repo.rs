use super::repo_types::SavingsTip;
use crate::db::{Entity, ParamValue};

impl Entity for SavingsTip {
    const TABLE: &'static str = "DicaEconomia";
    const COLUMNS: &'static [&'static str] = &["Titulo", "Descricao", "DataCriacao"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<ParamValue> {
        vec![
            ParamValue::Text(self.title.clone()),
            ParamValue::Text(self.description.clone()),
            ParamValue::Date(self.created_on),
        ]
    }
}
