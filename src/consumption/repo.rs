use super::repo_types::ConsumptionRecord;
use crate::db::{Entity, ParamValue};

impl Entity for ConsumptionRecord {
    const TABLE: &'static str = "ConsumoEnergetico";
    const COLUMNS: &'static [&'static str] = &["Mes", "Ano", "ConsumoKWh", "UsuarioId"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<ParamValue> {
        vec![
            ParamValue::Text(self.month.clone()),
            ParamValue::Int(self.year),
            ParamValue::Float(self.consumption_kwh),
            ParamValue::Int(self.user_id),
        ]
    }
}
