use async_trait::async_trait;

use super::repo_types::{User, UserConsumptionRow};
use crate::{
    consumption::repo_types::ConsumptionRecord,
    db::{Entity, ParamValue, PgRepository, RepoResult, UserRepository},
};

impl Entity for User {
    const TABLE: &'static str = "Usuario";
    const COLUMNS: &'static [&'static str] = &["FirebaseId", "Nome", "Email", "DataCadastro"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<ParamValue> {
        vec![
            ParamValue::Text(self.firebase_id.clone()),
            ParamValue::Text(self.name.clone()),
            ParamValue::Text(self.email.clone()),
            ParamValue::Date(self.registered_on),
        ]
    }
}

const SELECT_WITH_CONSUMPTION: &str = r#"
    SELECT u."Id"           AS user_id,
           u."FirebaseId"   AS firebase_id,
           u."Nome"         AS name,
           u."Email"        AS email,
           u."DataCadastro" AS registered_on,
           c."Id"           AS record_id,
           c."Mes"          AS month,
           c."Ano"          AS year,
           c."ConsumoKWh"   AS consumption_kwh
      FROM "Usuario" u
      LEFT JOIN "ConsumoEnergetico" c ON c."UsuarioId" = u."Id"
"#;

/// Fold joined rows (ordered by user) back into users with their records.
pub(crate) fn group_rows(rows: Vec<UserConsumptionRow>) -> Vec<User> {
    let mut users: Vec<User> = Vec::new();
    for row in rows {
        let same_user = users.last().map(|u| u.id) == Some(row.user_id);
        if !same_user {
            users.push(User {
                id: row.user_id,
                firebase_id: row.firebase_id,
                name: row.name,
                email: row.email,
                registered_on: row.registered_on,
                consumption_records: Vec::new(),
            });
        }
        if let (Some(id), Some(month), Some(year), Some(kwh)) =
            (row.record_id, row.month, row.year, row.consumption_kwh)
        {
            if let Some(user) = users.last_mut() {
                user.consumption_records
                    .push(ConsumptionRecord { id, month, year, consumption_kwh: kwh, user_id: user.id });
            }
        }
    }
    users
}

#[async_trait]
impl UserRepository for PgRepository<User> {
    async fn get_all_with_consumption(&self) -> RepoResult<Vec<User>> {
        let stmt = format!(r#"{SELECT_WITH_CONSUMPTION} ORDER BY u."Id", c."Id""#);
        let rows = sqlx::query_as::<_, UserConsumptionRow>(&stmt)
            .fetch_all(self.pool())
            .await?;
        Ok(group_rows(rows))
    }

    async fn get_by_id_with_consumption(&self, id: i32) -> RepoResult<Option<User>> {
        let stmt = format!(r#"{SELECT_WITH_CONSUMPTION} WHERE u."Id" = $1 ORDER BY c."Id""#);
        let rows = sqlx::query_as::<_, UserConsumptionRow>(&stmt)
            .bind(id)
            .fetch_all(self.pool())
            .await?;
        Ok(group_rows(rows).into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn row(user_id: i32, record: Option<(i32, &str)>) -> UserConsumptionRow {
        UserConsumptionRow {
            user_id,
            firebase_id: format!("UID{user_id}"),
            name: "Test User".into(),
            email: format!("user{user_id}@example.com"),
            registered_on: date!(2024 - 11 - 18),
            record_id: record.map(|r| r.0),
            month: record.map(|r| r.1.to_string()),
            year: record.map(|_| 2024),
            consumption_kwh: record.map(|_| 150.5),
        }
    }

    #[test]
    fn users_without_records_get_empty_collections() {
        let users = group_rows(vec![row(1, None), row(2, None)]);
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.consumption_records.is_empty()));
    }

    #[test]
    fn records_attach_to_their_owner() {
        let users = group_rows(vec![
            row(1, Some((10, "Janeiro"))),
            row(1, Some((11, "Fevereiro"))),
            row(2, None),
            row(3, Some((12, "Março"))),
        ]);
        assert_eq!(users.len(), 3);
        let months: Vec<_> = users[0].consumption_records.iter().map(|c| c.month.as_str()).collect();
        assert_eq!(months, ["Janeiro", "Fevereiro"]);
        assert!(users[1].consumption_records.is_empty());
        assert_eq!(users[2].consumption_records[0].user_id, 3);
    }

    #[test]
    fn mapping_matches_schema() {
        let user = User::new("UID1".into(), "Test User".into(), "test@example.com".into());
        assert_eq!(User::TABLE, "Usuario");
        assert_eq!(User::ID_COLUMN, "Id");
        assert_eq!(user.values().len(), User::COLUMNS.len());
        assert_eq!(user.values()[2], ParamValue::Text("test@example.com".into()));
    }
}
