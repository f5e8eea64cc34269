//! Statement builders driven by [`Entity`] metadata. Postgres placeholders.

use super::entity::Entity;

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column_list<E: Entity>() -> String {
    std::iter::once(E::ID_COLUMN)
        .chain(E::COLUMNS.iter().copied())
        .map(quote)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT <id, cols> FROM <table>
pub fn select_all<E: Entity>() -> String {
    format!(
        "SELECT {cols} FROM {table} ORDER BY {id}",
        cols = column_list::<E>(),
        table = quote(E::TABLE),
        id = quote(E::ID_COLUMN),
    )
}

/// SELECT <id, cols> FROM <table> WHERE <id> = $1
pub fn select_by_id<E: Entity>() -> String {
    format!(
        "SELECT {cols} FROM {table} WHERE {id} = $1",
        cols = column_list::<E>(),
        table = quote(E::TABLE),
        id = quote(E::ID_COLUMN),
    )
}

/// INSERT INTO <table> (<cols>) VALUES ($1..$n) RETURNING <id, cols>
pub fn insert<E: Entity>() -> String {
    let cols = E::COLUMNS
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(", ");
    let phs = (1..=E::COLUMNS.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({cols}) VALUES ({phs}) RETURNING {ret}",
        table = quote(E::TABLE),
        ret = column_list::<E>(),
    )
}

/// UPDATE <table> SET <c1> = $1, ... WHERE <id> = $n+1
pub fn update_by_id<E: Entity>() -> String {
    let sets = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quote(c), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {sets} WHERE {id} = ${n}",
        table = quote(E::TABLE),
        id = quote(E::ID_COLUMN),
        n = E::COLUMNS.len() + 1,
    )
}

/// DELETE FROM <table> WHERE <id> = $1
pub fn delete_by_id<E: Entity>() -> String {
    format!(
        "DELETE FROM {table} WHERE {id} = $1",
        table = quote(E::TABLE),
        id = quote(E::ID_COLUMN),
    )
}
