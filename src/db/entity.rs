use time::Date;

/// A column value handed from an entity to a storage backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i32),
    Float(f64),
    Date(Date),
}

/// A persisted record with an integer surrogate key.
///
/// `COLUMNS` lists the writable columns (the key excluded) in the same order
/// as [`Entity::values`]. An id of `0` means the row has not been inserted yet.
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str = "Id";
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn values(&self) -> Vec<ParamValue>;
}
