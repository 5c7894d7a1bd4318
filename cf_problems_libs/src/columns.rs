/// SQL column metadata of a row struct, usually derived with `#[derive(Columns)]`.
pub trait Columns {
    /// Comma separated column names in field declaration order.
    fn columns() -> &'static str;
    /// Positional bind parameters (`$1, $2, ...`), one per column.
    fn placeholders() -> &'static str;
}
