use cf_problems_libs::Columns;
use sqlx::FromRow;

/// A row of the `problems` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Columns)]
pub struct Problem {
    pub name: String,
    pub number: String, // contest id + index, e.g. 1792A
    pub tags: Vec<String>,
    pub solved_count: i32,
    pub rating: i32, // 0 when upstream has no rating
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_columns_follow_field_order() {
        assert_eq!(
            Problem::columns(),
            "name, number, tags, solved_count, rating"
        );
        assert_eq!(Problem::placeholders(), "$1, $2, $3, $4, $5");
    }
}
