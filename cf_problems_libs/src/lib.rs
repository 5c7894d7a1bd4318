pub mod codeforces;
pub mod columns;
pub mod telegram;

pub use cf_problems_derive::Columns;
pub use columns::Columns;
