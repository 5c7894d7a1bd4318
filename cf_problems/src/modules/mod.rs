pub mod bot;
pub mod migration;
pub mod problems;
#[cfg(test)]
pub mod test_server;
