pub mod reference;
pub mod regex;
pub mod time;

#[cfg(test)]
pub mod test_fixtures;
