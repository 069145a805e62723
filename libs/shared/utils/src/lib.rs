pub mod documents;
pub mod ids;
pub mod test_utils;
