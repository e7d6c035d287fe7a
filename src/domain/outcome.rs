/// Result of a single controller operation.
///
/// Every failure is folded into one of these variants at the controller
/// boundary; nothing escapes as an unhandled error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    ValidationError(String),
    StorageError(String),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}
