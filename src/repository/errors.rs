use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return RepositoryError::Duplicate(db_err.message().to_string())
                }
                Some(FOREIGN_KEY_VIOLATION) | Some(CHECK_VIOLATION) => {
                    return RepositoryError::Constraint(db_err.message().to_string())
                }
                _ => {}
            }
        }
        RepositoryError::Database(err)
    }
}
