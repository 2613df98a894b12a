use thiserror::Error;

/// Failure while serving a page of readings. Connection trouble and
/// statement trouble get different user-facing messages; the source error
/// stays in the server log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),
}

impl FetchError {
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if is_connect_error(&err) {
            FetchError::Connect(err)
        } else {
            FetchError::Query(err)
        }
    }

    /// Message rendered in-page. Never includes driver detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Connect(_) => "Failed to connect to the database.",
            FetchError::Query(_) => "Database error.",
        }
    }
}

fn is_connect_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => true,
        sqlx::Error::Database(db_err) => {
            // 08S01: communication link failure, 28000: access denied
            db_err
                .code()
                .is_some_and(|code| code == "08S01" || code == "28000")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_counts_as_connection_failure() {
        let err = FetchError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, FetchError::Connect(_)));
        assert_eq!(err.user_message(), "Failed to connect to the database.");
    }

    #[test]
    fn row_not_found_counts_as_query_failure() {
        let err = FetchError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, FetchError::Query(_)));
        assert_eq!(err.user_message(), "Database error.");
    }
}
