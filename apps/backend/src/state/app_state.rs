use sea_orm::DatabaseConnection;

/// Shared resources handed to every service call.
///
/// Cloning is cheap: the connection is a handle onto the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
