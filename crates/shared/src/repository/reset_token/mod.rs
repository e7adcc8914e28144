mod command;
mod query;

use self::command::ResetTokenCommandRepository;
use self::query::ResetTokenQueryRepository;

use std::sync::Arc;

use crate::{
    abstract_trait::{DynResetTokenCommandRepository, DynResetTokenQueryRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct ResetTokenRepository {
    pub query: DynResetTokenQueryRepository,
    pub command: DynResetTokenCommandRepository,
}

impl ResetTokenRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query =
            Arc::new(ResetTokenQueryRepository::new(pool.clone())) as DynResetTokenQueryRepository;
        let command =
            Arc::new(ResetTokenCommandRepository::new(pool)) as DynResetTokenCommandRepository;

        Self { query, command }
    }
}
