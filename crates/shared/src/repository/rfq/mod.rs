mod command;
mod query;

use self::command::RfqCommandRepository;
use self::query::RfqQueryRepository;

use std::sync::Arc;

use crate::{
    abstract_trait::{DynRfqCommandRepository, DynRfqQueryRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct RfqRepository {
    pub query: DynRfqQueryRepository,
    pub command: DynRfqCommandRepository,
}

impl RfqRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(RfqQueryRepository::new(pool.clone())) as DynRfqQueryRepository;
        let command = Arc::new(RfqCommandRepository::new(pool)) as DynRfqCommandRepository;

        Self { query, command }
    }
}
