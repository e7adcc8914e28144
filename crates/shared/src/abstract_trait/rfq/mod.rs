mod command;
mod query;

pub use self::command::{
    DynRfqCommandRepository, DynRfqCommandService, RfqCommandRepositoryTrait,
    RfqCommandServiceTrait,
};
pub use self::query::{
    DynRfqQueryRepository, DynRfqQueryService, RfqQueryRepositoryTrait, RfqQueryServiceTrait,
};
