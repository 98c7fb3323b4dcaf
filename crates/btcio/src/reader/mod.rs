pub mod query;
pub mod source;

pub use query::chain_reader_task;
pub use source::BlockSource;
