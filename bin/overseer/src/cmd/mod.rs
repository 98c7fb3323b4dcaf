pub(crate) mod apply;
pub(crate) mod query;
pub(crate) mod run;
