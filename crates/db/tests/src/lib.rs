//! Conformance tests shared by every [`overseer_db_types::traits::ChainDatabase`]
//! backend.
//!
//! Backends pull these in through [`chain_db_tests`] with an expression that
//! builds a fresh, empty database.

pub mod chain_tests;

#[cfg(test)]
mod stub_tests {
    use overseer_db_types::stubs::StubChainDb;

    crate::chain_db_tests!(StubChainDb::new());
}
