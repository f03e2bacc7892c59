//! Whole-document formatting tests

mod idempotence;
mod kitchensink;
mod process;
