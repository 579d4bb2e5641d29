//! Unit and scenario tests spanning several modules.

mod remote_tests;
mod search_scenarios;
