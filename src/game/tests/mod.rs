//! Game-level test suite.

mod edge_cases;
