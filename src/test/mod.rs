//! Shared fixtures for the unit tests.
