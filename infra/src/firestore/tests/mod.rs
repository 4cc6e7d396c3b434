//! Unit tests for the Firestore module

mod value_tests;
