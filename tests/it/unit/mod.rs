//! Unit tests for formcanvas.

mod field_manager_tests;
mod settings_tests;
