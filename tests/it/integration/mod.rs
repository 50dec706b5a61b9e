//! Integration tests for formcanvas.
//!
//! These drive a `FormEditor` the way a canvas would, with raw pointer
//! events, and check the resulting geometry and notifications.

mod editing_workflow_tests;
mod selection_workflow_tests;
