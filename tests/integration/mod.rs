//! Integration Tests Module
//!
//! End-to-end tests that drive the session controller over real store
//! backends: prompt editing, search and sort, undo-able deletes, import and
//! export, templates and locales, and the AI assistant.

mod support;

// Add, edit, search and sort through the session
mod session_test;

// Delete, undo and finalize
mod delete_flow_test;

// Export and import files
mod transfer_test;

// Template seeding and language switching
mod templates_test;

// Assistant requests and API key handling
mod assist_test;

// Startup wiring and command handlers
mod commands_test;
