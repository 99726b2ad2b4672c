//! Shared test utilities for folio-store.
