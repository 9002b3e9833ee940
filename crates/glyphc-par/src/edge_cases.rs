//! Edge case tests for glyphc-par
