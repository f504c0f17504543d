//! Cross-module tests for the atlas and layout pipeline
