//! Tests for the GPX codec

mod reader_tests;
