// Copyright 2025 Glyph Contributors

pub mod checked_arithmetics;
pub mod error_utils;
