//! # Grocery List
//!
//! Turns a selection of recipes into one consolidated shopping list:
//! ingredient quantities are scaled to the requested servings, merged by
//! normalized name and unit, rounded to shoppable amounts and grouped by
//! store category. Around that core sit dietary badges, store-mode
//! ordering, plain-text export, shareable list links, undo/redo and a
//! persisted session.

pub mod categorizer;
pub mod config;
pub mod dietary;
pub mod errors;
pub mod export;
pub mod history;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod merge_engine;
pub mod normalization;
pub mod patterns;
pub mod recipes;
pub mod rounding;
pub mod session;
pub mod share;
pub mod storage;
pub mod store_mode;
pub mod units;
