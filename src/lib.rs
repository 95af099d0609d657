//! Core library exports for the Todo planner.
//!
//! This crate exposes the domain rules, forms, repositories, services and
//! read models used by a todo planner front-end. State lives in an explicit
//! [`repository::InMemoryRepository`] that the presentation layer owns.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod repository;
pub mod services;
pub mod settings;
