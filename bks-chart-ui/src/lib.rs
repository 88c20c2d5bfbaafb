//! Shared Dioxus components and chart rendering for the bookstore dashboard.
//!
//! This crate provides:
//! - `chart`: histogram binning and plotters SVG charts
//! - `fetch`: query wrappers that recover errors into user-facing messages
//! - `table`: query rows as display cells
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (inputs, tables, cards, etc.)

pub mod chart;
pub mod components;
pub mod fetch;
pub mod state;
pub mod table;
