//! Payroll Settlement Engine
//!
//! This crate computes monthly payroll settlements for employees governed by
//! labor agreements: base salary plus overtime and bonuses, less the
//! agreement's statutory contributions and any explicit deductions. It also
//! renders settlements as pay-slips and aggregates them into payroll reports.
//!
//! The [`calculation`] module is pure. [`service`] resolves inputs through a
//! [`store::PayrollStore`] handle, and [`api`] serves everything over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
