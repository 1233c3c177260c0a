//! ExamPilot API service
//!
//! Basic-auth login plus CRUD over exam folders and the timetables embedded
//! in them, served over REST/JSON with axum.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
