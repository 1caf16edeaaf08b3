//! Shared fixtures for the end-to-end tests
//!
//! Each test trains a model into a scratch directory, serves it with
//! `spam-api` on a free local port and talks to it over HTTP.

#![allow(dead_code)]

pub mod helpers;
