//! Core domain types and storage contract for the reviews service.
//!
//! This crate has no I/O: it defines the [`review::Review`] entity, the
//! parse-and-validate step that turns an untyped JSON payload into a typed
//! [`review::CreateReview`], and the [`storage::ReviewRepository`] trait that
//! storage backends implement.

pub mod review;
pub mod storage;
