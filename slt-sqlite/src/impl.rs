//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of the repository traits defined in
//! `slt-core` for the SQLite database backend.

use crate::{Db, types::ProductId};
use slt_core::ports::Repository;

mod catalog;

impl Repository for Db {
    type Error = sqlx::Error;
    type ProductId = ProductId;
}
