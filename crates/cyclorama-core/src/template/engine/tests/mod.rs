//! Tests for the template engine, split by concern

use super::*;

mod helpers;
