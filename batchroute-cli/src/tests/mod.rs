//! Shared test harness modules for the batch router CLI.

use super::*;

mod batch_unit;
mod helpers;
