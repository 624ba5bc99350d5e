//! Slidewise Harness: concrete worlds, rendering and the command line.
//!
//! The harness supplies [`Problem`](slidewise_search::contract::Problem)
//! implementations for grid path-finding, the N-puzzle and sliding-block
//! puzzles, drives them through [`AStar`](slidewise_search::search::AStar),
//! and packages the outcome as a report or an SVG walkthrough.
//!
//! The harness does NOT implement search logic; it delegates to
//! `slidewise_search`. Worlds provide domain rules only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod render;
pub mod report;
pub mod runner;
pub mod worlds;
