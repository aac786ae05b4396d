//! Prayer chain roster: fetches the sign-up sheet, spreads respondents over
//! 24 hourly slots and serves the result.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod feed;
pub mod report;
pub mod schedule;
pub mod sitemap;
pub mod web;
