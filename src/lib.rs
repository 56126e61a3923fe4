//! pageflow: a paginated reader for long plain-text documents.
//!
//! The pure core breaks logical lines into rows that fit a measured width
//! ([`layout`]), keeps an anchored viewport over them ([`viewport`]) and reflows
//! raw text into paragraphs ([`format`]). The impure shell around it loads text
//! ([`source`]), queues and applies view actions from any thread ([`action`]) and
//! drives a terminal front-end ([`view`]).

pub mod action;
pub mod config;
pub mod content;
pub mod format;
pub mod layout;
pub mod logging;
pub mod measure;
pub mod model;
pub mod source;
pub mod view;
pub mod viewport;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
