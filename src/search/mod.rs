//! Clients for the two paged search endpoints.
//!
//! | Endpoint | Module | Paging | Stops on |
//! |----------|--------|--------|----------|
//! | News articles | [`articles`] | numeric offset | limit, `total` exhausted, failure |
//! | Social posts | [`items`] | `next_page` token | limit, date cutoff, no token, failure |
//!
//! Both return partial results instead of errors; a failed page is logged
//! and treated as the end of the results.

pub mod articles;
pub mod items;
