//! sitescope-cli
//! =============
//!
//! Command-line dashboard for the `sitescope-core` regional aggregator.
//!
//! This crate primarily provides a binary (`sitescope`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! sitescope init-config
//! sitescope overview
//! sitescope stores --mean rating
//! sitescope choropleth competitors --value count
//! sitescope normalize ZH GE XX
//! ```
//!
//! For programmatic access to the aggregation functions, use the
//! [`sitescope-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
