//! Receipt Print Server
//!
//! HTTP front end for a USB-attached thermal receipt printer. A client POSTs
//! a JSON document describing one print job; the server interprets the
//! document's command list against a printer session and commits the job.
//!
//! # Module structure
//!
//! ```text
//! receiptd-server/src/
//! ├── core/          # config, state (device readiness latch), server, errors
//! ├── document.rs    # print document data model
//! ├── interpreter.rs # command dispatch + table layout
//! ├── routes/        # HTTP routes (POST /print)
//! └── logger.rs      # tracing setup
//! ```

pub mod core;
pub mod document;
pub mod interpreter;
pub mod logger;
pub mod routes;

// Re-export public types
pub use core::{Config, Readiness, Server, ServerError, ServerState};
pub use document::{Command, Document, StyleData, TableData};
pub use logger::init_logger;
