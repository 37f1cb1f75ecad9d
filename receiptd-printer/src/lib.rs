//! # receiptd-printer
//!
//! ESC/POS thermal printer driver - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Text conversion into the document's declared encoding
//! - Raw device transport (printer character-device node)
//! - The stateful print session (buffer, then flush as one job)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Document interpretation → receiptd-server
//!
//! ## Example
//!
//! ```ignore
//! use receiptd_printer::{Alignment, Device, EscPosSession, RawDevice, Session};
//!
//! let device = std::sync::Arc::new(RawDevice::new("/dev/usb/lp0"));
//! device.open().await?;
//!
//! let mut session = EscPosSession::new(device, "gbk", 48)?;
//! session.align(Alignment::Center);
//! session.write_text("票据");
//! session.cut();
//! session.flush().await?;
//! ```

mod device;
mod encoding;
mod error;
mod escpos;
mod session;

// Re-exports
pub use device::{Device, RawDevice};
pub use encoding::{convert_document, encoded_width, pad_width, resolve, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::{Alignment, BarcodeOptions, EscPosBuilder};
pub use session::{EscPosSession, Session, TableCell, TextStyle};
