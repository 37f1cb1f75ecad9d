//! Stateful print session
//!
//! A session is created per print job, buffers every command, and sends the
//! whole buffer to the device on `flush`. The printer's in-order state
//! (alignment, style, scale) is carried by the command stream itself.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::device::Device;
use crate::encoding;
use crate::error::{PrintError, PrintResult};
use crate::escpos::{Alignment, BarcodeOptions, EscPosBuilder};

/// Text style applied to subsequent output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Bold,
    Underline,
}

/// One table cell: text, alignment and relative width (fraction of paper)
#[derive(Debug, Clone)]
pub struct TableCell {
    pub text: String,
    pub align: Alignment,
    pub width: f32,
}

/// Capability surface of a print session
///
/// Commands mutate the session in order; nothing reaches the device until
/// `flush`. Implemented by [`EscPosSession`] for real hardware and by
/// recording fakes in tests.
#[allow(async_fn_in_trait)]
pub trait Session {
    fn align(&mut self, alignment: Alignment);
    fn set_style(&mut self, style: TextStyle);
    fn set_scale(&mut self, width: u8, height: u8);
    fn write_text(&mut self, text: &str);
    fn line_feed(&mut self, lines: u8);
    fn draw_barcode(&mut self, data: &str, options: &BarcodeOptions);
    fn draw_qr_code(&mut self, data: &str);
    fn draw_table(&mut self, cells: &[TableCell]);
    fn draw_rule(&mut self);
    fn cut(&mut self);

    /// Commit the buffered job to the device, blocking until the write
    /// completes
    async fn flush(&mut self) -> PrintResult<()>;
}

/// ESC/POS session over a [`Device`] transport
pub struct EscPosSession {
    builder: EscPosBuilder,
    encoding: &'static encoding_rs::Encoding,
    device: Arc<dyn Device>,
}

impl EscPosSession {
    /// Create a session for one job
    ///
    /// `encoding_label` comes from the document (WHATWG label, e.g. "gbk");
    /// an unknown label is rejected here so the job fails before anything is
    /// buffered.
    pub fn new(
        device: Arc<dyn Device>,
        encoding_label: &str,
        paper_width: usize,
    ) -> PrintResult<Self> {
        let encoding = encoding::resolve(encoding_label).ok_or_else(|| {
            PrintError::InvalidConfig(format!("Unknown encoding label: {}", encoding_label))
        })?;

        Ok(Self {
            builder: EscPosBuilder::new(paper_width),
            encoding,
            device,
        })
    }

    /// The resolved document encoding
    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        self.encoding
    }
}

impl Session for EscPosSession {
    fn align(&mut self, alignment: Alignment) {
        self.builder.align(alignment);
    }

    fn set_style(&mut self, style: TextStyle) {
        match style {
            TextStyle::Bold => {
                self.builder.bold().underline_off();
            }
            TextStyle::Underline => {
                self.builder.underline().bold_off();
            }
            TextStyle::Normal => {
                self.builder.bold_off().underline_off();
            }
        }
    }

    fn set_scale(&mut self, width: u8, height: u8) {
        self.builder.size(width, height);
    }

    fn write_text(&mut self, text: &str) {
        self.builder.line(text);
    }

    fn line_feed(&mut self, lines: u8) {
        self.builder.feed(lines);
    }

    fn draw_barcode(&mut self, data: &str, options: &BarcodeOptions) {
        self.builder.barcode_ean13(data, options);
    }

    fn draw_qr_code(&mut self, data: &str) {
        self.builder.qr_code(data, 3);
    }

    fn draw_table(&mut self, cells: &[TableCell]) {
        let paper = self.builder.width();
        for cell in cells {
            let columns = (paper as f32 * cell.width).floor() as usize;
            let padded = encoding::pad_width(self.encoding, &cell.text, columns, cell.align);
            self.builder.text(&padded);
        }
        self.builder.newline();
    }

    fn draw_rule(&mut self) {
        self.builder.rule('_');
    }

    fn cut(&mut self) {
        self.builder.cut();
    }

    #[instrument(skip(self), fields(encoding = self.encoding.name()))]
    async fn flush(&mut self) -> PrintResult<()> {
        let width = self.builder.width();
        let buffered = std::mem::replace(&mut self.builder, EscPosBuilder::new(width));

        let data = encoding::convert_document(self.encoding, &buffered.into_bytes());
        debug!(bytes = data.len(), "Flushing job to device");

        self.device.write(&data).await
    }
}
