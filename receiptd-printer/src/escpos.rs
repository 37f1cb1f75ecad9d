//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data. Text is buffered
//! as UTF-8 and converted to the session's encoding at flush time.

/// Text alignment on the paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Barcode rendering options
///
/// `module_width` is expressed in the unit the print protocol of the source
/// uses (hundreds of dots); it is clamped to the ESC/POS module range 2-6
/// before emission.
#[derive(Debug, Clone, Copy)]
pub struct BarcodeOptions {
    pub module_width: u32,
    pub height: u8,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            module_width: 200,
            height: 100,
        }
    }
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Set text alignment
    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        // ESC a n
        let n = match alignment {
            Alignment::Left => 0x00,
            Alignment::Center => 0x01,
            Alignment::Right => 0x02,
        };
        self.buf.extend_from_slice(&[0x1B, 0x61, n]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Enable underlined text (1-dot underline)
    pub fn underline(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x2D, 0x01]);
        self
    }

    /// Disable underlined text
    pub fn underline_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x2D, 0x00]);
        self
    }

    /// Set character scaling (width x height), 1-8 in each axis
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        // GS ! n - high nibble width, low nibble height
        let w = width.clamp(1, 8) - 1;
        let h = height.clamp(1, 8) - 1;
        self.buf.extend_from_slice(&[0x1D, 0x21, (w << 4) | h]);
        self
    }

    // === Separators ===

    /// Print a full-width line of the given character
    pub fn rule(&mut self, ch: char) -> &mut Self {
        let line = ch.to_string().repeat(self.width);
        self.line(&line)
    }

    // === Barcode ===

    /// Print an EAN13 barcode with human-readable text above and below
    pub fn barcode_ean13(&mut self, data: &str, options: &BarcodeOptions) -> &mut Self {
        // GS H n - HRI position, 3 = both above and below
        self.buf.extend_from_slice(&[0x1D, 0x48, 0x03]);

        // GS w n - module width
        let module = options.module_width.clamp(2, 6) as u8;
        self.buf.extend_from_slice(&[0x1D, 0x77, module]);

        // GS h n - bar height in dots
        self.buf.extend_from_slice(&[0x1D, 0x68, options.height.max(1)]);

        // GS k m=67 (EAN13, function B) len data
        let payload = data.as_bytes();
        let len = payload.len().min(u8::MAX as usize) as u8;
        self.buf.extend_from_slice(&[0x1D, 0x6B, 67, len]);
        self.buf.extend_from_slice(&payload[..len as usize]);

        self
    }

    // === QR Code ===

    /// Print a QR code
    ///
    /// Size: 1-16 (module size in dots); error correction level L.
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00]);

        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);

        // Function 169: Set error correction (L)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let data_bytes = data.as_bytes();
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        self
    }

    // === Paper Control ===

    /// Full cut with feed - feeds n lines then cuts.
    /// Uses GS V 66 n, which lets the printer manage cutter-to-head distance.
    pub fn cut(&mut self) -> &mut Self {
        // GS V 66 n - Full cut after feeding n lines
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, 3]);
        self
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    /// Consume the builder, returning the raw byte buffer
    ///
    /// The buffer still carries UTF-8 text; convert it with
    /// `encoding::convert_document` before sending to a legacy-encoding
    /// printer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.align(Alignment::Center)
            .size(2, 2)
            .line("标题")
            .size(1, 1)
            .align(Alignment::Left)
            .line("内容");

        let data = b.into_bytes();
        // ESC @ init comes first
        assert_eq!(&data[..2], &[0x1B, 0x40]);
        // Center alignment emitted
        assert!(data.windows(3).any(|w| w == [0x1B, 0x61, 0x01]));
    }

    #[test]
    fn test_size_nibbles() {
        let mut b = EscPosBuilder::new(48);
        b.size(3, 3);
        let data = b.into_bytes();
        // GS ! 0x22 = 3x width, 3x height
        assert!(data.windows(3).any(|w| w == [0x1D, 0x21, 0x22]));

        let mut b = EscPosBuilder::new(48);
        b.size(1, 1);
        let data = b.into_bytes();
        assert!(data.windows(3).any(|w| w == [0x1D, 0x21, 0x00]));
    }

    #[test]
    fn test_rule() {
        let mut b = EscPosBuilder::new(10);
        b.rule('_');

        let data = b.into_bytes();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("__________"));
    }

    #[test]
    fn test_barcode_ean13() {
        let mut b = EscPosBuilder::new(48);
        b.barcode_ean13("4006381333931", &BarcodeOptions::default());

        let data = b.into_bytes();
        // HRI both above and below
        assert!(data.windows(3).any(|w| w == [0x1D, 0x48, 0x03]));
        // Module width clamped from 200 down to 6
        assert!(data.windows(3).any(|w| w == [0x1D, 0x77, 0x06]));
        // Height 100
        assert!(data.windows(3).any(|w| w == [0x1D, 0x68, 100]));
        // Function B with EAN13 type and the digits
        assert!(data.windows(4).any(|w| w == [0x1D, 0x6B, 67, 13]));
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("4006381333931"));
    }

    #[test]
    fn test_qr_code() {
        let mut b = EscPosBuilder::new(48);
        b.qr_code("https://example.com", 3);

        let data = b.into_bytes();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("https://example.com"));
        // Print function at the end
        assert!(data.windows(8).any(|w| w == [0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]));
    }

    #[test]
    fn test_cut() {
        let mut b = EscPosBuilder::new(48);
        b.cut();
        let data = b.into_bytes();
        assert!(data.windows(4).any(|w| w == [0x1D, 0x56, 0x42, 3]));
    }
}
