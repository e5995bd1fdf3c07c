//! Diagnostic console command parsing.
//!
//! Line-oriented commands over the serial port:
//!
//! - `c`      start touch sensor calibration
//! - `h`      help plus touch sensor / LED status
//! - `b`      show current LED brightness
//! - `b<N>`   set LED brightness 0-255 (persisted)
//!
//! Parsing is pure so it tests on the host; the embedded side pumps
//! UART bytes through [`LineBuffer`] and routes parsed commands to the
//! same calibration entry point the startup path uses.

/// A parsed console command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start touch sensor calibration.
    Calibrate,
    /// Print help and status.
    Help,
    /// Print the current LED brightness.
    ShowBrightness,
    /// Set and persist the LED brightness.
    SetBrightness(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown,
    /// `b` argument missing, non-numeric, or outside 0-255.
    InvalidBrightness,
}

/// Parse one console line.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let mut chars = line.chars();
    match chars.next() {
        None => Err(ParseError::Empty),
        Some('c') => Ok(Command::Calibrate),
        Some('h') => Ok(Command::Help),
        Some('b') => {
            let rest = chars.as_str().trim();
            if rest.is_empty() {
                Ok(Command::ShowBrightness)
            } else {
                rest.parse::<u16>()
                    .ok()
                    .filter(|v| *v <= 255)
                    .map(|v| Command::SetBrightness(v as u8))
                    .ok_or(ParseError::InvalidBrightness)
            }
        }
        Some(_) => Err(ParseError::Unknown),
    }
}

/// Help text printed for `h` and at startup.
pub const HELP_TEXT: &str = "\
------ Available Serial Commands ------
c - Start touch sensor calibration
h - Display this help message
b[0-255] - Set LED brightness (e.g., b255, b128, b0)
b - Show current LED brightness
------------------------------------";

/// Accumulates raw console bytes into complete lines.
///
/// Carriage returns and newlines both terminate a line; non-printable
/// bytes are discarded; overlong lines are truncated at the buffer
/// capacity.
pub struct LineBuffer {
    line: heapless::String<64>,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            line: heapless::String::new(),
        }
    }

    /// Feed one byte. Returns a completed line when a terminator
    /// arrives with content buffered.
    pub fn push(&mut self, byte: u8) -> Option<heapless::String<64>> {
        match byte {
            b'\r' | b'\n' => {
                if self.line.is_empty() {
                    None
                } else {
                    let line = self.line.clone();
                    self.line.clear();
                    Some(line)
                }
            }
            0x20..=0x7E => {
                let _ = self.line.push(byte as char);
                None
            }
            _ => None,
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_letter_commands() {
        assert_eq!(parse_line("c"), Ok(Command::Calibrate));
        assert_eq!(parse_line("h"), Ok(Command::Help));
        assert_eq!(parse_line("b"), Ok(Command::ShowBrightness));
    }

    #[test]
    fn parses_brightness_values() {
        assert_eq!(parse_line("b0"), Ok(Command::SetBrightness(0)));
        assert_eq!(parse_line("b128"), Ok(Command::SetBrightness(128)));
        assert_eq!(parse_line("b255"), Ok(Command::SetBrightness(255)));
    }

    #[test]
    fn rejects_out_of_range_brightness() {
        assert_eq!(parse_line("b256"), Err(ParseError::InvalidBrightness));
        assert_eq!(parse_line("b9999"), Err(ParseError::InvalidBrightness));
        assert_eq!(parse_line("bxyz"), Err(ParseError::InvalidBrightness));
    }

    #[test]
    fn rejects_unknown_and_empty_input() {
        assert_eq!(parse_line(""), Err(ParseError::Empty));
        assert_eq!(parse_line("   "), Err(ParseError::Empty));
        assert_eq!(parse_line("x"), Err(ParseError::Unknown));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_line("  c \r"), Ok(Command::Calibrate));
        assert_eq!(parse_line(" b42 "), Ok(Command::SetBrightness(42)));
    }

    #[test]
    fn line_buffer_assembles_lines() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.push(b'b'), None);
        assert_eq!(buf.push(b'4'), None);
        assert_eq!(buf.push(b'2'), None);
        let line = buf.push(b'\n').unwrap();
        assert_eq!(line.as_str(), "b42");
        // Buffer is reusable after a line completes.
        assert_eq!(buf.push(b'c'), None);
        assert_eq!(buf.push(b'\r').unwrap().as_str(), "c");
    }

    #[test]
    fn line_buffer_skips_blank_terminators_and_control_bytes() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.push(b'\n'), None);
        assert_eq!(buf.push(b'\r'), None);
        assert_eq!(buf.push(0x07), None); // bell - discarded
        assert_eq!(buf.push(b'h'), None);
        assert_eq!(buf.push(b'\n').unwrap().as_str(), "h");
    }
}
