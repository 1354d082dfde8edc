use core::fmt::{self, Display};

/// Displays a byte slice as space separated lowercase hex, e.g. `05 20 00`.
#[derive(Clone, Copy, Debug)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::HexBytes;

    #[test]
    fn test_hex_bytes() {
        assert_eq!(HexBytes(&[0x05, 0x20, 0x00, 0xff]).to_string(), "05 20 00 ff");
        assert_eq!(HexBytes(&[0x0a]).to_string(), "0a");
        assert_eq!(HexBytes(&[]).to_string(), "");
    }
}
