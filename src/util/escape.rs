/*!
Provides convenience routines for escaping raw bytes in debug output.
*/

/// Provides a readable `Debug` implementation for a single byte.
///
/// Printable ASCII is shown as is, except for space which is quoted so that
/// it remains visible. The usual escapes are used for `\t`, `\r`, `\n`, `\\`,
/// `'` and `"`, and every other byte is shown as an upper case hex escape
/// like `\xFF`.
#[derive(Clone, Copy)]
pub struct DebugByte(pub u8);

impl core::fmt::Debug for DebugByte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.0 {
            b' ' => write!(f, "' '"),
            b'\t' => write!(f, "\\t"),
            b'\r' => write!(f, "\\r"),
            b'\n' => write!(f, "\\n"),
            b'\\' => write!(f, "\\\\"),
            b'\'' => write!(f, "\\'"),
            b'"' => write!(f, "\\\""),
            b if b.is_ascii_graphic() => write!(f, "{}", char::from(b)),
            b => write!(f, "\\x{:02X}", b),
        }
    }
}
