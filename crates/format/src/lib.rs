//! Common utility for extended `std` type formatting
//!
//! These are left public for convenience.
//!
//! For example, trimming fixed-width text labels out of binary records or
//! using prettier formatting for scientific numbers are useful everywhere.

// standard library
use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumFormat {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use tracktools_format::NumFormat;
    /// let number = -1.0;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((1.0).sci(5, 2), "1.00000e+00".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // NaN and inf have no exponent to pad
        let Some(position) = num.find('e') else {
            return num;
        };
        let exp = num.split_off(position);
        // Make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        // Pad the exponent with zeros if needed and put it back on the number
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Text label from a fixed-width block of bytes
///
/// Fortran writes character variables padded with blanks to their declared
/// length, and MODFLOW right-justifies some of them. Any surrounding
/// whitespace and NUL padding is removed.
///
/// ```rust
/// # use tracktools_format::label_from_bytes;
/// assert_eq!(label_from_bytes(b"    FLOW-JA-FACE"), "FLOW-JA-FACE");
/// assert_eq!(label_from_bytes(b"RIV             "), "RIV");
/// assert_eq!(label_from_bytes(b"GRID DISV\0\0\n"), "GRID DISV");
/// ```
pub fn label_from_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}
