use std::fmt;

/// Displays a number with a `,` between every group of three digits, i.e.,
/// `1234567` is shown as `1,234,567`. Used for the large counts that appear in
/// metrics.
pub struct LargeFormatter<T: ToString>(pub T);

impl<T: ToString> fmt::Display for LargeFormatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", text.as_str()),
        };

        write!(f, "{sign}")?;
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                write!(f, ",")?;
            }
            write!(f, "{digit}")?;
        }

        Ok(())
    }
}
