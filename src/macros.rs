#[macro_export]
/// A macro to construct a [`BigDecimal`] from a literal.
/// Converts the input tokens to a string, and then parses the string into a
/// [`BigDecimal`]. Panics if the provided input is not a valid decimal
/// literal.
///
/// [`BigDecimal`]: crate::BigDecimal
///
/// # Examples:
/// ```
/// use bigdec::bigdec;
///
/// assert!(bigdec!(1.753).to_string() == "1.753");
/// assert!(bigdec!(0).is_zero());
/// assert!(bigdec!(-0.1).is_negative());
/// ```
macro_rules! bigdec {
    ($l:expr) => {
        <$crate::BigDecimal as ::std::str::FromStr>::from_str(stringify!($l))
            .unwrap_or_else(|e| panic!("{}", e.to_string()))
    };
}
