/// Shortest round-trip text for an f64, using the scanner's extended literals
/// for the values JSON itself cannot spell.
pub(crate) fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        });
    }
    let mut buf = ryu::Buffer::new();
    String::from(buf.format_finite(value))
}
