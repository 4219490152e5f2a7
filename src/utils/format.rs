/// Render a price with two decimals, rounding half-up
///
/// Rounding works on the shortest decimal representation of the value
/// (what `{}` prints), so `175.065` becomes `175.07` even though the nearest
/// binary double sits just below it and `{:.2}` would print `175.06`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.2}", value);
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let frac: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();
    digits.push(frac.first().copied().unwrap_or(0));
    digits.push(frac.get(1).copied().unwrap_or(0));

    if frac.get(2).copied().unwrap_or(0) >= 5 {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!("{}{}.{}", sign, to_text(&digits[..split]), to_text(&digits[split..]))
}
