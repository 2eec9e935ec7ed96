//! Number and XML text formatting shared by the SVG writers.

/// Attribute number in JS `Number#toString()` form, with `-0` and sub-1e-9 noise removed.
pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(crate) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-9 {
        v = nearest;
    }
    if v == 0.0 {
        // Also folds `-0`.
        out.push('0');
        return;
    }

    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}

/// Path coordinate rounded to 3 decimals (the d3-path default precision).
pub(crate) fn fmt_path_into(out: &mut String, v: f64) {
    // d3 rounds with `Math.round(x * 1000) / 1000` (ties half-up, including for negatives).
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    append_fixed_3dp_trimmed(out, k);
}

fn append_fixed_3dp_trimmed(out: &mut String, k: i64) {
    if k == 0 {
        out.push('0');
        return;
    }

    if k.is_negative() {
        out.push('-');
    }
    let abs = k.unsigned_abs();
    let int_part = abs / 1000;
    let frac = abs % 1000;

    use std::fmt::Write as _;
    let _ = write!(out, "{int_part}");
    if frac == 0 {
        return;
    }

    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}
