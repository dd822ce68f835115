/// Shortest round-trippable number, JS `Number#toString()` style, for sizes and radii.
pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(super) fn fmt_into(out: &mut String, v: f64) {
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
        v = 0.0;
    }

    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}

// Coordinates are written with two fractional digits.
pub(super) use ritsmap_layout::geom::fixed2 as fmt2;

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_matches_expected() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(2.4), "2.4");
        assert_eq!(fmt(4.8), "4.8");
        assert_eq!(fmt(117.0), "117");
        assert_eq!(fmt(1e-12), "0");
        assert_eq!(fmt(28.799999999999997), "28.799999999999997");
    }

    #[test]
    fn fmt2_keeps_two_digits() {
        assert_eq!(fmt2(498.5), "498.50");
        assert_eq!(fmt2(-0.001), "0.00");
        assert_eq!(fmt2(f64::NEG_INFINITY), "0.00");
    }

    #[test]
    fn escape_xml_escapes_markup() {
        assert_eq!(
            escape_xml(r#"A&B <"c"> 'd'"#),
            "A&amp;B &lt;&quot;c&quot;&gt; &#39;d&#39;"
        );
        assert_eq!(escape_xml("Citibank, N.A."), "Citibank, N.A.");
    }
}
