pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Point at `angle` radians on the ellipse centered at `center` with radii `rx`/`ry`.
pub fn on_ellipse(center: Point, rx: f64, ry: f64, angle: f64) -> Point {
    point(center.x + rx * angle.cos(), center.y + ry * angle.sin())
}

/// Appends `v` the way JavaScript's `Number#toString()` prints it.
///
/// Non-finite values print as `0` and `-0` prints as `0`, so generated path data never carries
/// `NaN` or a signed zero.
pub fn push_js_number(out: &mut String, v: f64, buf: &mut ryu_js::Buffer) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let v = if v == 0.0 { 0.0 } else { v };
    out.push_str(buf.format_finite(v));
}

pub fn js_number(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    let mut out = String::new();
    push_js_number(&mut out, v, &mut buf);
    out
}

/// Two fractional digits with trailing zeros kept, like `Number#toFixed(2)`.
pub fn fixed2(v: f64) -> String {
    if !v.is_finite() {
        return "0.00".to_string();
    }
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}
