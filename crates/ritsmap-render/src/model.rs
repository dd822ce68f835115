use ritsmap_layout::{CircleLayout, EnclosingArc, PlacedDot, Point};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

/// Corner points of the square circumscribing a circle.
pub(crate) fn circle_extent(center: Point, r: f64) -> [(f64, f64); 2] {
    [(center.x - r, center.y - r), (center.x + r, center.y + r)]
}

/// Straight connector: a spoke from the RITS center or a companion line from the FSS center.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub index: usize,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LabelKind {
    Participant,
    /// "RBA" next to the haloed first marker.
    Rba,
    /// "CLS" inside the last marker.
    Cls,
    Circle,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLabel {
    pub kind: LabelKind,
    pub index: Option<usize>,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: TextAnchor,
    pub fill: &'static str,
    pub font_size: f64,
    pub bold: bool,
}

impl LayoutLabel {
    /// Box around the text, vertically centered on `y` (`dominant-baseline="middle"`).
    pub fn extent(&self) -> [(f64, f64); 2] {
        let left = match self.anchor {
            TextAnchor::Start => self.x,
            TextAnchor::Middle => self.x - self.width / 2.0,
        };
        [
            (left, self.y - self.height / 2.0),
            (left + self.width, self.y + self.height / 2.0),
        ]
    }
}

/// Thin line from a marker's edge to its label; three points when kinked.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub index: usize,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLayout {
    pub circles: CircleLayout,
    pub arc: EnclosingArc,
    pub show_arc: bool,
    pub arc_stroke_width: f64,
    pub dots: Vec<PlacedDot>,
    pub spokes: Vec<Segment>,
    pub connectors: Vec<Segment>,
    pub labels: Vec<LayoutLabel>,
    pub leaders: Vec<Leader>,
    pub bounds: Bounds,
}

impl DiagramLayout {
    pub fn dot(&self, index: usize) -> Option<&PlacedDot> {
        self.dots.get(index).filter(|d| d.index() == index)
    }

    pub fn companion_count(&self) -> usize {
        self.dots.iter().filter(|d| d.companion.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::from_points([(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)]).unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-2.0, -1.0, 4.0, 5.0));
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.padded(1.0).height(), 8.0);
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn middle_anchored_label_is_centered() {
        let l = LayoutLabel {
            kind: LabelKind::Cls,
            index: Some(99),
            text: "CLS".to_string(),
            x: 100.0,
            y: 50.0,
            width: 30.0,
            height: 20.0,
            anchor: TextAnchor::Middle,
            fill: "white",
            font_size: 16.0,
            bold: true,
        };
        assert_eq!(l.extent(), [(85.0, 40.0), (115.0, 60.0)]);
    }
}
