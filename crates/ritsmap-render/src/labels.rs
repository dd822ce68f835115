//! Participant names and captions.

use crate::model::{LabelKind, LayoutLabel, Leader, TextAnchor};
use crate::text::{TextMeasurer, TextStyle};
use ritsmap_layout::geom::point;
use ritsmap_layout::{CircleLayout, PlacedDot};

pub const LABEL_FILL: &str = "#000000";
/// The four major banks are picked out in dark red.
pub const MAJOR_BANK_FILL: &str = "#991b1b";
pub const RBA_FILL: &str = "#991b1b";
pub const CLS_FILL: &str = "white";
pub const LEADER_STROKE: &str = "#000000";
pub const LEADER_STROKE_WIDTH: f64 = 0.5;

const LABEL_FONT_SIZE: f64 = 10.0;
const CAPTION_FONT_SIZE: f64 = 16.0;
const CIRCLE_FONT_SIZE: f64 = 18.0;

/// Named participants by marker index.
pub const PARTICIPANTS: &[(usize, &str)] = &[
    (1, "Citibank, N.A."),
    (2, "JPMorgan Chase Bank, National Association"),
    (45, "HSBC Bank Australia Limited"),
    (46, "ING Bank (Australia) Limited"),
    (50, "Australia and New Zealand Banking Group Limited"),
    (51, "Commonwealth Bank of Australia"),
    (52, "National Australia Bank Limited"),
    (53, "Westpac Banking Corporation"),
    (54, "Macquarie Bank Limited"),
    (55, "Bendigo and Adelaide Bank Limited"),
    (84, "Australian Settlements Limited"),
    (85, "Indue Ltd"),
    (87, "CUSCAL Limited"),
    (88, "Wise Australia Pty Limited"),
    (96, "ASX Settlement Pty Limited"),
    (97, "ASX Clearing Corporation Limited"),
    (98, "LCH Limited"),
];

pub fn participant_name(index: usize) -> Option<&'static str> {
    PARTICIPANTS
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, name)| *name)
}

/// Vertical placement of a participant label.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Row {
    /// Beside its own marker, shifted by `dy`.
    Beside(f64),
    /// Below another marker's label row, stacking related names.
    Under(usize, f64),
}

fn row(index: usize) -> Row {
    match index {
        1 => Row::Beside(-12.0),
        2 | 84 => Row::Beside(-2.0),
        45 | 96 => Row::Beside(-1.0),
        46 => Row::Beside(6.0),
        85 => Row::Under(84, 8.0),
        87 => Row::Under(84, 30.0),
        88 => Row::Under(84, 40.0),
        97 => Row::Under(96, 9.0),
        98 => Row::Under(96, 19.0),
        _ => Row::Beside(0.0),
    }
}

fn label_dx(index: usize) -> f64 {
    match index {
        50..=55 => 33.0,
        96..=98 => 35.0,
        _ => 25.0,
    }
}

fn label_fill(index: usize) -> &'static str {
    if (50..=53).contains(&index) {
        MAJOR_BANK_FILL
    } else {
        LABEL_FILL
    }
}

#[allow(clippy::too_many_arguments)]
fn measured(
    measurer: &dyn TextMeasurer,
    kind: LabelKind,
    index: Option<usize>,
    text: &str,
    (x, y): (f64, f64),
    anchor: TextAnchor,
    fill: &'static str,
    style: &TextStyle,
) -> LayoutLabel {
    let m = measurer.measure(text, style);
    LayoutLabel {
        kind,
        index,
        text: text.to_string(),
        x,
        y,
        width: m.width,
        height: m.height,
        anchor,
        fill,
        font_size: style.font_size,
        bold: style.font_weight.is_some(),
    }
}

/// Participant labels with their leader lines.
pub fn participant_labels(
    dots: &[PlacedDot],
    measurer: &dyn TextMeasurer,
) -> (Vec<LayoutLabel>, Vec<Leader>) {
    let by_index = |i: usize| dots.get(i).filter(|d| d.index() == i);
    let style = TextStyle::sized(LABEL_FONT_SIZE);

    let mut labels = Vec::new();
    let mut leaders = Vec::new();
    for &(index, name) in PARTICIPANTS {
        let Some(dot) = by_index(index) else {
            continue;
        };
        let y = match row(index) {
            Row::Beside(dy) => dot.position.y + dy,
            Row::Under(anchor, dy) => by_index(anchor).unwrap_or(dot).position.y + dy,
        };
        let x = dot.position.x + label_dx(index);

        let start = point(dot.position.x + dot.radius(), dot.position.y);
        let end = point(x - 5.0, y);
        let points = if (50..=55).contains(&index) {
            vec![start, point(end.x - 8.0, end.y), end]
        } else {
            vec![start, end]
        };
        leaders.push(Leader { index, points });

        labels.push(measured(
            measurer,
            LabelKind::Participant,
            Some(index),
            name,
            (x, y),
            TextAnchor::Start,
            label_fill(index),
            &style,
        ));
    }
    (labels, leaders)
}

/// "RBA" beside the haloed marker and "CLS" inside the last marker, when present.
pub fn marker_captions(dots: &[PlacedDot], measurer: &dyn TextMeasurer) -> Vec<LayoutLabel> {
    let style = TextStyle::sized(CAPTION_FONT_SIZE).bold();
    let mut out = Vec::new();
    if let Some((dot, halo)) = dots.iter().find_map(|d| d.halo.map(|h| (d, h))) {
        out.push(measured(
            measurer,
            LabelKind::Rba,
            Some(dot.index()),
            "RBA",
            (halo.center.x + halo.radius + 5.0, halo.center.y),
            TextAnchor::Start,
            RBA_FILL,
            &style,
        ));
    }
    if let Some(cls) = dots.get(99).filter(|d| d.index() == 99) {
        out.push(measured(
            measurer,
            LabelKind::Cls,
            Some(99),
            "CLS",
            (cls.position.x, cls.position.y),
            TextAnchor::Middle,
            CLS_FILL,
            &style,
        ));
    }
    out
}

pub fn circle_captions(circles: &CircleLayout, measurer: &dyn TextMeasurer) -> Vec<LayoutLabel> {
    let style = TextStyle::sized(CIRCLE_FONT_SIZE).bold();
    [
        ("RITS", circles.big.center, "#1e3a8a"),
        ("FSS", circles.small.center, "#9a3412"),
    ]
    .into_iter()
    .map(|(text, c, fill)| {
        measured(
            measurer,
            LabelKind::Circle,
            None,
            text,
            (c.x, c.y),
            TextAnchor::Middle,
            fill,
            &style,
        )
    })
    .collect()
}
