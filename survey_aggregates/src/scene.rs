/*!
Static scene descriptions for the three charts.

A [`Scene`] is what a drawing layer needs to put a chart on screen: a list of
shapes, each with a color and the info panel to show when the pointer hovers
it. Hit-testing is left to the drawing layer, which reports the index of the
hovered shape back through [`Scene::hover`].
*/

use std::f64::consts::PI;

use log::debug;

use crate::config::*;
use crate::views::View;

/// d3 "category10".
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// ColorBrewer "Set2".
pub const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer "Set1".
pub const SET1: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

pub const DONUT_TITLE: &str = "CGPA Distribution (Donut Chart)";
pub const CHORD_TITLE: &str = "Mental Health Relationships (Chord Diagram)";
pub const BAR_TITLE: &str = "Treatment Seeking by CGPA (Stacked Bar)";

/// Delay between the entry animations of two consecutive bars.
pub const BAR_STAGGER_MS: u32 = 100;

const STACK_KEYS: [&str; 2] = [TREATMENT_YES, TREATMENT_NO];

fn ordinal_color(palette: &[&'static str], idx: usize) -> &'static str {
    palette[idx % palette.len()]
}

#[derive(PartialEq, Debug, Clone)]
pub enum ShapeKind {
    /// A slice of the donut. Angles are in radians, clockwise from 12 o'clock.
    Arc {
        label: String,
        value: u64,
        start_angle: f64,
        end_angle: f64,
    },
    /// The outer arc of one question in the chord diagram.
    Group { label: String, total: u64 },
    /// The band between two questions in the chord diagram.
    Ribbon {
        source: String,
        target: String,
        value: u64,
    },
    /// One segment of a stacked bar, spanning [y0, y1] on the value axis.
    Bar {
        bin: String,
        key: String,
        y0: u64,
        y1: u64,
        delay_ms: u32,
    },
}

/// The content displayed when hovering a shape.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct InfoPanel {
    pub title: Option<String>,
    pub lines: Vec<(String, String)>,
}

impl InfoPanel {
    fn lines(lines: &[(&str, String)]) -> InfoPanel {
        InfoPanel {
            title: None,
            lines: lines
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: &'static str,
    pub info: InfoPanel,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Scene {
    pub view: View,
    pub title: &'static str,
    pub shapes: Vec<Shape>,
    pub legend: Vec<LegendEntry>,
    /// Duration of the entry animation.
    pub transition_ms: u32,
    y_max: Option<u64>,
}

impl Scene {
    pub fn hover(&self, shape_idx: usize) -> Option<&InfoPanel> {
        self.shapes.get(shape_idx).map(|s| &s.info)
    }

    /// Upper bound of the value axis, for the stacked bars only.
    pub fn y_max(&self) -> Option<u64> {
        self.y_max
    }
}

/// Builds the scene of one chart from the aggregated data.
///
/// Pure: the same view and data always produce the same scene.
pub fn render(view: View, aggs: &Aggregates) -> Scene {
    let scene = match view {
        View::Donut => render_donut(&aggs.cgpa_counts),
        View::Chord => render_chord(&aggs.co_occurrence),
        View::StackedBar => render_stacked_bar(&aggs.treatment_by_cgpa),
    };
    debug!(
        "render: {:?} {} shapes, {} legend entries",
        view,
        scene.shapes.len(),
        scene.legend.len()
    );
    scene
}

/// Pie layout: the largest slice starts at 12 o'clock, ties keep their order.
fn pie_angles(values: &[u64]) -> Vec<(f64, f64)> {
    let total: u64 = values.iter().sum();
    let mut res = vec![(0.0, 0.0); values.len()];
    if total == 0 {
        return res;
    }
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Stable sort: ties stay in first-seen order.
    order.sort_by(|a, b| values[*b].cmp(&values[*a]));
    let k = 2.0 * PI / (total as f64);
    let mut cur = 0.0;
    for idx in order {
        let end = cur + (values[idx] as f64) * k;
        res[idx] = (cur, end);
        cur = end;
    }
    res
}

fn render_donut(counts: &CgpaCount) -> Scene {
    let values: Vec<u64> = counts.iter().map(|(_, c)| c).collect();
    let angles = pie_angles(&values);
    let mut shapes: Vec<Shape> = Vec::new();
    let mut legend: Vec<LegendEntry> = Vec::new();
    for (idx, ((label, count), (start, end))) in counts.iter().zip(angles).enumerate() {
        let color = ordinal_color(&CATEGORY10, idx);
        shapes.push(Shape {
            kind: ShapeKind::Arc {
                label: label.to_string(),
                value: count,
                start_angle: start,
                end_angle: end,
            },
            color,
            info: InfoPanel::lines(&[("CGPA", label.to_string()), ("Count", count.to_string())]),
        });
        legend.push(LegendEntry {
            label: label.to_string(),
            color,
        });
    }
    Scene {
        view: View::Donut,
        title: DONUT_TITLE,
        shapes,
        legend,
        transition_ms: 1000,
        y_max: None,
    }
}

fn render_chord(matrix: &CoOccurrenceMatrix) -> Scene {
    let labels = matrix.labels();
    let mut shapes: Vec<Shape> = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let total = matrix.row_total(i);
        shapes.push(Shape {
            kind: ShapeKind::Group {
                label: label.clone(),
                total,
            },
            color: ordinal_color(&SET2, i),
            info: InfoPanel::lines(&[
                ("Question", label.clone()),
                ("Yes answers", matrix.get(i, i).to_string()),
            ]),
        });
    }
    // One ribbon per unordered pair. The matrix is symmetric, so the value
    // does not depend on the direction.
    for i in 0..labels.len() {
        for j in i..labels.len() {
            let value = matrix.get(i, j);
            if value == 0 {
                continue;
            }
            shapes.push(Shape {
                kind: ShapeKind::Ribbon {
                    source: labels[i].clone(),
                    target: labels[j].clone(),
                    value,
                },
                color: ordinal_color(&SET2, j),
                info: InfoPanel {
                    title: Some(format!("{} ⇌ {}", labels[i], labels[j])),
                    lines: vec![("Count".to_string(), value.to_string())],
                },
            });
        }
    }
    let legend = labels
        .iter()
        .enumerate()
        .map(|(i, label)| LegendEntry {
            label: label.clone(),
            color: ordinal_color(&SET2, i),
        })
        .collect();
    Scene {
        view: View::Chord,
        title: CHORD_TITLE,
        shapes,
        legend,
        transition_ms: 1000,
        y_max: None,
    }
}

fn render_stacked_bar(treatment: &TreatmentByCgpa) -> Scene {
    let mut shapes: Vec<Shape> = Vec::new();
    for (key_idx, key) in STACK_KEYS.iter().enumerate() {
        let color = ordinal_color(&SET1, key_idx);
        for (bar_idx, (bin, counts)) in treatment.iter().enumerate() {
            // "Yes" sits on the axis, "No" on top of it.
            let (y0, y1) = match *key {
                TREATMENT_YES => (0, counts.yes),
                _ => (counts.yes, counts.total()),
            };
            let value = counts.by_key(key).unwrap_or(0);
            shapes.push(Shape {
                kind: ShapeKind::Bar {
                    bin: bin.to_string(),
                    key: key.to_string(),
                    y0,
                    y1,
                    delay_ms: BAR_STAGGER_MS * bar_idx as u32,
                },
                color,
                info: InfoPanel::lines(&[("CGPA", bin.to_string()), (*key, value.to_string())]),
            });
        }
    }
    let legend = STACK_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| LegendEntry {
            label: key.to_string(),
            color: ordinal_color(&SET1, i),
        })
        .collect();
    Scene {
        view: View::StackedBar,
        title: BAR_TITLE,
        shapes,
        legend,
        transition_ms: 800,
        y_max: Some(treatment.max_total()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;

    fn sample_aggs() -> Aggregates {
        let records = vec![
            Record::from_pairs(&[
                (CGPA_COLUMN, "3.00 - 3.49"),
                ("Do you have Depression?", "Yes"),
                ("Do you have Anxiety?", "Yes"),
                (TREATMENT_COLUMN, "Yes"),
            ]),
            Record::from_pairs(&[
                (CGPA_COLUMN, "3.00 - 3.49"),
                ("Do you have Depression?", "Yes"),
                (TREATMENT_COLUMN, "No"),
            ]),
            Record::from_pairs(&[(CGPA_COLUMN, "3.50 - 4.00"), (TREATMENT_COLUMN, "No")]),
            Record::from_pairs(&[(CGPA_COLUMN, "2.00 - 2.49"), (TREATMENT_COLUMN, "No")]),
        ];
        aggregate(&records, &SurveyColumns::default()).unwrap()
    }

    #[test]
    fn donut_angles_cover_the_circle() {
        let scene = render(View::Donut, &sample_aggs());
        assert_eq!(scene.title, DONUT_TITLE);
        assert_eq!(scene.shapes.len(), 3);
        let mut spans: Vec<(f64, f64)> = scene
            .shapes
            .iter()
            .map(|s| match s.kind {
                ShapeKind::Arc {
                    start_angle,
                    end_angle,
                    ..
                } => (start_angle, end_angle),
                _ => panic!("not an arc: {:?}", s),
            })
            .collect();
        // The largest slice comes first.
        assert_eq!(spans[0].0, 0.0);
        assert!((spans[0].1 - PI).abs() < 1e-9);
        spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        assert!((spans[2].1 - 2.0 * PI).abs() < 1e-9);
        // Ties: "3.50 - 4.00" was seen before "2.00 - 2.49".
        assert!((spans[1].0 - PI).abs() < 1e-9);
        assert_eq!(
            scene.shapes[1].kind,
            ShapeKind::Arc {
                label: "3.50 - 4.00".to_string(),
                value: 1,
                start_angle: spans[1].0,
                end_angle: spans[1].1,
            }
        );
    }

    #[test]
    fn donut_hover_and_legend() {
        let scene = render(View::Donut, &sample_aggs());
        let info = scene.hover(0).unwrap();
        assert_eq!(
            info.lines,
            vec![
                ("CGPA".to_string(), "3.00 - 3.49".to_string()),
                ("Count".to_string(), "2".to_string())
            ]
        );
        assert_eq!(scene.hover(3), None);
        let legend: Vec<&str> = scene.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(legend, vec!["3.00 - 3.49", "3.50 - 4.00", "2.00 - 2.49"]);
        assert_eq!(scene.legend[1].color, CATEGORY10[1]);
    }

    #[test]
    fn empty_donut() {
        let aggs = aggregate(&[], &SurveyColumns::default()).unwrap();
        let scene = render(View::Donut, &aggs);
        assert!(scene.shapes.is_empty());
        assert_eq!(pie_angles(&[0, 0]), vec![(0.0, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn chord_groups_and_ribbons() {
        let scene = render(View::Chord, &sample_aggs());
        assert_eq!(scene.legend.len(), 5);
        let groups: Vec<&Shape> = scene
            .shapes
            .iter()
            .filter(|s| matches!(s.kind, ShapeKind::Group { .. }))
            .collect();
        assert_eq!(groups.len(), 5);
        let ribbons: Vec<(String, String, u64)> = scene
            .shapes
            .iter()
            .filter_map(|s| match &s.kind {
                ShapeKind::Ribbon {
                    source,
                    target,
                    value,
                } => Some((source.clone(), target.clone(), *value)),
                _ => None,
            })
            .collect();
        let dep = "Do you have Depression?".to_string();
        let anx = "Do you have Anxiety?".to_string();
        let treat = TREATMENT_COLUMN.to_string();
        assert_eq!(
            ribbons,
            vec![
                (dep.clone(), dep.clone(), 2),
                (dep.clone(), anx.clone(), 1),
                (dep.clone(), treat.clone(), 1),
                (anx.clone(), anx.clone(), 1),
                (anx.clone(), treat.clone(), 1),
                (treat.clone(), treat, 1),
            ]
        );
        let ribbon_info = scene.hover(5).unwrap();
        assert_eq!(
            ribbon_info.title,
            Some(format!("{} ⇌ {}", dep, dep))
        );
    }

    #[test]
    fn stacked_bars() {
        let scene = render(View::StackedBar, &sample_aggs());
        assert_eq!(scene.shapes.len(), 8);
        assert_eq!(scene.y_max(), Some(2));
        assert_eq!(scene.transition_ms, 800);
        // Second bin of the "No" series.
        assert_eq!(
            scene.shapes[6].kind,
            ShapeKind::Bar {
                bin: "3.00 - 3.49".to_string(),
                key: "No".to_string(),
                y0: 1,
                y1: 2,
                delay_ms: 200,
            }
        );
        assert_eq!(scene.shapes[6].color, SET1[1]);
        assert_eq!(
            scene.hover(2).unwrap().lines,
            vec![
                ("CGPA".to_string(), "3.00 - 3.49".to_string()),
                ("Yes".to_string(), "1".to_string())
            ]
        );
        assert_eq!(render(View::Donut, &sample_aggs()).y_max(), None);
    }

    #[test]
    fn render_is_pure() {
        let aggs = sample_aggs();
        for v in View::ALL {
            assert_eq!(render(v, &aggs), render(v, &aggs));
        }
    }
}
