//! Annotation layout for change-bar navigation
//!
//! Turns the changed pages and their sections into:
//! - One outline entry per section
//! - A "go to first change" directive on page 1 when it is unchanged
//! - A "next change" directive on every changed page but the last
//! - A "review finished" directive on the last changed page
//!
//! Label boxes slide left to right across the bottom band as the reader
//! steps through the changes, forming a progress bar.

mod types;

pub use types::*;

use crate::constants::{
    ANNOTATION_BOX_HEIGHT, ANNOTATION_BOX_WIDTH, ANNOTATION_MARGIN, EMPHASIS_COLOR,
    FINISHED_GREEN, LAYOUT_PAGE_WIDTH_PT, LINK_RED, MUTED_GRAY,
};
use crate::sections::{ChangedPages, Navigation, Section};
use crate::types::{Color, PageIndex, Rect};

/// Geometry of the bottom navigation band
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandGeometry {
    page_width: f32,
    box_width: f32,
    box_height: f32,
    margin: f32,
}

impl Default for BandGeometry {
    fn default() -> Self {
        Self {
            page_width: LAYOUT_PAGE_WIDTH_PT,
            box_width: ANNOTATION_BOX_WIDTH,
            box_height: ANNOTATION_BOX_HEIGHT,
            margin: ANNOTATION_MARGIN,
        }
    }
}

impl BandGeometry {
    /// Full-width click region along the bottom edge
    fn link_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.box_height + 2.0 * self.margin)
    }

    /// Label box at `progress` (0.0 = leftmost slot, 1.0 = rightmost)
    fn label_rect(&self, progress: f32) -> Rect {
        let travel = self.page_width - 2.0 * self.margin - self.box_width;
        let x = self.margin + (travel * progress.clamp(0.0, 1.0)).floor();
        Rect::new(x, self.margin, self.box_width, self.box_height)
    }
}

/// Horizontal progress for a page with `pages_left` changes after it.
///
/// With a single changed page there is no interior span; that page is
/// also the last one, so it takes the rightmost slot.
pub fn progress_fraction(pages_left: usize, total_changed: usize) -> f32 {
    if total_changed <= 1 {
        return 1.0;
    }
    let span = (total_changed - 1) as f32;
    (1.0 - pages_left as f32 / span).clamp(0.0, 1.0)
}

/// Outline title for the section at 1-based `ordinal`
pub fn section_title(ordinal: usize, section: &Section) -> String {
    if section.is_single_page() {
        format!("#{} - p. {}", ordinal, section.first())
    } else {
        format!("#{} - pp. {}-{}", ordinal, section.first(), section.last())
    }
}

/// Compute every outline entry and navigation directive for a document.
pub fn plan_annotations(
    changed: &ChangedPages,
    navigation: &Navigation,
    page_height: f32,
) -> AnnotationPlan {
    let band = &BandGeometry::default();
    let mut plan = AnnotationPlan {
        page_height,
        ..Default::default()
    };

    let (Some(first), Some(last)) = (changed.first(), changed.last()) else {
        return plan;
    };
    let total = changed.len();

    plan.outline = navigation
        .sections
        .iter()
        .enumerate()
        .map(|(idx, section)| OutlineEntry {
            title: section_title(idx + 1, section),
            page: section.first(),
        })
        .collect();

    if !first.is_first() {
        plan.directives.push(directive(
            band,
            PageIndex::FIRST,
            first,
            LINK_RED,
            vec![
                format!("{} pages left", total),
                "(Go to first change)".to_string(),
            ],
            EMPHASIS_COLOR,
            0.0,
        ));
    }

    let mut pages_left = total;
    for page in changed.iter() {
        pages_left -= 1;

        if page == last {
            plan.directives.push(directive(
                band,
                page,
                first,
                FINISHED_GREEN,
                vec![
                    "Review finished!".to_string(),
                    "(go to first change)".to_string(),
                ],
                FINISHED_GREEN,
                1.0,
            ));
            continue;
        }

        let Some(target) = navigation.next_after(page) else {
            continue;
        };
        let mut lines = vec![format!("{} pages left", pages_left)];
        let color = if navigation.jumps_to_new_section(page) {
            lines.push("(Go to next section)".to_string());
            EMPHASIS_COLOR
        } else {
            MUTED_GRAY
        };

        plan.directives.push(directive(
            band,
            page,
            target,
            LINK_RED,
            lines,
            color,
            progress_fraction(pages_left, total),
        ));
    }

    plan
}

fn directive(
    band: &BandGeometry,
    page: PageIndex,
    target: PageIndex,
    link_color: Color,
    lines: Vec<String>,
    label_color: Color,
    progress: f32,
) -> NavigationDirective {
    NavigationDirective {
        page,
        target,
        link: LinkRegion {
            rect: band.link_rect(),
            color: link_color,
        },
        label: LabelRegion {
            rect: band.label_rect(progress),
            lines,
            color: label_color,
            progress,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::build_sections;

    fn plan_for(numbers: &[u32]) -> AnnotationPlan {
        let changed = ChangedPages::new(
            numbers
                .iter()
                .map(|&n| PageIndex::new(n).unwrap())
                .collect(),
        )
        .unwrap();
        let navigation = build_sections(&changed);
        plan_annotations(&changed, &navigation, 792.0)
    }

    fn summary(plan: &AnnotationPlan) -> Vec<(u32, u32, String)> {
        plan.directives
            .iter()
            .map(|d| (d.page.get(), d.target.get(), d.label.text()))
            .collect()
    }

    #[test]
    fn outline_titles() {
        let plan = plan_for(&[3, 5, 6, 7, 10]);
        let titles: Vec<&str> = plan.outline.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["#1 - p. 3", "#2 - pp. 5-7", "#3 - p. 10"]);
        let targets: Vec<u32> = plan.outline.iter().map(|e| e.page.get()).collect();
        assert_eq!(targets, vec![3, 5, 10]);
    }

    #[test]
    fn directives_for_mixed_document() {
        let plan = plan_for(&[3, 5, 6, 7, 10]);
        assert_eq!(
            summary(&plan),
            vec![
                (1, 3, "5 pages left\n(Go to first change)".to_string()),
                (3, 5, "4 pages left\n(Go to next section)".to_string()),
                (5, 6, "3 pages left".to_string()),
                (6, 7, "2 pages left".to_string()),
                (7, 10, "1 pages left\n(Go to next section)".to_string()),
                (10, 3, "Review finished!\n(go to first change)".to_string()),
            ]
        );

        assert_eq!(plan.directives[1].label.color, EMPHASIS_COLOR);
        assert_eq!(plan.directives[2].label.color, MUTED_GRAY);
        assert_eq!(plan.directives[5].link.color, FINISHED_GREEN);
        assert_eq!(plan.directives[0].link.color, LINK_RED);
    }

    #[test]
    fn progress_moves_left_to_right() {
        let plan = plan_for(&[3, 5, 6, 7, 10]);
        let progress: Vec<f32> = plan.directives.iter().map(|d| d.label.progress).collect();
        assert_eq!(progress, vec![0.0, 0.0, 0.25, 0.5, 0.75, 1.0]);

        let xs: Vec<f32> = plan.directives.iter().map(|d| d.label.rect.x).collect();
        // travel = 612 - 6 - 120 = 486
        assert_eq!(xs, vec![3.0, 3.0, 124.0, 246.0, 367.0, 489.0]);
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn pages_left_counts_down_to_zero() {
        let plan = plan_for(&[2, 4, 8, 9]);
        let counts: Vec<usize> = plan
            .directives
            .iter()
            .skip(1)
            .filter_map(|d| {
                d.label.lines[0]
                    .strip_suffix(" pages left")
                    .map(|n| n.parse().unwrap())
            })
            .collect();
        assert_eq!(counts, vec![3, 2, 1]);
        assert!(plan.directives.last().unwrap().label.lines[0].starts_with("Review finished!"));
    }

    #[test]
    fn first_page_changed_has_no_preroll() {
        let plan = plan_for(&[1, 2, 3]);
        assert_eq!(
            summary(&plan),
            vec![
                (1, 2, "2 pages left".to_string()),
                (2, 3, "1 pages left".to_string()),
                (3, 1, "Review finished!\n(go to first change)".to_string()),
            ]
        );
        assert_eq!(plan.outline.len(), 1);
        assert_eq!(plan.outline[0].title, "#1 - pp. 1-3");
    }

    #[test]
    fn single_change_uses_rightmost_slot() {
        assert_eq!(progress_fraction(0, 1), 1.0);
        assert_eq!(progress_fraction(0, 0), 1.0);

        let plan = plan_for(&[4]);
        assert_eq!(
            summary(&plan),
            vec![
                (1, 4, "1 pages left\n(Go to first change)".to_string()),
                (4, 4, "Review finished!\n(go to first change)".to_string()),
            ]
        );
        assert_eq!(plan.directives[1].label.progress, 1.0);
        assert_eq!(plan.directives[1].label.rect.x, 489.0);
        assert_eq!(plan.outline[0].title, "#1 - p. 4");
    }

    #[test]
    fn link_band_spans_page_width() {
        let plan = plan_for(&[2, 3]);
        for directive in &plan.directives {
            assert_eq!(directive.link.rect, Rect::new(0.0, 0.0, 612.0, 42.0));
            assert_eq!(directive.label.rect.y, 3.0);
            assert_eq!(directive.label.rect.height, 36.0);
        }
    }

    #[test]
    fn empty_plan_without_changes() {
        let plan = plan_annotations(&ChangedPages::default(), &Navigation::default(), 792.0);
        assert!(plan.is_empty());
    }
}
