/// Vertical extent of one card as laid out in its column, in the same
/// units as the pointer coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub top: f64,
    pub height: f64,
}

impl CardGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        CardGeometry { top, height }
    }

    fn center(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Computes where a dragged card lands in a column.
///
/// `candidates` are the column's cards in document order, excluding the
/// card being dragged. Returns the index of the card the dragged one is
/// inserted before, or `None` to append at the end. Called on every
/// drag-over event, since card positions shift as the drag relocates the
/// card live.
///
/// A candidate qualifies when the pointer sits above its vertical center
/// (`offset = pointer_y - center < 0`); among qualifiers the one with the
/// greatest offset wins, i.e. the first card whose center lies below the
/// pointer. The first candidate encountered keeps a tie.
pub fn drop_position(candidates: &[CardGeometry], pointer_y: f64) -> Option<usize> {
    let mut closest: Option<(f64, usize)> = None;
    for (index, card) in candidates.iter().enumerate() {
        let offset = pointer_y - card.center();
        if offset < 0.0 && closest.map_or(true, |(best, _)| offset > best) {
            closest = Some((offset, index));
        }
    }
    closest.map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stack(heights: &[f64]) -> Vec<CardGeometry> {
        let mut top = 0.0;
        heights
            .iter()
            .map(|&h| {
                let card = CardGeometry::new(top, h);
                top += h;
                card
            })
            .collect()
    }

    #[rstest]
    // Pointer above the first card's center lands before it.
    #[case(40.0, Some(0))]
    // Between the first and second centers lands before the second.
    #[case(60.0, Some(1))]
    #[case(149.0, Some(1))]
    // Below every center appends at the end.
    #[case(250.0, None)]
    #[case(1000.0, None)]
    fn insertion_picks_first_card_with_center_below_pointer(
        #[case] pointer_y: f64,
        #[case] expected: Option<usize>,
    ) {
        let cards = stack(&[100.0, 100.0, 100.0]);
        assert_eq!(drop_position(&cards, pointer_y), expected);
    }

    #[test]
    fn empty_column_always_appends() {
        assert_eq!(drop_position(&[], 0.0), None);
        assert_eq!(drop_position(&[], 500.0), None);
    }

    #[test]
    fn pointer_exactly_on_center_does_not_qualify() {
        // offset == 0 fails the strict `< 0` test, so the card is skipped.
        let cards = stack(&[100.0]);
        assert_eq!(drop_position(&cards, 50.0), None);
        assert_eq!(drop_position(&cards, 49.9), Some(0));
    }

    #[test]
    fn uneven_heights_compare_by_center() {
        let cards = vec![
            CardGeometry::new(0.0, 20.0),  // center 10
            CardGeometry::new(20.0, 80.0), // center 60
            CardGeometry::new(100.0, 30.0), // center 115
        ];
        assert_eq!(drop_position(&cards, 5.0), Some(0));
        assert_eq!(drop_position(&cards, 15.0), Some(1));
        assert_eq!(drop_position(&cards, 110.0), Some(2));
        assert_eq!(drop_position(&cards, 120.0), None);
    }

    #[test]
    fn first_candidate_keeps_a_tie() {
        // Two cards sharing a center cannot happen with real layout, but
        // document order must win if they do.
        let cards = vec![CardGeometry::new(0.0, 100.0), CardGeometry::new(0.0, 100.0)];
        assert_eq!(drop_position(&cards, 10.0), Some(0));
    }
}
