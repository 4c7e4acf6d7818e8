/// Current-question cursor over `[0, total)`.
///
/// Out-of-range moves are clamped rather than reported. Whether a move is allowed
/// at all (feedback visible, session finished) is decided by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.current + 1 == self.total
    }

    /// Returns the new index.
    pub fn previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Returns the new index.
    pub fn next(&mut self) -> usize {
        if self.has_next() {
            self.current += 1;
        }
        self.current
    }

    /// Moves to `index`, clamped to the last question. Returns the new index.
    pub fn jump_to(&mut self, index: usize) -> usize {
        self.current = index.min(self.total.saturating_sub(1));
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_floors_at_zero() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.previous(), 0);
        assert!(!nav.has_previous());
    }

    #[test]
    fn next_ceils_at_last() {
        let mut nav = Navigator::new(3);
        nav.next();
        nav.next();
        assert!(nav.is_last());
        assert_eq!(nav.next(), 2);
        assert!(!nav.has_next());
    }

    #[test]
    fn jump_is_clamped() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.jump_to(1), 1);
        assert_eq!(nav.jump_to(42), 2);
    }

    #[test]
    fn single_question_is_first_and_last() {
        let nav = Navigator::new(1);
        assert!(nav.is_last());
        assert!(!nav.has_previous());
        assert!(!nav.has_next());
    }
}
