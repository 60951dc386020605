use chrono::{Datelike, Local};

/// Half of the academic year a schedule file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    /// Which semester is running right now, by calendar month:
    /// September through January is the first, February through August
    /// the second.
    pub fn current() -> Self {
        Self::for_month(Local::now().month())
    }

    pub fn for_month(month: u32) -> Self {
        match month {
            9..=12 | 1 => Semester::First,
            _ => Semester::Second,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Semester::First),
            2 => Some(Semester::Second),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autumn_months_are_first_semester() {
        for m in [9, 10, 11, 12, 1] {
            assert_eq!(Semester::for_month(m), Semester::First, "month {}", m);
        }
    }

    #[test]
    fn spring_months_are_second_semester() {
        for m in 2..=8 {
            assert_eq!(Semester::for_month(m), Semester::Second, "month {}", m);
        }
    }

    #[test]
    fn number_round_trip() {
        assert_eq!(Semester::from_number(1), Some(Semester::First));
        assert_eq!(Semester::from_number(2), Some(Semester::Second));
        assert_eq!(Semester::from_number(3), None);
    }
}
