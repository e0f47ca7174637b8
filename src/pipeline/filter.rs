use chrono::{DateTime, Duration, Utc};

use crate::base::types::Created;

/// Keep only items created strictly before `now - cutoff`, in input order.
///
/// A cutoff reaching past the earliest representable time keeps nothing.
pub fn filter_by_age<T>(items: Vec<T>, cutoff: Duration, now: DateTime<Utc>) -> Vec<T>
where
    T: Created,
{
    let Some(threshold) = now.checked_sub_signed(cutoff) else {
        return Vec::new();
    };

    items.into_iter().filter(|item| item.created_at() < threshold).collect()
}

// Tests.

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, DateTime<Utc>);

    impl Created for Item {
        fn created_at(&self) -> DateTime<Utc> {
            self.1
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_boundary_is_excluded() {
        let cutoff = Duration::hours(24);
        let threshold = now() - cutoff;

        let items = vec![
            Item("older", threshold - Duration::seconds(1)),
            Item("exact", threshold),
            Item("newer", threshold + Duration::seconds(1)),
        ];

        let kept = filter_by_age(items, cutoff, now());

        assert_eq!(kept, vec![Item("older", threshold - Duration::seconds(1))]);
    }

    #[test]
    fn test_order_is_preserved() {
        let items = vec![
            Item("b", now() - Duration::hours(30)),
            Item("new", now() - Duration::hours(1)),
            Item("a", now() - Duration::hours(48)),
        ];

        let kept: Vec<_> = filter_by_age(items, Duration::hours(24), now()).into_iter().map(|i| i.0).collect();

        assert_eq!(kept, vec!["b", "a"]);
    }

    #[test]
    fn test_zero_cutoff_keeps_everything_in_the_past() {
        let items = vec![Item("past", now() - Duration::milliseconds(1)), Item("now", now())];

        let kept = filter_by_age(items, Duration::zero(), now());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].0, "past");
    }

    #[test]
    fn test_cutoff_past_representable_range_keeps_nothing() {
        let items = vec![Item("ancient", DateTime::<Utc>::MIN_UTC), Item("now", now())];

        let kept = filter_by_age(items, Duration::hours(i64::from(u32::MAX)), now());

        assert!(kept.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let kept = filter_by_age(Vec::<Item>::new(), Duration::hours(24), now());

        assert!(kept.is_empty());
    }
}
