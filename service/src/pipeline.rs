//! Pure filter → sort → paginate pipeline over directory [`Record`]s.
//!
//! Every listing of [`Record`]s goes through [`apply()`], so all the
//! presentations of the directory agree on what is visible for the same
//! [`Controls`].

use std::collections::BTreeSet;

use common::{pagination::Arguments, Page};

use crate::{
    domain::Record,
    read::record::list::{Controls, InvalidPageSize, Order, SortKey},
};

/// Applies the provided [`Controls`] to the given `records`, returning the
/// requested [`Page`] of the filtered and sorted ones.
///
/// The requested page is clamped into the range of existing pages, so the
/// returned [`Page::page`] is the effective one.
///
/// # Errors
///
/// With [`InvalidPageSize`] if [`Controls::page_size`] is `0`.
pub fn apply<'r>(
    records: &'r [Record],
    controls: &Controls,
) -> Result<Page<&'r Record>, InvalidPageSize> {
    let arguments = Arguments::new(controls.page, controls.page_size)?;

    let criteria = Criteria::new(controls);
    let mut filtered = records
        .iter()
        .filter(|r| criteria.matches(r))
        .collect::<Vec<_>>();
    sort(&mut filtered, controls.sort_key, controls.sort_direction);

    Ok(Page::cut(filtered, arguments))
}

/// Filtering criteria derived from [`Controls`].
///
/// Each criterion is satisfied by any [`Record`] when inactive, so the
/// criteria compose by conjunction in any order.
#[derive(Clone, Debug, Default)]
pub struct Criteria<'c> {
    /// Lowercased search text.
    search: Option<String>,

    /// Exact email domain.
    domain: Option<&'c str>,

    /// Lowercased first letter of the first name.
    first_letter: Option<String>,
}

impl<'c> Criteria<'c> {
    /// Creates new [`Criteria`] out of the provided [`Controls`].
    #[must_use]
    pub fn new(controls: &'c Controls) -> Self {
        Self {
            search: controls.search_text(),
            domain: controls.domain_filter(),
            first_letter: controls
                .first_letter
                .map(|l| l.to_lowercase().collect()),
        }
    }

    /// Checks whether the provided [`Record`] satisfies all these
    /// [`Criteria`].
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self.matches_domain(record)
            && self.matches_first_letter(record)
    }

    /// Checks whether the full name or the email of the provided [`Record`]
    /// contains the search text, ignoring case.
    #[must_use]
    pub fn matches_search(&self, record: &Record) -> bool {
        self.search.as_deref().map_or(true, |text| {
            record.full_name().to_lowercase().contains(text)
                || record.email.as_ref().to_lowercase().contains(text)
        })
    }

    /// Checks whether the email domain of the provided [`Record`] is exactly
    /// the filtered one.
    #[must_use]
    pub fn matches_domain(&self, record: &Record) -> bool {
        self.domain
            .map_or(true, |domain| record.email.domain() == Some(domain))
    }

    /// Checks whether the first name of the provided [`Record`] starts with
    /// the filtered letter, ignoring case.
    #[must_use]
    pub fn matches_first_letter(&self, record: &Record) -> bool {
        self.first_letter.as_deref().map_or(true, |letter| {
            record.first_name.as_ref().to_lowercase().starts_with(letter)
        })
    }
}

/// Stably sorts the provided `records` by the lowercased [`SortKey`] field
/// in the given [`Order`].
///
/// [`Record`]s with equal keys keep their relative order in both
/// [`Order`]s.
pub fn sort(records: &mut Vec<&Record>, key: SortKey, order: Order) {
    let mut keyed = records
        .drain(..)
        .map(|r| (key.field(r).to_lowercase(), r))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));
    records.extend(keyed.into_iter().map(|(_, r)| r));
}

/// Returns distinct non-empty email domains of the provided `records`.
///
/// Email addresses without a domain are skipped.
#[must_use]
pub fn domains_of(records: &[Record]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.email.domain())
        .map(ToOwned::to_owned)
        .collect()
}

/// Returns distinct uppercased first letters of the first names of the
/// provided `records`.
///
/// Empty first names are skipped.
#[must_use]
pub fn letters_of(records: &[Record]) -> BTreeSet<char> {
    records
        .iter()
        .filter_map(|r| r.first_name.as_ref().chars().next())
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod spec {
    use itertools::Itertools as _;

    use crate::{
        domain::Record,
        read::record::list::{Controls, InvalidPageSize, Order, SortKey},
    };

    use super::{apply, domains_of, letters_of, Criteria};

    fn record(id: &str, first: &str, last: &str, email: &str) -> Record {
        Record {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg")
                .into(),
        }
    }

    /// `Bob Z <b@x.com>` and `amy A <a@y.com>`.
    fn bob_and_amy() -> Vec<Record> {
        vec![
            record("1", "Bob", "Z", "b@x.com"),
            record("2", "amy", "A", "a@y.com"),
        ]
    }

    fn directory() -> Vec<Record> {
        vec![
            record("1", "George", "Bluth", "george.bluth@reqres.in"),
            record("2", "Janet", "Weaver", "janet.weaver@reqres.in"),
            record("3", "Emma", "Wong", "emma.wong@reqres.in"),
            record("4", "Eve", "Holt", "eve.holt@example.org"),
            record("5", "Charles", "Morris", "charles.morris@example.org"),
            record("6", "Tracey", "Ramos", "tracey.ramos@reqres.in"),
            record("7", "Michael", "Lawson", "michael.lawson@reqres.in"),
            record("8", "Lindsay", "Ferguson", "lindsay@example.org"),
            record("9", "tobias", "Funke", "tobias.funke@reqres.in"),
            record("10", "Byron", "Fields", "byron.fields@example.org"),
            record("11", "George", "Edwards", "george.edwards@reqres.in"),
            record("12", "Rachel", "Howell", "rachel.howell"),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn sorts_case_insensitively() {
        let records = bob_and_amy();

        let page = apply(&records, &Controls::default()).unwrap();

        assert_eq!(ids(&page.items), ["2", "1"]);
    }

    #[test]
    fn sorts_descending() {
        let records = bob_and_amy();
        let controls = Controls {
            sort_direction: Order::Descending,
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(ids(&page.items), ["1", "2"]);
    }

    #[test]
    fn sorts_by_each_key() {
        let records = directory();
        for (key, expected) in [
            (SortKey::FirstName, "10"),
            (SortKey::LastName, "1"),
            (SortKey::Email, "10"),
        ] {
            let controls = Controls {
                sort_key: key,
                page_size: 1,
                ..Controls::default()
            };

            let page = apply(&records, &controls).unwrap();

            assert_eq!(ids(&page.items), [expected], "key: {key}");
        }
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let records = vec![
            record("1", "Ann", "B", "x@a.com"),
            record("2", "ann", "A", "y@a.com"),
            record("3", "Bea", "C", "z@a.com"),
            record("4", "ANN", "D", "w@a.com"),
        ];

        let asc = apply(&records, &Controls::default()).unwrap();
        assert_eq!(ids(&asc.items), ["1", "2", "4", "3"]);

        let desc = apply(
            &records,
            &Controls {
                sort_direction: Order::Descending,
                ..Controls::default()
            },
        )
        .unwrap();
        assert_eq!(ids(&desc.items), ["3", "1", "2", "4"]);
    }

    #[test]
    fn clamps_page_beyond_last() {
        let records = directory().into_iter().take(5).collect::<Vec<_>>();
        let controls = Controls {
            page: 5,
            page_size: 2,
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn clamps_page_below_first() {
        let records = directory();
        let controls = Controls {
            page: 0,
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 6);
    }

    #[test]
    fn filters_by_domain() {
        let records = bob_and_amy();
        let controls = Controls {
            domain: Some("x.com".into()),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(ids(&page.items), ["1"]);
    }

    #[test]
    fn domain_filter_is_exact_and_case_sensitive() {
        let records = vec![
            record("1", "A", "A", "a@x.com"),
            record("2", "B", "B", "b@mail.x.com"),
            record("3", "C", "C", "c@X.com"),
            record("4", "D", "D", "x.com"),
        ];
        let controls = Controls {
            domain: Some("x.com".into()),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(ids(&page.items), ["1"]);
    }

    #[test]
    fn all_domains_sentinel_keeps_everything() {
        let records = bob_and_amy();
        let controls = Controls {
            domain: Some("all".into()),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn searches_case_insensitively() {
        let records = bob_and_amy();
        let controls = Controls {
            search: "A".into(),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(ids(&page.items), ["2"]);
    }

    #[test]
    fn searches_across_full_name_and_email() {
        let records = directory();
        for (search, expected) in [
            ("janet weaver", vec!["2"]),
            ("EXAMPLE.org", vec!["10", "5", "4", "8"]),
            ("y f", vec!["8"]),
            ("nobody", vec![]),
        ] {
            let controls = Controls {
                search: search.into(),
                page_size: 20,
                ..Controls::default()
            };

            let page = apply(&records, &controls).unwrap();

            assert_eq!(ids(&page.items), expected, "search: {search}");
        }
    }

    #[test]
    fn blank_search_keeps_everything() {
        let records = directory();
        let controls = Controls {
            search: "   ".into(),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(page.total_count, records.len());
    }

    #[test]
    fn filters_by_first_letter() {
        let records = directory();
        for letter in ['t', 'T'] {
            let controls = Controls {
                first_letter: Some(letter),
                ..Controls::default()
            };

            let page = apply(&records, &controls).unwrap();

            assert_eq!(ids(&page.items), ["9", "6"], "letter: {letter}");
        }
    }

    #[test]
    fn malformed_email_still_participates() {
        let records = directory();
        let controls = Controls {
            search: "rachel".into(),
            first_letter: Some('r'),
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert_eq!(ids(&page.items), ["12"]);
    }

    #[test]
    fn empty_result_is_single_empty_page() {
        let records = directory();
        let controls = Controls {
            search: "nobody".into(),
            page: 3,
            ..Controls::default()
        };

        let page = apply(&records, &controls).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn accepts_no_records() {
        let page = apply(&[], &Controls::default()).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn rejects_zero_page_size() {
        for records in [Vec::new(), directory()] {
            let controls = Controls {
                page_size: 0,
                ..Controls::default()
            };

            assert_eq!(apply(&records, &controls), Err(InvalidPageSize));
        }
    }

    #[test]
    fn pages_cover_all_filtered_records() {
        let records = directory();
        for page_size in 1..=13 {
            for search in ["", "e", "reqres", "nobody"] {
                let controls = Controls {
                    search: search.into(),
                    page_size,
                    ..Controls::default()
                };
                let first = apply(&records, &controls).unwrap();

                let visited = (1..=first.total_pages)
                    .map(|page| {
                        apply(&records, &Controls { page, ..controls.clone() })
                            .unwrap()
                            .items
                            .len()
                    })
                    .sum::<usize>();

                assert_eq!(
                    visited, first.total_count,
                    "page size: {page_size}, search: {search:?}",
                );
            }
        }
    }

    #[test]
    fn filters_compose_in_any_order() {
        let records = directory();
        let controls = Controls {
            search: "e".into(),
            domain: Some("reqres.in".into()),
            first_letter: Some('g'),
            ..Controls::default()
        };
        let criteria = Criteria::new(&controls);
        let stages: [&dyn Fn(&Record) -> bool; 3] = [
            &|r| criteria.matches_search(r),
            &|r| criteria.matches_domain(r),
            &|r| criteria.matches_first_letter(r),
        ];

        let expected = records
            .iter()
            .filter(|r| criteria.matches(r))
            .collect::<Vec<_>>();
        assert_eq!(ids(&expected), ["1", "11"]);

        for order in stages.iter().permutations(stages.len()) {
            let filtered = order.iter().fold(
                records.iter().collect::<Vec<_>>(),
                |acc, stage| acc.into_iter().filter(|&r| stage(r)).collect(),
            );

            assert_eq!(filtered, expected);
        }
    }

    #[test]
    fn is_idempotent() {
        let records = directory();
        let controls = Controls {
            search: "o".into(),
            sort_key: SortKey::Email,
            sort_direction: Order::Descending,
            page: 2,
            page_size: 3,
            ..Controls::default()
        };

        assert_eq!(
            apply(&records, &controls).unwrap(),
            apply(&records, &controls).unwrap(),
        );
    }

    #[test]
    fn collects_domains() {
        let mut records = directory();
        records.push(record("13", "Nemo", "Nobody", "nemo@"));

        assert_eq!(
            domains_of(&records).into_iter().collect::<Vec<_>>(),
            ["example.org", "reqres.in"],
        );
    }

    #[test]
    fn collects_letters() {
        let mut records = directory();
        records.push(record("13", "", "Nobody", "nemo@x.com"));

        assert_eq!(
            letters_of(&records).into_iter().collect::<String>(),
            "BCEGJLMRT",
        );
    }
}
